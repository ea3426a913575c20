//! The in-memory recipe collection and its five operations.
//!
//! The store is plain owned data with no interior mutability — callers
//! decide how to share it (the server wraps it in a mutex, tests build a
//! fresh one per case). Every operation is one atomic step: it either
//! completes fully or leaves the collection untouched.

use thiserror::Error;

use crate::recipe::{DEFAULT_DIFFICULTY, Lines, Num, Recipe, RecipeDraft};

/// Why a store operation was refused. The HTTP layer maps these onto
/// status codes and localized messages.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no recipe with that id")]
    NotFound,
    #[error("title and description are required")]
    MissingDetails,
    #[error("prep time and servings are required")]
    MissingQuantities,
}

/// The ordered in-memory collection of [`Recipe`] records.
#[derive(Debug, Default)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The store as shipped: two example recipes, ids 1 and 2.
    pub fn seeded() -> Self {
        Self {
            recipes: vec![
                Recipe {
                    id: 1,
                    title: "עוגת שוקולד".to_owned(),
                    description: "עוגה מעולה וטעימה".to_owned(),
                    ingredients: vec![
                        "2 כוסות קמח".to_owned(),
                        "1 כוס סוכר".to_owned(),
                        "3 ביצים".to_owned(),
                        "1/2 כוס קקאו".to_owned(),
                    ],
                    instructions: vec![
                        "תערבב את הקמח והסוכר".to_owned(),
                        "הוסף ביצים".to_owned(),
                        "הוסף קקאו".to_owned(),
                        "אפה 30 דקות ב-180 מעלות".to_owned(),
                    ],
                    prep_time: 30,
                    servings: 8,
                    difficulty: "בינוני".to_owned(),
                },
                Recipe {
                    id: 2,
                    title: "שוקולד חם".to_owned(),
                    description: "משקה מיוחד וחם".to_owned(),
                    ingredients: vec![
                        "2 כוסות חלב".to_owned(),
                        "100 גרם שוקולד".to_owned(),
                        "1 כפית סוכר".to_owned(),
                    ],
                    instructions: vec![
                        "חמם את החלב".to_owned(),
                        "הוסף שוקולד".to_owned(),
                        "עירבב היטב".to_owned(),
                    ],
                    prep_time: 10,
                    servings: 2,
                    difficulty: "קל".to_owned(),
                },
            ],
        }
    }

    /// The full ordered collection. Always succeeds.
    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    /// First record whose id matches.
    pub fn get(&self, id: u64) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Validates and appends a new record, assigning the next id.
    ///
    /// Validation order matters: title/description are checked before
    /// prepTime/servings, so a draft missing both reports the former.
    /// A quirk carried over from the service this replaces: the numeric
    /// fields must be *truthy*, so an explicit `prepTime: 0` is refused
    /// the same as a missing one.
    pub fn create(&mut self, draft: RecipeDraft) -> Result<Recipe, StoreError> {
        let title = non_empty(draft.title).ok_or(StoreError::MissingDetails)?;
        let description = non_empty(draft.description).ok_or(StoreError::MissingDetails)?;
        let prep_time = positive(draft.prep_time.as_ref()).ok_or(StoreError::MissingQuantities)?;
        let servings = positive(draft.servings.as_ref()).ok_or(StoreError::MissingQuantities)?;

        let recipe = Recipe {
            id: self.next_id(),
            title,
            description,
            ingredients: draft.ingredients.map(Lines::into_list).unwrap_or_default(),
            instructions: draft.instructions.map(Lines::into_list).unwrap_or_default(),
            prep_time,
            servings,
            difficulty: non_empty(draft.difficulty)
                .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_owned()),
        };
        self.recipes.push(recipe.clone());
        Ok(recipe)
    }

    /// Overwrites the fields of an existing record that are present and
    /// truthy in the draft; everything else keeps its stored value.
    ///
    /// Same truthiness quirk as [`create`](Self::create): a zero number or
    /// empty string in the draft cannot clear a stored value. Documented
    /// behavior, not an accident.
    pub fn update(&mut self, id: u64, draft: RecipeDraft) -> Result<Recipe, StoreError> {
        let recipe = self
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(title) = non_empty(draft.title) {
            recipe.title = title;
        }
        if let Some(description) = non_empty(draft.description) {
            recipe.description = description;
        }
        if let Some(lines) = draft.ingredients.filter(Lines::is_present) {
            recipe.ingredients = lines.into_list();
        }
        if let Some(lines) = draft.instructions.filter(Lines::is_present) {
            recipe.instructions = lines.into_list();
        }
        if let Some(minutes) = positive(draft.prep_time.as_ref()) {
            recipe.prep_time = minutes;
        }
        if let Some(servings) = positive(draft.servings.as_ref()) {
            recipe.servings = servings;
        }
        if let Some(difficulty) = non_empty(draft.difficulty) {
            recipe.difficulty = difficulty;
        }
        Ok(recipe.clone())
    }

    /// Removes the record with the given id and returns it.
    pub fn delete(&mut self, id: u64) -> Result<Recipe, StoreError> {
        let index = self
            .recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        Ok(self.recipes.remove(index))
    }

    /// Next id: one past the maximum live id, never a reused one while the
    /// maximum survives, and 1 for an empty collection.
    fn next_id(&self) -> u64 {
        self.recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

fn positive(field: Option<&Num>) -> Option<u32> {
    field.and_then(Num::to_int).filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_draft() -> RecipeDraft {
        RecipeDraft {
            title: Some("T".to_owned()),
            description: Some("D".to_owned()),
            prep_time: Some(Num::Int(5)),
            servings: Some(Num::Int(2)),
            ..RecipeDraft::default()
        }
    }

    #[test]
    fn create_on_empty_store_assigns_id_one_and_default_difficulty() {
        let mut store = RecipeStore::new();
        let recipe = store.create(minimal_draft()).unwrap();
        assert_eq!(recipe.id, 1);
        assert_eq!(recipe.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn ids_strictly_increase_and_are_never_reused() {
        let mut store = RecipeStore::new();
        let a = store.create(minimal_draft()).unwrap();
        let b = store.create(minimal_draft()).unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        store.delete(1).unwrap();
        let c = store.create(minimal_draft()).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn create_without_title_or_description_is_refused_without_mutation() {
        let mut store = RecipeStore::new();
        let draft = RecipeDraft { title: None, ..minimal_draft() };
        assert_eq!(store.create(draft), Err(StoreError::MissingDetails));

        let draft = RecipeDraft { description: Some(String::new()), ..minimal_draft() };
        assert_eq!(store.create(draft), Err(StoreError::MissingDetails));
        assert!(store.list().is_empty());
    }

    #[test]
    fn create_without_quantities_is_refused() {
        let mut store = RecipeStore::new();
        let draft = RecipeDraft { servings: None, ..minimal_draft() };
        assert_eq!(store.create(draft), Err(StoreError::MissingQuantities));

        // Truthiness quirk: an explicit zero reads as missing.
        let draft = RecipeDraft { prep_time: Some(Num::Int(0)), ..minimal_draft() };
        assert_eq!(store.create(draft), Err(StoreError::MissingQuantities));
    }

    #[test]
    fn details_are_checked_before_quantities() {
        let mut store = RecipeStore::new();
        let draft = RecipeDraft::default();
        assert_eq!(store.create(draft), Err(StoreError::MissingDetails));
    }

    #[test]
    fn create_normalizes_block_text_fields() {
        let mut store = RecipeStore::new();
        let draft = RecipeDraft {
            ingredients: Some(Lines::Block("a\nb\n\nc".to_owned())),
            ..minimal_draft()
        };
        let recipe = store.create(draft).unwrap();
        assert_eq!(recipe.ingredients, vec!["a", "b", "c"]);
        assert!(recipe.instructions.is_empty());
    }

    #[test]
    fn create_coerces_digit_strings() {
        let mut store = RecipeStore::new();
        let draft = RecipeDraft {
            prep_time: Some(Num::Text("45".to_owned())),
            ..minimal_draft()
        };
        assert_eq!(store.create(draft).unwrap().prep_time, 45);
    }

    #[test]
    fn partial_update_leaves_other_fields_untouched() {
        let mut store = RecipeStore::seeded();
        let before = store.get(1).unwrap().clone();

        let draft = RecipeDraft { title: Some("new title".to_owned()), ..RecipeDraft::default() };
        let after = store.update(1, draft).unwrap();

        assert_eq!(after.title, "new title");
        assert_eq!(after.description, before.description);
        assert_eq!(after.ingredients, before.ingredients);
        assert_eq!(after.prep_time, before.prep_time);
        assert_eq!(after.difficulty, before.difficulty);
    }

    #[test]
    fn falsy_update_values_are_skipped() {
        let mut store = RecipeStore::seeded();
        let before = store.get(1).unwrap().clone();

        let draft = RecipeDraft {
            title: Some(String::new()),
            prep_time: Some(Num::Int(0)),
            ingredients: Some(Lines::Block(String::new())),
            ..RecipeDraft::default()
        };
        let after = store.update(1, draft).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn update_normalizes_block_text() {
        let mut store = RecipeStore::seeded();
        let draft = RecipeDraft {
            instructions: Some(Lines::Block(" mix \n bake ".to_owned())),
            ..RecipeDraft::default()
        };
        let after = store.update(2, draft).unwrap();
        assert_eq!(after.instructions, vec!["mix", "bake"]);
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut store = RecipeStore::seeded();
        let err = store.update(99, RecipeDraft::default()).unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[test]
    fn delete_removes_and_returns_the_record_once() {
        let mut store = RecipeStore::seeded();
        let removed = store.delete(1).unwrap();
        assert_eq!(removed.id, 1);

        let remaining: Vec<u64> = store.list().iter().map(|r| r.id).collect();
        assert_eq!(remaining, vec![2]);
        assert_eq!(store.delete(1), Err(StoreError::NotFound));
    }
}
