//! The recipe record and its boundary types.
//!
//! Clients may send `ingredients`/`instructions` either as a ready-made JSON
//! array or as one newline-delimited block of text, and the numeric fields
//! either as JSON numbers or as digit strings. Both shapes are modelled as
//! untagged unions here and normalized to one canonical form before a
//! [`Recipe`] is ever constructed, so the rest of the crate only sees
//! `Vec<String>` and integers.

use serde::{Deserialize, Serialize};

/// Difficulty label applied when a create payload omits the field.
/// "בינוני" — medium. Client-facing text is Hebrew throughout.
pub const DEFAULT_DIFFICULTY: &str = "בינוני";

/// One stored recipe record.
///
/// `id` is assigned by the store, is unique across live records, and is
/// never reused after a delete. Wire shape is camelCase (`prepTime`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Preparation time in minutes.
    pub prep_time: u32,
    pub servings: u32,
    pub difficulty: String,
}

/// An incoming recipe payload, before validation.
///
/// Every field is optional: create rejects drafts with missing required
/// fields, update treats missing (or falsy) fields as "leave unchanged".
/// An empty request body deserializes to `RecipeDraft::default()`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Lines>,
    pub instructions: Option<Lines>,
    pub prep_time: Option<Num>,
    pub servings: Option<Num>,
    pub difficulty: Option<String>,
}

/// An ordered list field at the API boundary: either an explicit array or a
/// single newline-delimited block of text.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Lines {
    List(Vec<String>),
    Block(String),
}

impl Lines {
    /// Canonical ordered-list form.
    ///
    /// Arrays pass through untouched. Block text is split per line, each
    /// line trimmed of surrounding whitespace, empty lines dropped, order
    /// preserved: `"a\nb\n\nc"` becomes `["a", "b", "c"]`.
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::List(items) => items,
            Self::Block(text) => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Whether an update should apply this value.
    ///
    /// An empty text block counts as absent (it cannot overwrite a stored
    /// list); an explicit array always applies, even when empty.
    pub fn is_present(&self) -> bool {
        match self {
            Self::List(_) => true,
            Self::Block(text) => !text.is_empty(),
        }
    }
}

/// A numeric field at the API boundary: a JSON number or a digit string.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Num {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Num {
    /// Coerces to a non-negative integer.
    ///
    /// Strings are read like `parseInt`: leading whitespace skipped, the
    /// longest leading run of digits taken, the rest ignored. Floats are
    /// truncated. Negative or unreadable values yield `None` and are
    /// treated by callers as if the field were missing.
    pub fn to_int(&self) -> Option<u32> {
        match self {
            Self::Int(n) => u32::try_from(*n).ok(),
            Self::Float(f) if *f >= 0.0 => Some(f.trunc() as u32),
            Self::Float(_) => None,
            Self::Text(s) => {
                let digits: String = s.trim_start().chars().take_while(char::is_ascii_digit).collect();
                digits.parse().ok()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_text_splits_into_trimmed_non_empty_lines() {
        let lines = Lines::Block("  flour \nsugar\n\n eggs".to_owned());
        assert_eq!(lines.into_list(), vec!["flour", "sugar", "eggs"]);
    }

    #[test]
    fn arrays_pass_through_untouched() {
        let lines = Lines::List(vec!["  raw  ".to_owned()]);
        assert_eq!(lines.into_list(), vec!["  raw  "]);
    }

    #[test]
    fn empty_block_counts_as_absent_but_empty_array_does_not() {
        assert!(!Lines::Block(String::new()).is_present());
        assert!(Lines::List(Vec::new()).is_present());
    }

    #[test]
    fn lines_deserializes_from_either_shape() {
        let from_array: Lines = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(from_array.into_list(), vec!["a", "b"]);

        let from_text: Lines = serde_json::from_str(r#""a\nb\n\nc""#).unwrap();
        assert_eq!(from_text.into_list(), vec!["a", "b", "c"]);
    }

    #[test]
    fn num_coerces_numbers_and_digit_strings() {
        assert_eq!(Num::Int(30).to_int(), Some(30));
        assert_eq!(Num::Float(30.9).to_int(), Some(30));
        assert_eq!(Num::Text("30".to_owned()).to_int(), Some(30));
        assert_eq!(Num::Text(" 30 minutes".to_owned()).to_int(), Some(30));
        assert_eq!(Num::Text("abc".to_owned()).to_int(), None);
        assert_eq!(Num::Int(-5).to_int(), None);
    }

    #[test]
    fn recipe_serializes_camel_case() {
        let recipe = Recipe {
            id: 1,
            title: "t".to_owned(),
            description: "d".to_owned(),
            ingredients: vec![],
            instructions: vec![],
            prep_time: 5,
            servings: 2,
            difficulty: DEFAULT_DIFFICULTY.to_owned(),
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["prepTime"], 5);
        assert!(json.get("prep_time").is_none());
    }

    #[test]
    fn empty_body_parses_as_default_draft() {
        let draft: RecipeDraft = serde_json::from_str("{}").unwrap();
        assert!(draft.title.is_none());
        assert!(draft.prep_time.is_none());
    }
}
