//! The recipe CRUD surface: route table, shared state, and the five
//! request handlers.
//!
//! Handlers translate between HTTP and [`RecipeStore`] operations and own
//! the client-facing messages. The store itself never sees a status code
//! and the handlers never scan the collection — each side does its half.

use std::sync::Arc;

use http::StatusCode;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::error;

use crate::health;
use crate::recipe::{Recipe, RecipeDraft};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::store::{RecipeStore, StoreError};

/// Client-facing messages, localized in Hebrew like the rest of the
/// service's text.
mod msg {
    /// "The recipe was not found"
    pub const NOT_FOUND: &str = "המתכון לא נמצא";
    /// "Name and description are required"
    pub const MISSING_DETAILS: &str = "חובה למלא שם ותיאור";
    /// "Prep time and servings are required"
    pub const MISSING_QUANTITIES: &str = "חובה למלא זמן הכנה ומנות";
    /// "The recipe was added successfully"
    pub const CREATED: &str = "המתכון נוסף בהצלחה";
    /// "The recipe was updated successfully"
    pub const UPDATED: &str = "המתכון עודכן בהצלחה";
    /// "The recipe was deleted successfully"
    pub const DELETED: &str = "המתכון נמחק בהצלחה";
    /// "Server error"
    pub const SERVER_ERROR: &str = "שגיאה בשרת";
}

/// Shared application state handed to every handler.
///
/// The store sits behind a mutex because the server runs one task per
/// connection; each operation holds the lock for its full read-or-mutate
/// step, so no request ever observes a partially-updated record.
#[derive(Clone)]
pub struct AppState {
    pub(crate) store: Arc<Mutex<RecipeStore>>,
}

impl AppState {
    pub fn new(store: RecipeStore) -> Self {
        Self { store: Arc::new(Mutex::new(store)) }
    }

    /// State wrapping the seeded example collection.
    pub fn seeded() -> Self {
        Self::new(RecipeStore::seeded())
    }
}

/// The full route table.
pub fn router() -> Router<AppState> {
    Router::new()
        .get("/api/recipes", list_recipes)
        .get("/api/recipes/{id}", get_recipe)
        .post("/api/recipes", create_recipe)
        .put("/api/recipes/{id}", update_recipe)
        .delete("/api/recipes/{id}", delete_recipe)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /api/recipes` — the full ordered collection.
async fn list_recipes(state: AppState, _req: Request) -> Response {
    let store = state.store.lock();
    reply(StatusCode::OK, &store.list())
}

/// `GET /api/recipes/{id}` — one record, or 404.
async fn get_recipe(state: AppState, req: Request) -> Response {
    let Some(id) = parse_id(&req) else {
        return refusal(StoreError::NotFound);
    };
    let store = state.store.lock();
    match store.get(id) {
        Some(recipe) => reply(StatusCode::OK, recipe),
        None => refusal(StoreError::NotFound),
    }
}

/// `POST /api/recipes` — validate, assign the next id, append.
async fn create_recipe(state: AppState, req: Request) -> Response {
    let draft = match parse_draft(req.body()) {
        Ok(draft) => draft,
        Err(response) => return response,
    };
    let mut store = state.store.lock();
    match store.create(draft) {
        Ok(recipe) => reply(
            StatusCode::CREATED,
            &Confirmation { message: msg::CREATED, recipe: &recipe },
        ),
        Err(err) => refusal(err),
    }
}

/// `PUT /api/recipes/{id}` — overwrite the present-and-truthy fields.
async fn update_recipe(state: AppState, req: Request) -> Response {
    let Some(id) = parse_id(&req) else {
        return refusal(StoreError::NotFound);
    };
    let draft = match parse_draft(req.body()) {
        Ok(draft) => draft,
        Err(response) => return response,
    };
    let mut store = state.store.lock();
    match store.update(id, draft) {
        Ok(recipe) => reply(
            StatusCode::OK,
            &Confirmation { message: msg::UPDATED, recipe: &recipe },
        ),
        Err(err) => refusal(err),
    }
}

/// `DELETE /api/recipes/{id}` — remove and return the record.
async fn delete_recipe(state: AppState, req: Request) -> Response {
    let Some(id) = parse_id(&req) else {
        return refusal(StoreError::NotFound);
    };
    let mut store = state.store.lock();
    match store.delete(id) {
        Ok(recipe) => reply(
            StatusCode::OK,
            &Confirmation { message: msg::DELETED, recipe: &recipe },
        ),
        Err(err) => refusal(err),
    }
}

// ── Wire shapes ───────────────────────────────────────────────────────────────

/// The `{message, recipe}` body returned by create, update, and delete.
#[derive(Serialize)]
struct Confirmation<'a> {
    message: &'static str,
    recipe: &'a Recipe,
}

/// The `{message}` body carried by every error response.
#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The `{id}` path segment as an integer. Malformed ids are a no-match,
/// not a distinct parse error.
fn parse_id(req: &Request) -> Option<u64> {
    req.param("id")?.parse().ok()
}

/// Deserializes a request body into a draft. An empty body reads as an
/// empty payload; a malformed one is an internal error, answered with the
/// generic 500 body and logged server-side.
fn parse_draft(body: &[u8]) -> Result<RecipeDraft, Response> {
    if body.is_empty() {
        return Ok(RecipeDraft::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        error!("malformed request body: {e}");
        server_error()
    })
}

/// Serializes `value` with the given status. A serialization failure is
/// logged and collapses to the generic 500 body.
fn reply(status: StatusCode, value: &impl Serialize) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => Response::builder().status(status).json(body),
        Err(e) => {
            error!("response serialization failed: {e}");
            server_error()
        }
    }
}

fn server_error() -> Response {
    // Hand-built body so this path cannot itself fail to serialize.
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .json(format!(r#"{{"message":"{}"}}"#, msg::SERVER_ERROR).into_bytes())
}

/// Maps a refused store operation onto its status code and localized message.
fn refusal(err: StoreError) -> Response {
    let (status, message) = match err {
        StoreError::NotFound => (StatusCode::NOT_FOUND, msg::NOT_FOUND),
        StoreError::MissingDetails => (StatusCode::BAD_REQUEST, msg::MISSING_DETAILS),
        StoreError::MissingQuantities => (StatusCode::BAD_REQUEST, msg::MISSING_QUANTITIES),
    };
    reply(status, &ErrorBody { message })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::HeaderMap;
    use serde_json::Value;

    use super::*;
    use crate::handler::ErasedHandler as _;
    use crate::method::Method;

    /// Routes one request through the real route table and returns
    /// `(status, parsed JSON body)`.
    async fn send(state: &AppState, method: Method, path: &str, body: &str) -> (u16, Value) {
        let router = router();
        let (handler, params) = router.lookup(method, path).expect("route should exist");
        let request = Request::new(
            method,
            path.to_owned(),
            HeaderMap::new(),
            Bytes::from(body.to_owned()),
            params,
        );
        let response = handler.call(state.clone(), request).await;
        let json = if response.body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&response.body).expect("body should be JSON")
        };
        (response.status.as_u16(), json)
    }

    #[tokio::test]
    async fn list_returns_the_seeded_collection_in_order() {
        let state = AppState::seeded();
        let (status, body) = send(&state, Method::Get, "/api/recipes", "").await;
        assert_eq!(status, 200);
        let ids: Vec<u64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn get_by_id_returns_the_record() {
        let state = AppState::seeded();
        let (status, body) = send(&state, Method::Get, "/api/recipes/2", "").await;
        assert_eq!(status, 200);
        assert_eq!(body["title"], "שוקולד חם");
        assert_eq!(body["prepTime"], 10);
    }

    #[tokio::test]
    async fn missing_and_malformed_ids_both_answer_404() {
        let state = AppState::seeded();
        for path in ["/api/recipes/99", "/api/recipes/abc"] {
            let (status, body) = send(&state, Method::Get, path, "").await;
            assert_eq!(status, 404);
            assert_eq!(body["message"], msg::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn create_on_an_empty_store_assigns_id_one() {
        let state = AppState::new(RecipeStore::new());
        let payload = r#"{"title":"T","description":"D","prepTime":5,"servings":2}"#;
        let (status, body) = send(&state, Method::Post, "/api/recipes", payload).await;
        assert_eq!(status, 201);
        assert_eq!(body["message"], msg::CREATED);
        assert_eq!(body["recipe"]["id"], 1);
        assert_eq!(body["recipe"]["difficulty"], "בינוני");
    }

    #[tokio::test]
    async fn create_splits_newline_ingredients() {
        let state = AppState::new(RecipeStore::new());
        let payload = r#"{"title":"T","description":"D","prepTime":"5","servings":2,
                          "ingredients":"a\nb\n\nc"}"#;
        let (status, body) = send(&state, Method::Post, "/api/recipes", payload).await;
        assert_eq!(status, 201);
        assert_eq!(body["recipe"]["ingredients"], serde_json::json!(["a", "b", "c"]));
        assert_eq!(body["recipe"]["prepTime"], 5);
    }

    #[tokio::test]
    async fn create_without_required_fields_is_400_and_mutates_nothing() {
        let state = AppState::seeded();

        let (status, body) =
            send(&state, Method::Post, "/api/recipes", r#"{"description":"D"}"#).await;
        assert_eq!(status, 400);
        assert_eq!(body["message"], msg::MISSING_DETAILS);

        let (status, body) = send(
            &state,
            Method::Post,
            "/api/recipes",
            r#"{"title":"T","description":"D","prepTime":5}"#,
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(body["message"], msg::MISSING_QUANTITIES);

        assert_eq!(state.store.lock().list().len(), 2);
    }

    #[tokio::test]
    async fn malformed_json_body_answers_the_generic_500() {
        let state = AppState::seeded();
        let (status, body) = send(&state, Method::Post, "/api/recipes", "{not json").await;
        assert_eq!(status, 500);
        assert_eq!(body["message"], msg::SERVER_ERROR);
    }

    #[tokio::test]
    async fn update_overwrites_only_the_sent_fields() {
        let state = AppState::seeded();
        let (status, body) =
            send(&state, Method::Put, "/api/recipes/1", r#"{"servings":12}"#).await;
        assert_eq!(status, 200);
        assert_eq!(body["message"], msg::UPDATED);
        assert_eq!(body["recipe"]["servings"], 12);
        assert_eq!(body["recipe"]["title"], "עוגת שוקולד");

        let (status, body) = send(&state, Method::Put, "/api/recipes/99", "{}").await;
        assert_eq!(status, 404);
        assert_eq!(body["message"], msg::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_returns_the_removed_record_and_404s_after() {
        let state = AppState::seeded();
        let (status, body) = send(&state, Method::Delete, "/api/recipes/1", "").await;
        assert_eq!(status, 200);
        assert_eq!(body["message"], msg::DELETED);
        assert_eq!(body["recipe"]["id"], 1);

        let (status, _) = send(&state, Method::Get, "/api/recipes/1", "").await;
        assert_eq!(status, 404);
        let (status, _) = send(&state, Method::Delete, "/api/recipes/1", "").await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn health_probes_answer_in_plain_text() {
        let state = AppState::seeded();
        let router = router();
        let (handler, params) = router.lookup(Method::Get, "/healthz").unwrap();
        let request =
            Request::new(Method::Get, "/healthz".to_owned(), HeaderMap::new(), Bytes::new(), params);
        let response = handler.call(state, request).await;
        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(response.body, b"ok");
    }
}
