//! # recipe-api
//!
//! A minimal CRUD HTTP service for recipe records held in process memory.
//! Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Five operations over one entity:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET    | `/api/recipes`      | 200, array of recipes |
//! | GET    | `/api/recipes/{id}` | 200, one recipe |
//! | POST   | `/api/recipes`      | 201, `{message, recipe}` |
//! | PUT    | `/api/recipes/{id}` | 200, `{message, recipe}` |
//! | DELETE | `/api/recipes/{id}` | 200, `{message, recipe}` (the removed record) |
//!
//! Missing ids answer 404, missing required create fields answer 400, both
//! as `{message}` JSON. The collection lives in memory only — it is seeded
//! at startup and lost on exit. There is no persistence, no auth, no
//! pagination; a reverse proxy owns TLS, rate limiting, and body-size
//! limits, the service owns routing, validation, and storage.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use recipe_api::{AppState, Server, api};
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = AppState::seeded();
//!     Server::bind("0.0.0.0:3000")
//!         .serve(api::router(), state)
//!         .await
//!         .unwrap();
//! }
//! ```

pub mod api;
mod cors;
mod error;
mod handler;
pub mod health;
mod method;
mod recipe;
mod request;
mod response;
mod router;
mod server;
mod store;

pub use api::AppState;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use recipe::{Lines, Num, Recipe, RecipeDraft};
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
pub use store::{RecipeStore, StoreError};
