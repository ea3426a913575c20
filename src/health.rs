//! Liveness and readiness probe handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can it serve traffic? |
//!
//! The store lives in memory and needs no warm-up, so both probes answer
//! unconditionally.

use crate::api::AppState;
use crate::request::Request;
use crate::response::Response;

/// Always `200 OK` with body `"ok"`. If the process can respond to HTTP at
/// all, it is alive — this handler intentionally has no dependencies.
pub async fn liveness(_state: AppState, _req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"`. The in-memory store is ready the moment it
/// is constructed.
pub async fn readiness(_state: AppState, _req: Request) -> Response {
    Response::text("ready")
}
