//! Permissive cross-origin support.
//!
//! The service is meant to be called from browser frontends on any origin,
//! so every response carries `access-control-allow-origin: *` and every
//! `OPTIONS` request — regardless of path — is answered with a `204`
//! preflight before routing happens.

use http::StatusCode;
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    HeaderValue,
};

use crate::response::Response;

const ALLOW_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";
const ALLOW_HEADERS: &str = "content-type";

/// Stamps the any-origin header onto a response on its way out.
pub(crate) fn apply(mut response: Response) -> Response {
    response.insert_header(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

/// The answer to an `OPTIONS` preflight: `204` plus the allow headers.
pub(crate) fn preflight() -> Response {
    apply(
        Response::builder()
            .status(StatusCode::NO_CONTENT)
            .header(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS))
            .header(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS))
            .no_body(),
    )
}
