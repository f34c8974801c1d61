//! JSON extractor with application error rejections.

use axum::extract::FromRequest;

use common::AppError;

/// `Json` whose rejections render as [`AppError`] bodies.
///
/// Account payloads are checked by the domain rules rather than `validator`,
/// so this extractor only deals with malformed bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
