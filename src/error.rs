// src/error.rs
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::models::Locale;

/// Configuration-class failures. Every variant is a defect in the compiled-in
/// tables or data files; the startup integrity check is expected to surface
/// them before the server binds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SiteError {
    #[error("unknown link id `{0}`")]
    UnknownLink(String),

    #[error("link `{0}` is not an on-chain address")]
    NotAnAddress(String),

    #[error("link id `{0}` registered twice")]
    DuplicateLink(String),

    #[error("no content for page `{page}` in locale `{locale}`")]
    MissingContent { page: String, locale: Locale },

    #[error("page `{page}` exists for `{present}` but not for `{missing}`")]
    ContentGap {
        page: String,
        present: Locale,
        missing: Locale,
    },

    #[error("field `{field}` of page `{page}` exists for `{present}` but not for `{missing}`")]
    FieldGap {
        page: String,
        field: String,
        present: Locale,
        missing: Locale,
    },

    #[error("page `{page}` has no usable `{field}` field")]
    MissingField { page: String, field: String },

    #[error("invalid content catalog for `{locale}`: {reason}")]
    InvalidCatalog { locale: Locale, reason: String },

    #[error("unknown page `{0}`")]
    UnknownPage(String),

    #[error("path `{0}` already carries a locale prefix")]
    AlreadyPrefixed(String),

    #[error("link `{id}` has an unusable url `{value}`")]
    InvalidUrl { id: String, value: String },
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        tracing::error!("Render failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>500</h1><p>Internal error.</p>".to_string()),
        )
            .into_response()
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("no clipboard is available on this platform")]
    PlatformUnsupported,

    #[error("clipboard write failed")]
    WriteFailed,
}
