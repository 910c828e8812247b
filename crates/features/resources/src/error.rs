use crate::model::ErrorBody;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use flip_json::CodecError;
use flip_kernel::store::StoreError;
use std::borrow::Cow;

#[flip_derive::flip_error]
pub enum ResourceError {
    #[error("Feature '{uid}' does not exist{}", format_context(.context))]
    NotFound { uid: String, context: Option<Cow<'static, str>> },

    #[error("Feature rendering failed{}: {source}", format_context(.context))]
    Codec { source: CodecError, context: Option<Cow<'static, str>> },

    #[error("Internal resource error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ResourceError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Codec { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ResourceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::FeatureNotFound { uid, context } => Self::NotFound { uid, context },
            StoreError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::NotFound { uid, .. } => {
                tracing::warn!(uid = %uid, "Requested feature does not exist");
                ErrorBody { error: format!("Feature '{uid}' does not exist"), uid: Some(uid) }
            },
            // Internal details stay in the log.
            other => {
                tracing::error!(error = %other, "Feature resource failed");
                ErrorBody { error: "Internal server error".to_owned(), uid: None }
            },
        };

        (status, Json(body)).into_response()
    }
}
