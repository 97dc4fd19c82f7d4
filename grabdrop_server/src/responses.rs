//! Uniform response envelope
//!
//! Every operation answers with `{ success, message, data? }`; a claim hit
//! carries the artifact locator in `data.imagePath`.

use axum::Json;
use axum::http::StatusCode;
use grabdrop_core::TransferError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ArtifactData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactData {
    pub image_path: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>, image_path: Option<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: image_path.map(|image_path| ArtifactData { image_path }),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Map a coordinator failure onto a status code and envelope.
pub fn error_response(err: TransferError) -> (StatusCode, Json<ApiResponse>) {
    let status = match &err {
        TransferError::MissingSenderId
        | TransferError::MissingReceiverId
        | TransferError::MissingArtifact => StatusCode::BAD_REQUEST,
        // Configuration gap: this receiver has no declared relation
        TransferError::NoCounterpart(_) => StatusCode::NOT_FOUND,
        // Normal polling outcome, not an error
        TransferError::NothingPending(_) => StatusCode::OK,
        TransferError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    match &err {
        TransferError::Storage(e) => tracing::error!("Artifact storage failed: {}", e),
        TransferError::NothingPending(sender) => {
            tracing::debug!("Nothing pending from {}", sender)
        }
        other => tracing::warn!("Request rejected: {}", other),
    }

    (status, Json(ApiResponse::fail(err.to_string())))
}
