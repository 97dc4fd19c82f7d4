//! HTTP surface for the transfer coordinator
//!
//! Routes mirror the web client: multipart upload to publish, a drop route
//! to claim, and static serving of stored artifacts. The gesture pipeline
//! and its cooldown loop live entirely in the client; this side only answers
//! single attempts.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
};
use grabdrop_core::{TransferCoordinator, TransferError};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::responses::{ApiResponse, error_response};

/// Maximum accepted upload size (10 MB)
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Handler for the root route - greeting/health line
async fn root_handler() -> &'static str {
    "Grab & Drop transfer server"
}

/// Handler for unknown routes
async fn not_found_handler() -> (StatusCode, Json<ApiResponse>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::fail("not found")))
}

/// POST /upload - publish an image for the sender named in the form
///
/// Expects a multipart form with an `image` file field and a `userId` text
/// field, in any order.
async fn upload_handler(
    State(coordinator): State<Arc<TransferCoordinator>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<ApiResponse>) {
    let mut user_id = String::new();
    let mut image: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Malformed multipart upload: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::fail("malformed multipart body")),
                );
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "userId" => {
                user_id = field.text().await.unwrap_or_default();
            }
            "image" => {
                let file_name = field.file_name().unwrap_or("upload.bin").to_string();
                match field.bytes().await {
                    Ok(bytes) => image = Some((file_name, bytes.to_vec())),
                    Err(e) => {
                        tracing::warn!("Failed to read image field: {}", e);
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ApiResponse::fail("malformed multipart body")),
                        );
                    }
                }
            }
            _ => {}
        }
    }

    let Some((file_name, bytes)) = image else {
        return error_response(TransferError::MissingArtifact);
    };

    match coordinator.publish(&user_id, &file_name, &bytes).await {
        Ok(locator) => (
            StatusCode::OK,
            Json(ApiResponse::ok("image published", Some(locator))),
        ),
        Err(e) => error_response(e),
    }
}

/// GET /drop/{user_id} - claim the pending artifact for this receiver
async fn drop_handler(
    State(coordinator): State<Arc<TransferCoordinator>>,
    Path(user_id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    match coordinator.claim(&user_id).await {
        Ok(locator) => (
            StatusCode::OK,
            Json(ApiResponse::ok("image delivered", Some(locator))),
        ),
        Err(e) => error_response(e),
    }
}

/// Build the axum router over a shared coordinator.
///
/// `uploads_dir` is the directory the coordinator's storage writes to; it is
/// exposed read-only under /uploads so claimed locators resolve to bytes.
pub fn create_router(
    coordinator: Arc<TransferCoordinator>,
    uploads_dir: &std::path::Path,
) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/upload", post(upload_handler))
        .route("/drop/{user_id}", get(drop_handler))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // The web client is served from a different origin, as upstream
        .layer(CorsLayer::permissive())
        .with_state(coordinator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use grabdrop_core::{FriendGraph, UploadStorage};
    use serde_json::Value;
    use std::path::PathBuf;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_router() -> (Router, PathBuf) {
        let dir = std::env::temp_dir().join(format!("grabdrop_http_{}", Uuid::new_v4()));
        let mut friends = FriendGraph::new();
        friends.add_pair("user1", "user2");
        let coordinator = Arc::new(TransferCoordinator::new(
            friends,
            UploadStorage::new(&dir),
        ));
        (create_router(coordinator, &dir), dir)
    }

    fn multipart_upload(user_id: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
        let boundary = "grabdrop_test_boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"userId\"\r\n\r\n{user_id}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let (router, dir) = test_router();

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_upload_then_drop_round_trip() {
        let (router, dir) = test_router();

        let response = router
            .clone()
            .oneshot(multipart_upload("user1", "x.png", b"pngdata"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        let published = body["data"]["imagePath"].as_str().unwrap().to_string();
        assert!(published.starts_with("/uploads/"));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/drop/user2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["imagePath"], published.as_str());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_drop_with_nothing_pending() {
        let (router, dir) = test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/drop/user2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        // Polling miss: still a 200, the envelope says not yet
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_drop_without_configured_friend() {
        let (router, dir) = test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/drop/stranger")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_upload_without_user_id_is_rejected() {
        let (router, dir) = test_router();

        let response = router
            .oneshot(multipart_upload("", "x.png", b"pngdata"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_unknown_route_gets_envelope_404() {
        let (router, dir) = test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_claimed_locator_is_served_statically() {
        let (router, dir) = test_router();

        let response = router
            .clone()
            .oneshot(multipart_upload("user1", "x.png", b"pngdata"))
            .await
            .unwrap();
        let body = json_body(response).await;
        let locator = body["data"]["imagePath"].as_str().unwrap().to_string();

        let response = router
            .oneshot(
                Request::builder()
                    .uri(locator.as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"pngdata");

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
