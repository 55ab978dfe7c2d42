use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::config::Config;
use crate::extract::{collect_all_images, collect_icons, collect_insights};
use crate::models::{IconsResponse, ImagesResponse, InsightsResponse, SnapshotRequest};
use crate::page::{Frame, PageSnapshot, SnapshotError};

pub fn router(config: &Config) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/images", post(images_endpoint))
        .route("/icons", post(icons_endpoint))
        .route("/insights", post(insights_endpoint))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn images_endpoint(Json(req): Json<SnapshotRequest>) -> Response {
    match load_page(req).map(|page| collect_all_images(&page)) {
        Ok(images) => {
            tracing::info!(images = images.len(), "collected images");
            (StatusCode::OK, Json(ImagesResponse { images })).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn icons_endpoint(Json(req): Json<SnapshotRequest>) -> Response {
    match load_page(req).map(|page| collect_icons(&page)) {
        Ok(icons) => {
            tracing::info!(icons = icons.len(), "collected icons");
            (StatusCode::OK, Json(IconsResponse { icons })).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn insights_endpoint(Json(req): Json<SnapshotRequest>) -> Response {
    match load_page(req).map(|page| collect_insights(&page)) {
        Ok(insights) => {
            tracing::info!(
                base_url = %insights.base_url,
                images = insights.images.len(),
                icons = insights.icons.len(),
                "collected insights"
            );
            let response = InsightsResponse {
                base_url: insights.base_url.to_string(),
                images: insights.images,
                icons: insights.icons,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

fn load_page(req: SnapshotRequest) -> Result<PageSnapshot, SnapshotError> {
    let page = PageSnapshot::parse(&req.url, &req.html)?;
    Ok(match req.frames {
        Some(frames) => page.with_frames(frames.into_iter().map(Frame::from).collect()),
        None => page,
    })
}

fn error_response(e: SnapshotError) -> Response {
    let (status, detail) = match &e {
        SnapshotError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, e.to_string()),
    };
    tracing::warn!(%detail, "rejected snapshot");
    (status, Json(json!({"detail": detail}))).into_response()
}
