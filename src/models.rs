use serde::{Deserialize, Serialize};

// ── Records ──────────────────────────────────────────────────────────────────

/// Filename and absolute URL of a resolved image or icon source.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub filename: String,
    pub source: String,
}

/// One candidate of a `<source srcset>`, paired with its raw descriptor.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PictureSource {
    pub src: Option<ResolvedSource>,
    pub size: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub alt: String,
    pub filename: String,
    pub src: String,
    pub source: String,
    pub title: String,
    /// Present only for images found inside a `<picture>` element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pictures: Option<Vec<PictureSource>>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct IconRecord {
    pub href: String,
    pub filename: String,
    pub sizes: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
}

// ── HTTP payloads ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SnapshotRequest {
    pub url: String,
    pub html: String,
    /// Captured frames in `window.frames` order. When omitted, frames are
    /// discovered from the `iframe`/`frame` elements of `html`.
    #[serde(default)]
    pub frames: Option<Vec<FrameSnapshot>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FrameSnapshot {
    Loaded { html: String },
    Denied,
}

#[derive(Debug, Serialize)]
pub struct ImagesResponse {
    pub images: Vec<ImageRecord>,
}

#[derive(Debug, Serialize)]
pub struct IconsResponse {
    pub icons: Vec<IconRecord>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub base_url: String,
    pub images: Vec<ImageRecord>,
    pub icons: Vec<IconRecord>,
}
