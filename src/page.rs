//! Captured browsing context: location, top document and frames.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use crate::models::FrameSnapshot;

static FRAME_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("iframe, frame").unwrap());

// ── Error types ──────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameAccessError {
    #[error("frame {index} is not accessible from the top document")]
    Denied { index: usize },
    #[error("no frame at index {index}")]
    OutOfRange { index: usize },
}

// ── Snapshot ─────────────────────────────────────────────────────────────────

pub enum Frame {
    Loaded(Html),
    /// Cross-origin, or content that was never captured.
    Denied,
}

impl From<FrameSnapshot> for Frame {
    fn from(snapshot: FrameSnapshot) -> Self {
        match snapshot {
            FrameSnapshot::Loaded { html } => Frame::Loaded(Html::parse_document(&html)),
            FrameSnapshot::Denied => Frame::Denied,
        }
    }
}

pub struct PageSnapshot {
    location: Url,
    document: Html,
    frames: Vec<Frame>,
}

impl PageSnapshot {
    /// Parses the page and discovers its frames from `iframe`/`frame`
    /// elements. Only `srcdoc` frames carry their document inline; the rest
    /// are recorded as denied.
    pub fn parse(url: &str, html: &str) -> Result<Self, SnapshotError> {
        let location = Url::parse(url).map_err(|e| SnapshotError::InvalidUrl(e.to_string()))?;
        let document = Html::parse_document(html);

        let frames = document
            .select(&FRAME_SEL)
            .map(|el| match el.value().attr("srcdoc") {
                Some(srcdoc) => Frame::Loaded(Html::parse_document(srcdoc)),
                None => Frame::Denied,
            })
            .collect();

        Ok(Self {
            location,
            document,
            frames,
        })
    }

    /// Replaces the discovered frames with captured ones, in frame index order.
    pub fn with_frames(mut self, frames: Vec<Frame>) -> Self {
        self.frames = frames;
        self
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_document(&self, index: usize) -> Result<&Html, FrameAccessError> {
        match self.frames.get(index) {
            Some(Frame::Loaded(document)) => Ok(document),
            Some(Frame::Denied) => Err(FrameAccessError::Denied { index }),
            None => Err(FrameAccessError::OutOfRange { index }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_location_is_rejected() {
        let err = PageSnapshot::parse("not a url", "<p></p>").err().unwrap();
        assert!(matches!(err, SnapshotError::InvalidUrl(_)));
    }

    #[test]
    fn frames_are_discovered_in_document_order() {
        let page = PageSnapshot::parse(
            "https://example.com/",
            r#"<body>
                <iframe src="https://ads.example.net/slot"></iframe>
                <iframe srcdoc="<p>inline</p>"></iframe>
            </body>"#,
        )
        .unwrap();

        assert_eq!(page.frame_count(), 2);
        assert_eq!(
            page.frame_document(0).err(),
            Some(FrameAccessError::Denied { index: 0 })
        );
        assert!(page.frame_document(1).is_ok());
        assert_eq!(
            page.frame_document(2).err(),
            Some(FrameAccessError::OutOfRange { index: 2 })
        );
    }

    #[test]
    fn captured_frames_replace_discovered_ones() {
        let page = PageSnapshot::parse(
            "https://example.com/",
            r#"<iframe src="https://other.example/"></iframe>"#,
        )
        .unwrap()
        .with_frames(vec![
            Frame::from(FrameSnapshot::Loaded {
                html: "<p>captured</p>".to_string(),
            }),
            Frame::Denied,
        ]);

        assert_eq!(page.frame_count(), 2);
        assert!(page.frame_document(0).is_ok());
        assert!(page.frame_document(1).is_err());
    }
}
