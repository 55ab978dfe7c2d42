//! SEO insights over a captured page: images, responsive picture sets and
//! icons, with sources resolved against the page's base URL.

pub mod api;
pub mod config;
pub mod extract;
pub mod models;
pub mod page;
pub mod resolver;
pub mod srcset;

pub use extract::{collect_all_images, collect_icons, collect_images_in, collect_insights, Insights};
pub use page::{Frame, FrameAccessError, PageSnapshot, SnapshotError};
pub use resolver::{compute_base_url, effective_name, resolve_source, Unresolvable};
