use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::{IconRecord, ImageRecord, PictureSource, ResolvedSource};
use crate::page::PageSnapshot;
use crate::resolver::{compute_base_url, resolve_source};
use crate::srcset::parse_srcset;

// ── Selectors ────────────────────────────────────────────────────────────────

static MEDIA_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("picture, img").unwrap());

static SOURCE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("source").unwrap());

static HEAD_LINK_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("head > link[rel]").unwrap());

// ── Public result type ───────────────────────────────────────────────────────

pub struct Insights {
    pub base_url: Url,
    pub images: Vec<ImageRecord>,
    pub icons: Vec<IconRecord>,
}

// ── Public API ───────────────────────────────────────────────────────────────

pub fn collect_insights(page: &PageSnapshot) -> Insights {
    let base_url = compute_base_url(page.document(), page.location());
    let images = page_images(page, &base_url);
    let icons = icons_in(page.document(), &base_url);

    Insights {
        base_url,
        images,
        icons,
    }
}

/// Images of the top document followed by those of every accessible frame,
/// in frame index order.
pub fn collect_all_images(page: &PageSnapshot) -> Vec<ImageRecord> {
    let base_url = compute_base_url(page.document(), page.location());
    page_images(page, &base_url)
}

/// Icons declared by `<link>` elements in the head of the top document.
pub fn collect_icons(page: &PageSnapshot) -> Vec<IconRecord> {
    let base_url = compute_base_url(page.document(), page.location());
    icons_in(page.document(), &base_url)
}

/// Images of a single document, in document order.
///
/// An `<img>` inside a `<picture>` is reported once, through the picture,
/// together with the candidates of the picture's `<source>` elements.
pub fn collect_images_in(document: &Html, base_url: &Url) -> Vec<ImageRecord> {
    let mut images = Vec::new();

    for el in document.select(&MEDIA_SEL) {
        match el.value().name() {
            "picture" => collect_picture(el, base_url, &mut images),
            "img" => {
                if parent_name(el) == Some("picture") {
                    continue;
                }
                let src = trimmed_attr(el, "src");
                match resolve_source(&src, base_url) {
                    Ok(resolved) => images.push(image_record(el, resolved, None)),
                    Err(e) => tracing::debug!(error = %e, "skipping image"),
                }
            }
            _ => {}
        }
    }

    images
}

// ── Frames ───────────────────────────────────────────────────────────────────

/// Frame documents resolve against the top document's base URL.
fn page_images(page: &PageSnapshot, base_url: &Url) -> Vec<ImageRecord> {
    let mut images = collect_images_in(page.document(), base_url);
    for index in 0..page.frame_count() {
        match page.frame_document(index) {
            Ok(document) => images.extend(collect_images_in(document, base_url)),
            Err(e) => tracing::debug!(error = %e, "frame contributes no images"),
        }
    }
    images
}

// ── Element-specific handlers ────────────────────────────────────────────────

fn collect_picture(picture: ElementRef<'_>, base_url: &Url, images: &mut Vec<ImageRecord>) {
    let mut pictures = Vec::new();

    for source in picture.select(&SOURCE_SEL) {
        let srcset = trimmed_attr(source, "srcset");
        for candidate in parse_srcset(&srcset) {
            pictures.push(PictureSource {
                src: resolve_source(candidate.url, base_url).ok(),
                size: candidate.descriptor.to_string(),
            });
        }
    }

    let inner_images = picture
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "img");

    for img in inner_images {
        let src = trimmed_attr(img, "src");
        match resolve_source(&src, base_url) {
            Ok(resolved) => images.push(image_record(img, resolved, Some(pictures.clone()))),
            Err(e) => tracing::debug!(error = %e, "skipping picture image"),
        }
    }
}

fn icons_in(document: &Html, base_url: &Url) -> Vec<IconRecord> {
    document
        .select(&HEAD_LINK_SEL)
        .filter(|link| link.value().attr("rel").is_some_and(|rel| rel.contains("icon")))
        .filter_map(|link| {
            let href = trimmed_attr(link, "href");
            let resolved = match resolve_source(&href, base_url) {
                Ok(resolved) => resolved,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping icon");
                    return None;
                }
            };
            Some(IconRecord {
                href,
                filename: resolved.filename,
                sizes: trimmed_attr(link, "sizes"),
                source: resolved.source,
                kind: trimmed_attr(link, "type"),
            })
        })
        .collect()
}

fn image_record(
    img: ElementRef<'_>,
    resolved: ResolvedSource,
    pictures: Option<Vec<PictureSource>>,
) -> ImageRecord {
    ImageRecord {
        alt: trimmed_attr(img, "alt"),
        filename: resolved.filename,
        src: trimmed_attr(img, "src"),
        source: resolved.source,
        title: trimmed_attr(img, "title"),
        pictures,
    }
}

// ── DOM utility helpers ──────────────────────────────────────────────────────

/// Attribute value trimmed, or empty when the attribute is missing.
fn trimmed_attr(el: ElementRef<'_>, name: &str) -> String {
    el.value().attr(name).unwrap_or("").trim().to_string()
}

fn parent_name<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    el.parent()
        .and_then(ElementRef::wrap)
        .map(|parent| parent.value().name())
}
