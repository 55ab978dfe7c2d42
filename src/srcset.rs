//! Splitting of `srcset` attributes into URL/descriptor candidates.
//!
//! Candidate URLs may contain commas, so a comma only separates two
//! candidates when it directly follows a width token (`640w`) or a
//! whitespace-led density token (` 2x`, ` 1.5x`). Inside a candidate, the
//! URL ends at the last whitespace that precedes a descriptor.

use once_cell::sync::Lazy;
use regex::Regex;

static CANDIDATE_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\dw,|\s\d+(?:\.\d+)?x,").unwrap());

static DESCRIPTOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s\d+(?:\.\d+)?[wx](?:\s|$)").unwrap());

/// One entry of a source set, both halves trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub url: &'a str,
    /// Raw descriptor text, empty when the candidate has none.
    pub descriptor: &'a str,
}

pub fn parse_srcset(srcset: &str) -> Vec<Candidate<'_>> {
    let candidates: Vec<Candidate<'_>> = split_candidates(srcset)
        .into_iter()
        .map(split_descriptor)
        .collect();

    let has_descriptor = candidates.iter().any(|c| !c.descriptor.is_empty());
    if has_descriptor && !candidates.iter().any(|c| c.descriptor.ends_with('w')) {
        tracing::debug!(srcset, "source set uses density descriptors only");
    }

    candidates
}

/// Splits on commas that close a descriptor token. Empty pieces are kept so
/// an empty `srcset` or a trailing comma still yields a candidate.
pub fn split_candidates(srcset: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for m in CANDIDATE_BOUNDARY_RE.find_iter(srcset) {
        let comma = m.end() - 1;
        pieces.push(&srcset[start..comma]);
        start = m.end();
    }
    pieces.push(&srcset[start..]);

    pieces.into_iter().map(str::trim).collect()
}

pub fn split_descriptor(candidate: &str) -> Candidate<'_> {
    match DESCRIPTOR_RE.find_iter(candidate).last() {
        Some(m) => Candidate {
            url: candidate[..m.start()].trim(),
            descriptor: candidate[m.start()..].trim(),
        },
        None => Candidate {
            url: candidate.trim(),
            descriptor: "",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_boundary_keeps_commas_inside_urls() {
        let pieces = split_candidates("/img/a,b.jpg 480w, /img/c.jpg 960w");
        assert_eq!(pieces, vec!["/img/a,b.jpg 480w", "/img/c.jpg 960w"]);
    }

    #[test]
    fn density_descriptors_split_into_two() {
        let pieces = split_candidates("a.jpg 1x, b.jpg 2x");
        assert_eq!(pieces, vec!["a.jpg 1x", "b.jpg 2x"]);
    }

    #[test]
    fn data_uri_candidate_is_not_split() {
        let srcset = "data:image/gif;base64,R0lGODlhAQABAAAAACw= 1w, big.gif 800w";
        let pieces = split_candidates(srcset);
        assert_eq!(pieces.len(), 2);
        assert!(pieces[0].starts_with("data:image/gif;base64,R0lG"));
    }

    #[test]
    fn no_descriptor_yields_single_candidate() {
        assert_eq!(split_candidates("a.jpg, b.jpg"), vec!["a.jpg, b.jpg"]);
        assert_eq!(split_candidates("   "), vec![""]);
    }

    #[test]
    fn density_token_needs_leading_whitespace() {
        assert_eq!(split_candidates("hero@2x,v2.png 800w"), vec!["hero@2x,v2.png 800w"]);
        let parsed = parse_srcset("hero@2x,v2.png 800w");
        assert_eq!(
            parsed,
            vec![Candidate {
                url: "hero@2x,v2.png",
                descriptor: "800w"
            }]
        );
    }

    #[test]
    fn trailing_comma_leaves_empty_candidate() {
        assert_eq!(split_candidates("a.jpg 100w,"), vec!["a.jpg 100w", ""]);
        assert_eq!(
            split_descriptor(""),
            Candidate {
                url: "",
                descriptor: ""
            }
        );
    }

    #[test]
    fn density_only_set_keeps_descriptors_verbatim() {
        let parsed = parse_srcset("icon.png 1x, icon@1.5.png 1.5x, icon@2.png 2x");
        let urls: Vec<&str> = parsed.iter().map(|c| c.url).collect();
        let sizes: Vec<&str> = parsed.iter().map(|c| c.descriptor).collect();
        assert_eq!(urls, vec!["icon.png", "icon@1.5.png", "icon@2.png"]);
        assert_eq!(sizes, vec!["1x", "1.5x", "2x"]);
        assert!(!sizes.iter().any(|s| s.ends_with('w')));
    }

    #[test]
    fn descriptor_is_separated_from_url() {
        assert_eq!(
            split_descriptor("photos/cat 1.jpg 1200w"),
            Candidate {
                url: "photos/cat 1.jpg",
                descriptor: "1200w"
            }
        );
        assert_eq!(
            split_descriptor("retina.png 1.5x"),
            Candidate {
                url: "retina.png",
                descriptor: "1.5x"
            }
        );
    }

    #[test]
    fn missing_descriptor_is_empty() {
        assert_eq!(
            split_descriptor("hero.jpg"),
            Candidate {
                url: "hero.jpg",
                descriptor: ""
            }
        );
        // "800wide" is not a descriptor token.
        assert_eq!(split_descriptor("a.jpg 800wide").descriptor, "");
    }

    #[test]
    fn parse_srcset_pairs_urls_and_descriptors() {
        let parsed = parse_srcset("s.jpg 320w, m.jpg 640w,l.jpg 1280w");
        let urls: Vec<&str> = parsed.iter().map(|c| c.url).collect();
        let sizes: Vec<&str> = parsed.iter().map(|c| c.descriptor).collect();
        assert_eq!(urls, vec!["s.jpg", "m.jpg", "l.jpg"]);
        assert_eq!(sizes, vec!["320w", "640w", "1280w"]);
    }
}
