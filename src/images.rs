//! Fallback top image: the largest usable image on the page.
//!
//! Dimensions come from declared `width`/`height` attributes when present,
//! otherwise from the first bytes of the image (PNG, GIF and JPEG headers).

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use dom_query::Selection;

use crate::article::Article;
use crate::config::Configuration;
use crate::dom;
use crate::error::{Error, Result};
use crate::network::Fetcher;
use crate::patterns::IMAGE_NOISE;
use crate::urls;

/// Bytes fetched per probe; enough for JPEG frame headers after EXIF blocks.
const PROBE_BYTES: usize = 64 * 1024;

/// Wider (or taller) than this ratio is a banner or a spacer.
const MAX_ASPECT_RATIO: f64 = 5.0;

/// Picks a top image when the page declares none.
pub trait ImageScraper: Send + Sync {
    fn largest_image_url(&self, article: &Article) -> Result<String>;
}

/// Candidate image with declared dimensions, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    url: String,
    declared: Option<(u32, u32)>,
}

pub struct StandardImageScraper {
    fetcher: Arc<dyn Fetcher>,
    timeout: Duration,
    max_probes: usize,
    min_area: u64,
    enabled: bool,
}

impl StandardImageScraper {
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &Configuration) -> Self {
        Self {
            fetcher,
            timeout: config.request_timeout(),
            max_probes: config.max_image_probes,
            min_area: config.min_image_area,
            enabled: config.fetch_images,
        }
    }

    fn area(&self, candidate: &Candidate, probes: &mut usize) -> Option<u64> {
        if let Some((w, h)) = candidate.declared {
            return Some(u64::from(w) * u64::from(h)).filter(|_| acceptable_shape(w, h));
        }
        if *probes >= self.max_probes {
            return None;
        }
        *probes += 1;

        let bytes = match self.fetcher.get_bytes(&candidate.url, self.timeout, PROBE_BYTES) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(url = %candidate.url, error = %e, "image probe failed");
                return None;
            }
        };
        let (w, h) = image_dimensions(&bytes)?;
        acceptable_shape(w, h).then(|| u64::from(w) * u64::from(h))
    }
}

impl std::fmt::Debug for StandardImageScraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardImageScraper")
            .field("max_probes", &self.max_probes)
            .field("min_area", &self.min_area)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl ImageScraper for StandardImageScraper {
    fn largest_image_url(&self, article: &Article) -> Result<String> {
        if !self.enabled {
            return Err(Error::Image("image fetching disabled".to_string()));
        }

        let mut roots: Vec<Selection> = Vec::new();
        if let Some(top) = article.top_node() {
            roots.push(dom::top_element(top));
        }
        if let Some(raw) = article.raw_doc() {
            roots.push(raw.select("body"));
        }
        let candidates = collect_candidates(&roots, article.url());
        if candidates.is_empty() {
            return Err(Error::Image("no image candidates".to_string()));
        }

        let mut probes = 0;
        let mut best: Option<(&Candidate, u64)> = None;
        for candidate in &candidates {
            let Some(area) = self.area(candidate, &mut probes) else {
                continue;
            };
            if area < self.min_area {
                continue;
            }
            if best.is_none_or(|(_, top)| area > top) {
                best = Some((candidate, area));
            }
        }

        best.map(|(c, _)| c.url.clone())
            .ok_or_else(|| Error::Image(format!("no usable image among {} candidates", candidates.len())))
    }
}

fn acceptable_shape(width: u32, height: u32) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    let (long, short) = if width > height { (width, height) } else { (height, width) };
    f64::from(long) / f64::from(short) <= MAX_ASPECT_RATIO
}

fn declared_dimensions(img: &Selection) -> Option<(u32, u32)> {
    let parse = |name: &str| {
        dom::get_attribute(img, name).and_then(|v| v.trim().trim_end_matches("px").parse::<u32>().ok())
    };
    Some((parse("width")?, parse("height")?))
}

/// `img[src]` under each root, resolved, de-duplicated, noise URLs dropped.
fn collect_candidates(roots: &[Selection], base_url: &str) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for root in roots {
        for node in root.select("img[src]").nodes() {
            let img = Selection::from(*node);
            let Some(src) = dom::non_empty_attribute(&img, "src") else {
                continue;
            };
            let url = urls::resolve(base_url, &src);
            if !url.starts_with("http") || IMAGE_NOISE.is_match(&url) || !seen.insert(url.clone()) {
                continue;
            }
            out.push(Candidate {
                url,
                declared: declared_dimensions(&img),
            });
        }
    }
    out
}

/// Width and height from PNG, GIF or JPEG header bytes.
#[must_use]
pub fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() >= 24 && bytes.starts_with(b"\x89PNG\r\n\x1a\n") && &bytes[12..16] == b"IHDR" {
        let w = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let h = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        return Some((w, h));
    }

    if bytes.len() >= 10 && (bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a")) {
        let w = u16::from_le_bytes([bytes[6], bytes[7]]);
        let h = u16::from_le_bytes([bytes[8], bytes[9]]);
        return Some((u32::from(w), u32::from(h)));
    }

    if bytes.starts_with(&[0xFF, 0xD8]) {
        return jpeg_dimensions(bytes);
    }

    None
}

/// Walk JPEG segments up to the first start-of-frame marker.
fn jpeg_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let mut i = 2;
    while i + 4 <= bytes.len() {
        if bytes[i] != 0xFF {
            return None;
        }
        let marker = bytes[i + 1];
        // fill bytes
        if marker == 0xFF {
            i += 1;
            continue;
        }
        // standalone markers carry no length
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }

        let len = usize::from(u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]));
        let is_sof = (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            if i + 9 > bytes.len() {
                return None;
            }
            let h = u16::from_be_bytes([bytes[i + 5], bytes[i + 6]]);
            let w = u16::from_be_bytes([bytes[i + 7], bytes[i + 8]]);
            return Some((u32::from(w), u32::from(h)));
        }
        if len < 2 {
            return None;
        }
        i += 2 + len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR".to_vec();
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    fn jpeg(width: u16, height: u16) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8];
        // APP0 segment with 14 bytes of payload
        bytes.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        bytes.extend_from_slice(&[0u8; 14]);
        // SOF0: length, precision, height, width
        bytes.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&[0x03, 0x01, 0x22, 0x00]);
        bytes
    }

    #[test]
    fn test_png_dimensions() {
        assert_eq!(image_dimensions(&png(640, 480)), Some((640, 480)));
    }

    #[test]
    fn test_gif_dimensions() {
        let mut gif = b"GIF89a".to_vec();
        gif.extend_from_slice(&300u16.to_le_bytes());
        gif.extend_from_slice(&200u16.to_le_bytes());
        assert_eq!(image_dimensions(&gif), Some((300, 200)));
    }

    #[test]
    fn test_jpeg_dimensions() {
        assert_eq!(image_dimensions(&jpeg(1024, 768)), Some((1024, 768)));
    }

    #[test]
    fn test_unknown_format() {
        assert_eq!(image_dimensions(b"RIFF....WEBPVP8 "), None);
        assert_eq!(image_dimensions(&[0xFF, 0xD8, 0x00]), None);
    }

    #[test]
    fn test_shape_filter() {
        assert!(acceptable_shape(800, 600));
        assert!(!acceptable_shape(1200, 100));
        assert!(!acceptable_shape(0, 100));
    }

    #[test]
    fn test_candidates_skip_noise_and_duplicates() {
        let doc = dom::parse(
            r#"<body><img src="/photo.jpg" width="800" height="600">
            <img src="/static/logo.png"><img src="/photo.jpg"><img src="data:image/gif;base64,R0l"></body>"#,
        );
        let roots = vec![doc.select("body")];
        let candidates = collect_candidates(&roots, "https://example.com/story");

        assert_eq!(
            candidates,
            vec![Candidate {
                url: "https://example.com/photo.jpg".to_string(),
                declared: Some((800, 600)),
            }]
        );
    }
}
