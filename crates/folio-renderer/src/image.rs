//! Image presentation: dimensions, alt text and caption.

use serde_json::Value;

use crate::href::is_safe_href;
use crate::record::{get_number, get_string};

/// Width used when the asset does not carry a usable one.
pub const DEFAULT_IMAGE_WIDTH: u32 = 1600;

/// Height used when the asset does not carry a usable one.
pub const DEFAULT_IMAGE_HEIGHT: u32 = 900;

/// Alt text used when neither the image nor the caller supplies one.
pub const DEFAULT_IMAGE_ALT: &str = "Image";

/// Intrinsic image size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Accessible description plus the optional visible caption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAlt {
    pub alt: String,
    /// Only set when the image carries its own alt text.
    pub caption: Option<String>,
}

/// Everything needed to present an image node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedImage {
    pub url: String,
    pub dimensions: ImageDimensions,
    pub alt: ImageAlt,
}

/// Accept finite, strictly positive sizes, rounded to whole pixels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn dimension(raw: Option<f64>) -> Option<u32> {
    raw.filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.round().min(f64::from(u32::MAX)) as u32)
}

/// Resolve width and height independently, each with its own default.
///
/// # Examples
///
/// ```
/// use folio_renderer::{ImageDimensions, resolve_image_dimensions};
/// use serde_json::json;
///
/// let image = json!({"asset": {"width": 1200.7, "height": 800}});
/// assert_eq!(
///     resolve_image_dimensions(&image),
///     ImageDimensions { width: 1201, height: 800 }
/// );
///
/// let bare = json!({"asset": {}});
/// assert_eq!(
///     resolve_image_dimensions(&bare),
///     ImageDimensions { width: 1600, height: 900 }
/// );
/// ```
#[must_use]
pub fn resolve_image_dimensions(image: &Value) -> ImageDimensions {
    let asset = image.get("asset").unwrap_or(&Value::Null);
    ImageDimensions {
        width: dimension(get_number(asset, "width")).unwrap_or(DEFAULT_IMAGE_WIDTH),
        height: dimension(get_number(asset, "height")).unwrap_or(DEFAULT_IMAGE_HEIGHT),
    }
}

/// Resolve alt text: own alt, then `fallback`, then [`DEFAULT_IMAGE_ALT`].
///
/// The caption mirrors the image's own alt text only; a fallback alt is never
/// shown as a visible caption.
#[must_use]
pub fn resolve_image_alt(image: &Value, fallback: Option<&str>) -> ImageAlt {
    let own = get_string(image, "alt");
    let fallback = fallback.map(str::trim).filter(|alt| !alt.is_empty());
    ImageAlt {
        alt: own.or(fallback).unwrap_or(DEFAULT_IMAGE_ALT).to_owned(),
        caption: own.map(str::to_owned),
    }
}

/// The asset URL, when present and safe to put in `src`.
#[must_use]
pub fn image_url(image: &Value) -> Option<&str> {
    image
        .get("asset")
        .and_then(|asset| get_string(asset, "url"))
        .filter(|url| is_safe_href(url))
}

/// Resolve an image node, or `None` when it has no usable asset URL.
#[must_use]
pub fn resolve_image(image: &Value, fallback_alt: Option<&str>) -> Option<ResolvedImage> {
    Some(ResolvedImage {
        url: image_url(image)?.to_owned(),
        dimensions: resolve_image_dimensions(image),
        alt: resolve_image_alt(image, fallback_alt),
    })
}
