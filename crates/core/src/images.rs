//! CDN image URL transformation.
//!
//! Product and popup images are plain URLs. Assets served through the image
//! CDN accept transformation directives as an extra path segment after the
//! `upload` marker (`.../upload/f_auto,q_auto,w_800/...`), which is how the
//! storefront requests responsive variants. This is purely a string
//! transform - no network calls.

use url::Url;

/// Path segment after which directives are inserted.
const UPLOAD_MARKER: &str = "upload";

/// Requested delivery transformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTransform {
    /// Target width in pixels.
    pub width: Option<u32>,
    /// Crop mode applied alongside the width.
    pub crop: Option<CropMode>,
    /// Let the CDN negotiate format (`f_auto`).
    pub auto_format: bool,
    /// Let the CDN pick quality (`q_auto`).
    pub auto_quality: bool,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            width: None,
            crop: None,
            auto_format: true,
            auto_quality: true,
        }
    }
}

impl ImageTransform {
    /// The default responsive transform for a display width.
    #[must_use]
    pub const fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            crop: None,
            auto_format: true,
            auto_quality: true,
        }
    }

    /// Render the comma-separated directive segment, e.g. `f_auto,q_auto,w_800`.
    #[must_use]
    pub fn directives(&self) -> String {
        let mut parts = Vec::new();
        if self.auto_format {
            parts.push("f_auto".to_owned());
        }
        if self.auto_quality {
            parts.push("q_auto".to_owned());
        }
        if let Some(width) = self.width {
            parts.push(format!("w_{width}"));
        }
        if let Some(crop) = self.crop {
            parts.push(format!("c_{}", crop.as_str()));
        }
        parts.join(",")
    }
}

/// Crop modes the CDN understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    Fill,
    Fit,
    Thumb,
}

impl CropMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Fit => "fit",
            Self::Thumb => "thumb",
        }
    }
}

/// Insert transformation directives into a CDN asset URL.
///
/// Returns the URL unchanged when it is relative, unparsable, has no
/// `upload` path segment, or the transform renders no directives - callers
/// can pass any image URL through this safely.
#[must_use]
pub fn transform_url(url: &str, transform: &ImageTransform) -> String {
    let directives = transform.directives();
    if directives.is_empty() {
        return url.to_owned();
    }

    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_owned();
    };

    let Some(segments) = parsed.path_segments() else {
        return url.to_owned();
    };
    let mut segments: Vec<String> = segments.map(str::to_owned).collect();

    let Some(marker_pos) = segments.iter().position(|s| s == UPLOAD_MARKER) else {
        return url.to_owned();
    };

    segments.insert(marker_pos + 1, directives);
    parsed.set_path(&segments.join("/"));
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASSET: &str = "https://images.fernwaygoods.com/shop/upload/v42/mugs/juniper.jpg";

    #[test]
    fn test_inserts_directives_after_upload() {
        let out = transform_url(ASSET, &ImageTransform::width(800));
        assert_eq!(
            out,
            "https://images.fernwaygoods.com/shop/upload/f_auto,q_auto,w_800/v42/mugs/juniper.jpg"
        );
    }

    #[test]
    fn test_includes_crop_mode() {
        let transform = ImageTransform {
            width: Some(400),
            crop: Some(CropMode::Fill),
            ..ImageTransform::default()
        };
        let out = transform_url(ASSET, &transform);
        assert!(out.contains("/upload/f_auto,q_auto,w_400,c_fill/"));
    }

    #[test]
    fn test_non_cdn_url_passes_through() {
        let url = "https://example.com/photos/juniper.jpg";
        assert_eq!(transform_url(url, &ImageTransform::width(800)), url);
    }

    #[test]
    fn test_relative_url_passes_through() {
        let url = "/static/placeholder.png";
        assert_eq!(transform_url(url, &ImageTransform::width(800)), url);
    }

    #[test]
    fn test_empty_transform_passes_through() {
        let transform = ImageTransform {
            width: None,
            crop: None,
            auto_format: false,
            auto_quality: false,
        };
        assert_eq!(transform_url(ASSET, &transform), ASSET);
    }
}
