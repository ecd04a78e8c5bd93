use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeFormat {
    Jpeg,
    WebP,
    Png,
}

impl EncodeFormat {
    fn matches(self, format: ImageFormat) -> bool {
        matches!(
            (self, format),
            (EncodeFormat::Jpeg, ImageFormat::Jpeg)
                | (EncodeFormat::WebP, ImageFormat::WebP)
                | (EncodeFormat::Png, ImageFormat::Png)
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    pub max_dimension: u32,
    pub format: EncodeFormat,
    pub quality: f32,
}

pub const AVATAR: NormalizeOptions = NormalizeOptions {
    max_dimension: 256,
    format: EncodeFormat::WebP,
    quality: 0.9,
};

/// Inline photo shown in the chat view.
pub const PHOTO: NormalizeOptions = NormalizeOptions {
    max_dimension: 1200,
    format: EncodeFormat::Jpeg,
    quality: 0.9,
};

/// Decorative standee figure. WebP keeps its transparency.
pub const STANDEE: NormalizeOptions = NormalizeOptions {
    max_dimension: 512,
    format: EncodeFormat::WebP,
    quality: 0.92,
};

/// Wallpapers and chat backgrounds share the same bound.
pub const WALLPAPER: NormalizeOptions = NormalizeOptions {
    max_dimension: 1600,
    format: EncodeFormat::Jpeg,
    quality: 0.85,
};

/// Rescales uploaded image bytes to fit `max_dimension` (never upscaling)
/// and re-encodes them. Every failure path returns the original bytes
/// unchanged: uploads must degrade, not error.
pub fn normalize(bytes: &[u8], opts: &NormalizeOptions) -> Vec<u8> {
    let img = match image::load_from_memory(bytes) {
        Ok(img) => img,
        Err(e) => {
            tracing::debug!("image decode failed, passing bytes through: {}", e);
            return bytes.to_vec();
        }
    };
    let (width, height) = (img.width(), img.height());
    let largest = width.max(height).max(1);
    let scale = (opts.max_dimension as f64 / largest as f64).min(1.0);

    if scale >= 1.0 {
        if let Ok(format) = image::guess_format(bytes) {
            if opts.format.matches(format) {
                // already within bounds and in the target container
                return bytes.to_vec();
            }
        }
        return encode_or_passthrough(&img, opts, bytes);
    }

    let target_w = ((width as f64 * scale).round() as u32).max(1);
    let target_h = ((height as f64 * scale).round() as u32).max(1);
    let resized = img.resize_exact(target_w, target_h, FilterType::Triangle);
    encode_or_passthrough(&resized, opts, bytes)
}

fn encode_or_passthrough(img: &DynamicImage, opts: &NormalizeOptions, original: &[u8]) -> Vec<u8> {
    let encoded = encode(img, opts.format, opts.quality)
        .or_else(|| encode(img, EncodeFormat::Png, opts.quality));
    match encoded {
        Some(out) if !out.is_empty() => out,
        _ => original.to_vec(),
    }
}

fn encode(img: &DynamicImage, format: EncodeFormat, quality: f32) -> Option<Vec<u8>> {
    let mut out: Vec<u8> = Vec::new();
    let result = match format {
        EncodeFormat::Jpeg => {
            let q = (quality.clamp(0.0, 1.0) * 100.0).round() as u8;
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, q))
        }
        EncodeFormat::WebP => {
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_with_encoder(WebPEncoder::new_lossless(&mut out))
        }
        EncodeFormat::Png => img.write_with_encoder(PngEncoder::new(&mut out)),
    };
    match result {
        Ok(()) => Some(out),
        Err(e) => {
            tracing::debug!("image encode failed: {}", e);
            None
        }
    }
}

pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        "image/png"
    } else if bytes.starts_with(&[0x47, 0x49, 0x46]) {
        "image/gif"
    } else if bytes.len() > 12 && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    }
}

/// Builds the `data:` URL form the entity model stores for images.
pub fn to_data_url(bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        sniff_mime(bytes),
        general_purpose::STANDARD.encode(bytes)
    )
}
