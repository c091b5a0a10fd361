//! Best-effort WebP normalization for uploaded images.
//!
//! Conversion is an optimization, never a requirement: anything that goes
//! wrong resolves to the original, unconverted file so an upload is never
//! blocked. Dimensions are preserved; no cropping, resizing, or EXIF
//! handling.

use chrono::Utc;
use gateway::StoredFile;

pub const DEFAULT_QUALITY: f32 = 0.8;

/// Re-encode `file` as lossy WebP at `quality` in `[0.0, 1.0]`.
///
/// Non-image files pass through unchanged. Decode or encode failures fall
/// back to the original file silently.
pub fn convert_to_webp(file: &StoredFile, quality: f32) -> StoredFile {
    if !file.is_image() {
        return file.clone();
    }

    match try_convert(file, quality) {
        Ok(converted) => converted,
        Err(e) => {
            tracing::debug!(
                name = %file.name,
                error = %e,
                "webp conversion failed, keeping original file"
            );
            file.clone()
        }
    }
}

fn try_convert(file: &StoredFile, quality: f32) -> Result<StoredFile, image::ImageError> {
    let img = image::load_from_memory(&file.bytes)?;
    let (width, height) = (img.width(), img.height());
    let rgba = img.to_rgba8();

    let quality = quality.clamp(0.0, 1.0) * 100.0;
    let encoded = webp::Encoder::from_rgba(&rgba, width, height).encode(quality);

    Ok(StoredFile {
        name: webp_name(&file.name),
        content_type: "image/webp".to_string(),
        bytes: encoded.to_vec(),
        last_modified: Utc::now(),
    })
}

/// Same base name, `.webp` extension.
fn webp_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((base, _)) if !base.is_empty() => format!("{base}.webp"),
        _ => format!("{name}.webp"),
    }
}
