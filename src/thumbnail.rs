use anyhow::{Context, Result};
use fast_image_resize::{images::Image, ResizeOptions, Resizer};
use image::{DynamicImage, RgbaImage};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

// Bounding box for grid cards
pub const THUMB_WIDTH: u32 = 160;
pub const THUMB_HEIGHT: u32 = 90;

// JPEG quality (0-100) - 92 is high quality with good compression
const JPEG_QUALITY: u8 = 92;
const UNSHARP_SIGMA: f32 = 0.5;
const UNSHARP_THRESHOLD: i32 = 1;

/// Disk cache of downscaled images, keyed by the SHA-256 of the source path.
#[derive(Debug, Clone)]
pub struct ThumbnailCache {
    cache_dir: PathBuf,
}

impl ThumbnailCache {
    pub fn new(cache_dir: PathBuf) -> Self {
        if let Err(err) = fs::create_dir_all(&cache_dir) {
            debug!(dir = %cache_dir.display(), %err, "could not create thumbnail dir");
        }
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Deterministic cache location for a source image
    pub fn thumbnail_path(&self, source_path: &Path) -> PathBuf {
        let digest = Sha256::digest(source_path.to_string_lossy().as_bytes());
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        self.cache_dir.join(format!("{hex}.jpg"))
    }

    /// Return a displayable file for `source_path`: the cached thumbnail when
    /// fresh or freshly generated, otherwise the source itself.
    pub fn get_thumbnail(&self, source_path: &Path) -> PathBuf {
        let thumb_path = self.thumbnail_path(source_path);
        if is_fresh(&thumb_path, source_path) {
            return thumb_path;
        }

        match self.generate(source_path, &thumb_path) {
            Ok(_) => thumb_path,
            Err(err) => {
                debug!(source = %source_path.display(), "thumbnail failed: {err:#}");
                source_path.to_path_buf()
            }
        }
    }

    /// Load a thumbnail as DynamicImage (for ratatui-image)
    pub fn load(&self, source_path: &Path) -> Result<DynamicImage> {
        let path = self.get_thumbnail(source_path);
        if path == source_path {
            return image::open(source_path)
                .with_context(|| format!("Failed to open image: {}", source_path.display()));
        }

        match image::open(&path) {
            Ok(img) => Ok(img),
            Err(err) => {
                // Corrupted cache entry: regenerate once
                warn!(thumb = %path.display(), %err, "failed to decode cached thumbnail");
                let _ = fs::remove_file(&path);
                let image = self.generate(source_path, &path)?;
                Ok(DynamicImage::ImageRgba8(image))
            }
        }
    }

    fn generate(&self, source_path: &Path, thumb_path: &Path) -> Result<RgbaImage> {
        let image = build_thumbnail_image(source_path)?;
        fs::create_dir_all(&self.cache_dir)
            .with_context(|| format!("Failed to create {}", self.cache_dir.display()))?;
        save_as_jpeg(&image, thumb_path, JPEG_QUALITY)?;
        Ok(image)
    }

    /// Total bytes and count of regular files directly in the cache dir.
    pub fn cache_info(&self) -> (u64, usize) {
        let Ok(entries) = fs::read_dir(&self.cache_dir) else {
            return (0, 0);
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.metadata().ok())
            .filter(|meta| meta.is_file())
            .fold((0, 0), |(bytes, count), meta| (bytes + meta.len(), count + 1))
    }

    /// Remove every cached thumbnail. False when the directory could not be
    /// removed or recreated.
    pub fn clear(&self) -> bool {
        if self.cache_dir.exists() {
            if let Err(err) = fs::remove_dir_all(&self.cache_dir) {
                warn!(dir = %self.cache_dir.display(), %err, "failed to clear thumbnail cache");
                return false;
            }
        }
        match fs::create_dir_all(&self.cache_dir) {
            Ok(()) => true,
            Err(err) => {
                warn!(dir = %self.cache_dir.display(), %err, "failed to recreate thumbnail cache");
                false
            }
        }
    }

    /// Generate thumbnails for many images in parallel. Returns how many
    /// ended up with a real cache entry.
    pub fn warm(&self, paths: &[PathBuf]) -> usize {
        paths
            .par_iter()
            .filter(|path| self.get_thumbnail(path) != **path)
            .count()
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// A cache entry is valid when it is at least as new as its source.
fn is_fresh(thumb_path: &Path, source_path: &Path) -> bool {
    match (modified(thumb_path), modified(source_path)) {
        (Some(thumb), Some(source)) => thumb >= source,
        _ => false,
    }
}

/// Fit inside the bounds keeping aspect ratio. Never upscales.
fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (max_w.max(1), max_h.max(1));
    }
    let ratio_w = max_w as f32 / src_w as f32;
    let ratio_h = max_h as f32 / src_h as f32;
    let ratio = ratio_w.min(ratio_h).min(1.0);

    let dst_w = (src_w as f32 * ratio).round() as u32;
    let dst_h = (src_h as f32 * ratio).round() as u32;

    (dst_w.max(1), dst_h.max(1))
}

fn build_thumbnail_image(source_path: &Path) -> Result<RgbaImage> {
    let src_image = image::open(source_path)
        .with_context(|| format!("Failed to open image: {}", source_path.display()))?;

    let src_rgba = src_image.to_rgba8();
    let (src_width, src_height) = (src_rgba.width(), src_rgba.height());
    let (dst_width, dst_height) = fit_dimensions(src_width, src_height, THUMB_WIDTH, THUMB_HEIGHT);
    if (dst_width, dst_height) == (src_width, src_height) {
        return Ok(src_rgba);
    }

    let src_fir = Image::from_vec_u8(
        src_width,
        src_height,
        src_rgba.into_raw(),
        fast_image_resize::PixelType::U8x4,
    )?;

    let mut dst_fir = Image::new(dst_width, dst_height, fast_image_resize::PixelType::U8x4);

    let mut resizer = Resizer::new();
    resizer.resize(
        &src_fir,
        &mut dst_fir,
        &ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
            fast_image_resize::FilterType::Lanczos3,
        )),
    )?;

    let dst_buffer = dst_fir.into_vec();
    let result_image = RgbaImage::from_raw(dst_width, dst_height, dst_buffer)
        .context("Failed to create output image")?;

    Ok(image::imageops::unsharpen(
        &result_image,
        UNSHARP_SIGMA,
        UNSHARP_THRESHOLD,
    ))
}

/// Save RGBA image as JPEG with specified quality.
///
/// Encodes into a sibling temp file and renames it over `path`, so a failed
/// write never leaves a truncated entry that looks fresh.
fn save_as_jpeg(img: &RgbaImage, path: &Path, quality: u8) -> Result<()> {
    let tmp_path = path.with_extension(format!("{}.tmp", std::process::id()));
    let result = write_jpeg(img, &tmp_path, quality).and_then(|()| {
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to move thumbnail into {}", path.display()))
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_jpeg(img: &RgbaImage, path: &Path, quality: u8) -> Result<()> {
    let rgb_img = DynamicImage::ImageRgba8(img.clone()).to_rgb8();

    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, quality);
    encoder
        .encode_image(&rgb_img)
        .with_context(|| format!("Failed to encode JPEG: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
