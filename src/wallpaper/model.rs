use super::ImageEntry;
use crate::utils::{file_name_of, format_bytes};
use std::path::Path;

impl ImageEntry {
    /// Stat a file without decoding it. Unreadable metadata reads as zero.
    pub fn from_path(path: &Path) -> Self {
        let metadata = std::fs::metadata(path).ok();
        let size_bytes = metadata.as_ref().map(|m| m.len()).unwrap_or(0);
        let mtime = metadata
            .and_then(|m| m.modified().ok())
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        Self {
            path: path.to_path_buf(),
            filename: file_name_of(path),
            mtime,
            size_bytes,
        }
    }
}

/// Describe an image for the status line without a full decode.
pub fn image_info(path: &Path) -> String {
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    match image::image_dimensions(path) {
        Ok((width, height)) => format!("{width}\u{d7}{height} \u{b7} {}", format_bytes(size)),
        Err(_) => format_bytes(size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_reads_size_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, [0u8; 10]).unwrap();

        let entry = ImageEntry::from_path(&path);
        assert_eq!(entry.filename, "a.png");
        assert_eq!(entry.size_bytes, 10);
        assert!(entry.mtime > 0.0);
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let entry = ImageEntry::from_path(Path::new("/definitely/not/here.jpg"));
        assert_eq!(entry.mtime, 0.0);
        assert_eq!(entry.size_bytes, 0);
    }

    #[test]
    fn info_includes_dimensions_when_decodable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        image::RgbImage::new(4, 3).save(&path).unwrap();
        assert!(image_info(&path).starts_with("4\u{d7}3 \u{b7} "));

        let junk = dir.path().join("junk.png");
        std::fs::write(&junk, b"nope").unwrap();
        assert_eq!(image_info(&junk), "4 B");
    }
}
