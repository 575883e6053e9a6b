use super::{ImageEntry, SortMode};
use crate::favorites::Favorites;
use crate::stats::Stats;
use crate::utils::{display_name, file_name_of, is_image_name};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Scan `dirs` (non-recursive) and return sorted, capped image paths.
pub fn scan(
    dirs: &[PathBuf],
    sort: SortMode,
    max_images: usize,
    stats: &Stats,
    favorites: &Favorites,
) -> Vec<PathBuf> {
    scan_entries(dirs, sort, max_images, stats, favorites)
        .into_iter()
        .map(|entry| entry.path)
        .collect()
}

/// Like [`scan`] but keeps the per-file metadata.
pub fn scan_entries(
    dirs: &[PathBuf],
    sort: SortMode,
    max_images: usize,
    stats: &Stats,
    favorites: &Favorites,
) -> Vec<ImageEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for dir in dirs {
        for path in list_images(dir) {
            let name = file_name_of(&path);
            // First directory wins for a given basename
            if seen.insert(name) {
                entries.push(ImageEntry::from_path(&path));
            }
        }
    }

    if sort == SortMode::Starred {
        entries.retain(|entry| favorites.contains(&entry.filename));
    }
    sort_entries(&mut entries, sort, stats);

    if max_images > 0 {
        entries.truncate(max_images);
    }
    entries
}

/// Immediate image files of one directory, in byte order of their names.
fn list_images(dir: &Path) -> Vec<PathBuf> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(err) => {
            debug!(dir = %dir.display(), %err, "skipping unreadable directory");
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name();
            is_image_name(&name.to_string_lossy())
        })
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();
    paths
}

/// Stable in-place sort. `Starred` filtering is the caller's job.
pub(crate) fn sort_entries(entries: &mut [ImageEntry], sort: SortMode, stats: &Stats) {
    match sort {
        SortMode::Alphabetical | SortMode::Starred => {
            entries.sort_by_cached_key(|entry| entry.filename.to_lowercase());
        }
        SortMode::Newest => entries.sort_by(|a, b| descending(a.mtime, b.mtime)),
        SortMode::MostUsed => {
            entries.sort_by_cached_key(|entry| std::cmp::Reverse(stats.count(&entry.filename)));
        }
        SortMode::Recent => entries.sort_by(|a, b| {
            descending(stats.last_used(&a.filename), stats.last_used(&b.filename))
        }),
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Move the applied wallpaper to the front when it is in the list.
pub fn pin_current(paths: &mut Vec<PathBuf>, current: &Path) {
    if current.as_os_str().is_empty() {
        return;
    }
    if let Some(pos) = paths.iter().position(|p| p == current) {
        let pinned = paths.remove(pos);
        paths.insert(0, pinned);
    }
}

/// Case-insensitive search on the card label.
pub fn matches_query(path: &Path, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    display_name(&file_name_of(path))
        .to_lowercase()
        .contains(&query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatsEntry;
    use std::time::{Duration, SystemTime};

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"img").unwrap();
        path
    }

    fn set_mtime(path: &Path, secs_ago: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
            .unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|p| file_name_of(p)).collect()
    }

    #[test]
    fn most_used_across_directories() {
        let root = tempfile::tempdir().unwrap();
        let a = root.path().join("A");
        let b = root.path().join("B");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        touch(&a, "cat.png");
        touch(&b, "dog.png");
        touch(&b, "cat.png");

        let mut stats = Stats::default();
        stats.insert("dog.png", StatsEntry { count: 5, last_used: 0.0 });
        stats.insert("cat.png", StatsEntry { count: 2, last_used: 0.0 });

        let paths = scan(
            &[a.clone(), b.clone()],
            SortMode::MostUsed,
            0,
            &stats,
            &Favorites::default(),
        );
        assert_eq!(paths, vec![b.join("dog.png"), a.join("cat.png")]);
    }

    #[test]
    fn filters_extensions_and_skips_subdirs() {
        let root = tempfile::tempdir().unwrap();
        touch(root.path(), "Photo.JPG");
        touch(root.path(), "notes.txt");
        touch(root.path(), "anim.gif");
        fs::create_dir(root.path().join("nested.png")).unwrap();

        let paths = scan(
            &[root.path().to_path_buf()],
            SortMode::Alphabetical,
            0,
            &Stats::default(),
            &Favorites::default(),
        );
        assert_eq!(names(&paths), vec!["Photo.JPG"]);
    }

    #[test]
    fn missing_directories_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        touch(root.path(), "a.png");

        let paths = scan(
            &[root.path().join("gone"), root.path().to_path_buf()],
            SortMode::Alphabetical,
            0,
            &Stats::default(),
            &Favorites::default(),
        );
        assert_eq!(names(&paths), vec!["a.png"]);
    }

    #[test]
    fn alphabetical_ignores_case() {
        let root = tempfile::tempdir().unwrap();
        for name in ["b.png", "C.png", "a.png"] {
            touch(root.path(), name);
        }

        let paths = scan(
            &[root.path().to_path_buf()],
            SortMode::Alphabetical,
            0,
            &Stats::default(),
            &Favorites::default(),
        );
        assert_eq!(names(&paths), vec!["a.png", "b.png", "C.png"]);
    }

    #[test]
    fn newest_first_by_mtime() {
        let root = tempfile::tempdir().unwrap();
        let old = touch(root.path(), "old.png");
        let mid = touch(root.path(), "mid.png");
        let new = touch(root.path(), "new.png");
        set_mtime(&old, 3000);
        set_mtime(&mid, 2000);
        set_mtime(&new, 1000);

        let paths = scan(
            &[root.path().to_path_buf()],
            SortMode::Newest,
            0,
            &Stats::default(),
            &Favorites::default(),
        );
        assert_eq!(names(&paths), vec!["new.png", "mid.png", "old.png"]);
    }

    #[test]
    fn recent_uses_last_used() {
        let root = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            touch(root.path(), name);
        }
        let mut stats = Stats::default();
        stats.insert("a.png", StatsEntry { count: 9, last_used: 10.0 });
        stats.insert("c.png", StatsEntry { count: 1, last_used: 50.0 });

        let paths = scan(
            &[root.path().to_path_buf()],
            SortMode::Recent,
            0,
            &stats,
            &Favorites::default(),
        );
        assert_eq!(names(&paths), vec!["c.png", "a.png", "b.png"]);
    }

    #[test]
    fn starred_keeps_only_favorites_then_caps() {
        let root = tempfile::tempdir().unwrap();
        for name in ["d.png", "c.png", "b.png", "a.png"] {
            touch(root.path(), name);
        }
        let mut favorites = Favorites::default();
        favorites.add("d.png");
        favorites.add("b.png");
        favorites.add("a.png");

        let dirs = [root.path().to_path_buf()];
        let all = scan(&dirs, SortMode::Starred, 0, &Stats::default(), &favorites);
        assert_eq!(names(&all), vec!["a.png", "b.png", "d.png"]);

        let capped = scan(&dirs, SortMode::Starred, 2, &Stats::default(), &favorites);
        assert_eq!(names(&capped), vec!["a.png", "b.png"]);
    }

    #[test]
    fn max_images_caps_after_sorting() {
        let root = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            touch(root.path(), name);
        }
        let mut stats = Stats::default();
        stats.insert("c.png", StatsEntry { count: 3, last_used: 0.0 });

        let paths = scan(
            &[root.path().to_path_buf()],
            SortMode::MostUsed,
            1,
            &stats,
            &Favorites::default(),
        );
        assert_eq!(names(&paths), vec!["c.png"]);
    }

    #[test]
    fn pin_moves_current_to_front() {
        let mut paths = vec![
            PathBuf::from("/w/a.png"),
            PathBuf::from("/w/b.png"),
            PathBuf::from("/w/c.png"),
        ];
        pin_current(&mut paths, Path::new("/w/c.png"));
        assert_eq!(names(&paths), vec!["c.png", "a.png", "b.png"]);

        pin_current(&mut paths, Path::new("/elsewhere/x.png"));
        pin_current(&mut paths, Path::new(""));
        assert_eq!(names(&paths), vec!["c.png", "a.png", "b.png"]);
    }

    #[test]
    fn query_matches_display_name() {
        let path = Path::new("/w/Mountain_Lake-sunset.jpg");
        assert!(matches_query(path, "lake sun"));
        assert!(matches_query(path, "MOUNTAIN"));
        assert!(matches_query(path, ""));
        assert!(!matches_query(path, ".jpg"));
    }
}
