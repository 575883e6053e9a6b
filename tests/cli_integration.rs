use std::path::Path;
use std::process::{Command, Output};

/// Isolated sandbox: every state directory lives under one temp root and
/// background changes stay in memory.
struct Sandbox {
    root: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn run(&self, args: &[&str]) -> Output {
        self.run_in(self.path(), args)
    }

    fn run_in(&self, dir: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_wallpick"))
            .current_dir(dir)
            .args(args)
            .arg("--dry-run")
            .env("WALLPICK_DATA_DIR", self.path().join("data"))
            .env("WALLPICK_CACHE_DIR", self.path().join("cache"))
            .env("WALLPICK_RUNTIME_DIR", self.path().join("run"))
            .env("HOME", self.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run wallpick")
    }

    /// Folder with `count` small PNGs, registered in the config.
    fn with_images(&self, count: usize) -> std::path::PathBuf {
        let walls = self.path().join("walls");
        std::fs::create_dir_all(&walls).unwrap();
        for i in 0..count {
            let img = image::RgbImage::from_fn(32, 18, |_, _| image::Rgb([200, 80, 40]));
            img.save(walls.join(format!("test_{i}.png"))).unwrap();
        }
        let out = self.run(&["config", "add-dir", walls.to_str().unwrap()]);
        assert!(out.status.success());
        walls
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_exits_zero() {
    let output = Sandbox::new().run(&["--help"]);
    assert!(output.status.success(), "wallpick --help should exit 0");
    assert!(
        stdout(&output).contains("Wallpaper picker"),
        "help should contain description"
    );
}

#[test]
fn test_version_exits_zero() {
    let output = Sandbox::new().run(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("wallpick"));
}

#[test]
fn test_shuffle_without_images_still_exits_zero() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["--shuffle"]);
    assert!(output.status.success(), "shuffle never fails the process");
    assert!(!String::from_utf8_lossy(&output.stderr).contains("panicked"));
}

#[test]
fn test_shuffle_picks_a_configured_image() {
    let sandbox = Sandbox::new();
    let walls = sandbox.with_images(3);

    let output = sandbox.run(&["--shuffle"]);
    assert!(output.status.success());
    let picked = stdout(&output);
    assert!(picked.trim().starts_with(walls.to_str().unwrap()), "{picked}");
}

#[test]
fn test_list_respects_max() {
    let sandbox = Sandbox::new();
    sandbox.with_images(5);

    let all = sandbox.run(&["list", "--sort", "az"]);
    assert!(all.status.success());
    let lines: Vec<String> = stdout(&all).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].ends_with("test_0.png"));

    let two = sandbox.run(&["list", "--max", "2"]);
    assert_eq!(stdout(&two).lines().count(), 2);
}

#[test]
fn test_list_with_no_folders_is_not_an_error() {
    let output = Sandbox::new().run(&["list"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_apply_records_usage() {
    let sandbox = Sandbox::new();
    let walls = sandbox.with_images(2);
    let target = walls.join("test_1.png");

    let output = sandbox.run(&["apply", target.to_str().unwrap()]);
    assert!(output.status.success(), "{:?}", output);

    let stats = stdout(&sandbox.run(&["stats"]));
    assert!(stats.contains("test_1.png"), "{stats}");

    let most_used = stdout(&sandbox.run(&["list"]));
    assert!(most_used.lines().next().unwrap().ends_with("test_1.png"));

    let reset = sandbox.run(&["stats", "--reset"]);
    assert!(reset.status.success());
    assert!(stdout(&sandbox.run(&["stats"])).contains("No wallpapers applied yet."));
}

#[test]
fn test_apply_missing_file_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["apply", "/nonexistent/wallpick/none.png"]);
    assert!(!output.status.success());
}

#[test]
fn test_favorites_toggle_roundtrip() {
    let sandbox = Sandbox::new();

    let on = sandbox.run(&["fav", "toggle", "sunset.jpg"]);
    assert!(stdout(&on).contains("★ sunset.jpg"));
    assert!(stdout(&sandbox.run(&["fav", "list"])).contains("sunset.jpg"));

    let off = sandbox.run(&["fav", "toggle", "sunset.jpg"]);
    assert!(stdout(&off).contains("☆ sunset.jpg"));
    assert!(stdout(&sandbox.run(&["fav", "list"])).contains("No favorites yet."));
}

#[test]
fn test_config_set_and_show() {
    let sandbox = Sandbox::new();

    assert!(sandbox.run(&["config", "set", "columns", "5"]).status.success());
    assert!(sandbox
        .run(&["config", "set", "picture_mode", "spanned"])
        .status
        .success());
    assert!(!sandbox.run(&["config", "set", "colour", "red"]).status.success());

    let shown = stdout(&sandbox.run(&["config", "show"]));
    assert!(shown.contains("columns:      5"), "{shown}");
    assert!(shown.contains("picture_mode: spanned"), "{shown}");
}

#[test]
fn test_cache_warm_then_clear() {
    let sandbox = Sandbox::new();
    sandbox.with_images(2);

    let warm = stdout(&sandbox.run(&["cache", "warm"]));
    assert!(warm.contains("2/2 cached"), "{warm}");
    assert!(stdout(&sandbox.run(&["cache", "info"])).contains("(2 files)"));

    assert!(sandbox.run(&["cache", "clear"]).status.success());
    assert!(stdout(&sandbox.run(&["cache", "info"])).contains("(0 files)"));
}

#[test]
fn test_thumb_relative_and_absolute_share_a_cache_entry() {
    let sandbox = Sandbox::new();
    let walls = sandbox.with_images(1);
    let target = walls.join("test_0.png");

    let absolute = sandbox.run(&["thumb", target.to_str().unwrap()]);
    assert!(absolute.status.success(), "{:?}", absolute);
    let relative = sandbox.run_in(&walls, &["thumb", "./test_0.png"]);
    assert!(relative.status.success(), "{:?}", relative);

    assert_eq!(stdout(&absolute), stdout(&relative));
    assert!(stdout(&sandbox.run(&["cache", "info"])).contains("(1 files)"));
}

#[test]
fn test_delete_with_yes_removes_file_and_favorite() {
    let sandbox = Sandbox::new();
    let walls = sandbox.with_images(2);
    let target = walls.join("test_0.png");
    sandbox.run(&["fav", "add", "test_0.png"]);

    let output = sandbox.run(&["delete", "--yes", target.to_str().unwrap()]);
    assert!(output.status.success(), "{:?}", output);
    assert!(!target.exists());
    assert!(!stdout(&sandbox.run(&["fav", "list"])).contains("test_0.png"));
}
