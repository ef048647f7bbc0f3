use chrono::{DateTime, Local, TimeZone};
use glance::color::Colorizer;
use glance::config::Config;
use glance::error::ListError;
use glance::listing::Listing;
use glance::scan::Scanner;
use glance::tree::build_tree;
use std::fs;
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::Path;
use tempfile::TempDir;

fn list(path: &Path, config: &Config) -> String {
    let colorizer = Colorizer::disabled();
    let mut out = Vec::new();
    Listing::new(config, &colorizer, 80)
        .write(path, &mut out)
        .expect("listing failed");
    String::from_utf8(out).expect("output is not UTF-8")
}

/// Creates:
///
/// ```text
/// root/
/// ├── a/
/// │   └── x
/// └── b
/// ```
fn sample_tree() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    fs::create_dir(root.join("a")).expect("Failed to create a");
    fs::write(root.join("a").join("x"), "x").expect("Failed to write x");
    fs::write(root.join("b"), "bb").expect("Failed to write b");
    temp_dir
}

#[test]
fn test_tree_prefixes() {
    let temp_dir = sample_tree();
    let config = Config {
        tree: true,
        ..Config::default()
    };
    let colorizer = Colorizer::disabled();
    let mut scanner = Scanner::new(&config, &colorizer);

    let entries = scanner.read_entries(temp_dir.path()).unwrap();
    let tree = build_tree(temp_dir.path(), entries, &mut scanner).unwrap();

    let prefixes: Vec<(&str, Option<&str>)> =
        tree.iter().map(|e| (e.name(), e.tree_prefix())).collect();
    let root_name = temp_dir.path().file_name().unwrap().to_str().unwrap();
    assert_eq!(
        prefixes,
        vec![
            (root_name, Some("")),
            ("a", Some("├── ")),
            ("x", Some("│   └── ")),
            ("b", Some("└── ")),
        ]
    );
}

#[test]
fn test_tree_output() {
    let temp_dir = sample_tree();
    let config = Config {
        tree: true,
        ..Config::default()
    };
    let out = list(temp_dir.path(), &config);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(&lines[1..], ["├── a", "│   └── x", "└── b"]);
    assert!(out.ends_with("└── b\n"));
}

#[test]
fn test_tree_of_file_is_flat() {
    let temp_dir = sample_tree();
    let config = Config {
        tree: true,
        ..Config::default()
    };
    let out = list(&temp_dir.path().join("b"), &config);
    assert_eq!(out, "b\n");
}

#[test]
fn test_tree_stops_at_symlink_cycle() {
    let temp_dir = sample_tree();
    symlink(temp_dir.path(), temp_dir.path().join("a").join("up")).unwrap();
    let config = Config {
        tree: true,
        dereference: true,
        ..Config::default()
    };
    let out = list(temp_dir.path(), &config);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(&lines[1..], ["├── a", "│   ├── up", "│   └── x", "└── b"]);
}

#[test]
fn test_tree_follows_dereferenced_directory_link() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("a")).unwrap();
    fs::write(temp_dir.path().join("a").join("x"), "x").unwrap();
    symlink("a", temp_dir.path().join("lnk")).unwrap();

    let config = Config {
        tree: true,
        dereference: true,
        ..Config::default()
    };
    let out = list(temp_dir.path(), &config);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(&lines[1..], ["├── a", "│   └── x", "└── lnk", "    └── x"]);

    // without -L the link is a leaf
    let plain = Config {
        tree: true,
        ..Config::default()
    };
    let out = list(temp_dir.path(), &plain);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(&lines[1..], ["├── a", "│   └── x", "└── lnk"]);
}

#[test]
fn test_recursive_listing_follows_dereferenced_directory_link() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("a")).unwrap();
    fs::write(temp_dir.path().join("a").join("x"), "x").unwrap();
    symlink("a", temp_dir.path().join("lnk")).unwrap();

    let config = Config {
        recurse: true,
        dereference: true,
        ..Config::default()
    };
    let out = list(temp_dir.path(), &config);
    let expected = format!(
        "a    lnk\n\n{}:\nx\n\n{}:\nx\n",
        temp_dir.path().join("a").display(),
        temp_dir.path().join("lnk").display()
    );
    assert_eq!(out, expected);
}

#[test]
fn test_tree_skips_directory_removed_before_descent() {
    let temp_dir = sample_tree();
    let config = Config {
        tree: true,
        ..Config::default()
    };
    let colorizer = Colorizer::disabled();
    let mut scanner = Scanner::new(&config, &colorizer);

    let entries = scanner.read_entries(temp_dir.path()).unwrap();
    fs::remove_dir_all(temp_dir.path().join("a")).unwrap();
    let tree = build_tree(temp_dir.path(), entries, &mut scanner).unwrap();

    let names: Vec<&str> = tree.iter().skip(1).map(|e| e.name()).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn test_tree_skips_unreadable_directory() {
    if unsafe { libc::geteuid() } == 0 {
        eprintln!("skipping: permission bits are not enforced for root");
        return;
    }
    let temp_dir = sample_tree();
    let locked = temp_dir.path().join("a");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let config = Config {
        tree: true,
        ..Config::default()
    };
    let out = list(temp_dir.path(), &config);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(&lines[1..], ["├── a", "└── b"]);
}

#[test]
fn test_grid_listing_hides_dotfiles() {
    let temp_dir = sample_tree();
    fs::write(temp_dir.path().join(".hidden"), "").unwrap();

    let out = list(temp_dir.path(), &Config::default());
    assert_eq!(out, "a  b\n");

    let all = Config {
        all: true,
        ..Config::default()
    };
    assert_eq!(list(temp_dir.path(), &all), ".hidden  a        b\n");
}

#[test]
fn test_classify_and_quoting() {
    let temp_dir = sample_tree();
    fs::write(temp_dir.path().join("my notes"), "").unwrap();
    let config = Config {
        classify: true,
        ..Config::default()
    };
    let out = list(temp_dir.path(), &config);
    assert_eq!(out, "a/          b           'my notes'\n");
}

#[test]
fn test_recursive_listing() {
    let temp_dir = sample_tree();
    let config = Config {
        recurse: true,
        ..Config::default()
    };
    let out = list(temp_dir.path(), &config);
    let expected = format!("a  b\n\n{}:\nx\n", temp_dir.path().join("a").display());
    assert_eq!(out, expected);
}

#[test]
fn test_long_listing_of_symlinks() {
    let temp_dir = sample_tree();
    symlink("b", temp_dir.path().join("link")).unwrap();
    symlink("missing", temp_dir.path().join("dangling")).unwrap();

    let config = Config {
        long: true,
        ..Config::default()
    };
    let out = list(temp_dir.path(), &config);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("4 Files, "));
    assert!(lines.iter().any(|l| l.ends_with("link -> b")));
    assert!(lines.iter().any(|l| l.ends_with("dangling -> missing")));

    let deref = Config {
        long: true,
        dereference: true,
        ..Config::default()
    };
    let out = list(temp_dir.path(), &deref);
    let dangling = out
        .lines()
        .find(|l| l.contains("dangling"))
        .expect("dangling row missing");
    assert!(dangling.starts_with("---------- "));
    assert!(dangling.ends_with("dangling [nonexist]"));
    let link = out.lines().find(|l| l.contains("link")).unwrap();
    assert!(link.ends_with(" link"));
    assert!(link.starts_with("-rw"));
}

#[test]
fn test_long_listing_uses_reference_time() {
    let temp_dir = sample_tree();
    let modified: DateTime<Local> = fs::metadata(temp_dir.path().join("b"))
        .unwrap()
        .modified()
        .unwrap()
        .into();
    let config = Config {
        long: true,
        ..Config::default()
    };
    let colorizer = Colorizer::disabled();
    let far_future = Local.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap();

    let mut out = Vec::new();
    Listing::new(&config, &colorizer, 80)
        .with_now(far_future)
        .write(temp_dir.path(), &mut out)
        .unwrap();
    let out = String::from_utf8(out).unwrap();
    let row = out.lines().find(|l| l.ends_with(" b")).unwrap();
    assert!(row.contains(&modified.format("%b %d  %Y").to_string()));
}

#[test]
fn test_size_sort_reverse() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("big"), vec![0u8; 4000]).unwrap();
    fs::write(temp_dir.path().join("small"), "s").unwrap();
    fs::write(temp_dir.path().join("mid"), vec![0u8; 300]).unwrap();

    let config = Config {
        sort: glance::SortKey::Size,
        ..Config::default()
    };
    assert_eq!(list(temp_dir.path(), &config), "big    mid    small\n");

    let reversed = Config {
        reverse: true,
        ..config
    };
    assert_eq!(list(temp_dir.path(), &reversed), "small  mid    big\n");
}

#[test]
fn test_missing_path_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let colorizer = Colorizer::disabled();
    let mut out = Vec::new();
    let missing = temp_dir.path().join("nope");
    let result = Listing::new(&config, &colorizer, 80).write(&missing, &mut out);
    assert!(matches!(result, Err(ListError::Stat { .. })));
    assert!(out.is_empty());
}
