use gitcontrib::identity::identity_from_file;
use gitcontrib::repos::{scan_git_folders, should_be_ignored, RepoList};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn missing_list_is_empty() {
    let dir = tempdir().unwrap();
    let list = RepoList::new(dir.path().join(".gitcontrib"));

    assert!(list.load().unwrap().is_empty());
    assert_eq!(list.folders_to_scan().unwrap(), vec![PathBuf::from(".")]);
}

#[test]
fn add_skips_entries_already_listed() {
    let dir = tempdir().unwrap();
    let list = RepoList::new(dir.path().join("nested").join(".gitcontrib"));

    let added = list.add(&["/src/x".to_string(), "/src/y".to_string()]).unwrap();
    assert_eq!(added, vec!["/src/x", "/src/y"]);

    let added = list.add(&["/src/y".to_string(), "/src/z".to_string()]).unwrap();
    assert_eq!(added, vec!["/src/z"]);

    assert_eq!(list.load().unwrap(), vec!["/src/x", "/src/y", "/src/z"]);
    assert_eq!(
        fs::read_to_string(list.path()).unwrap(),
        "/src/x\n/src/y\n/src/z"
    );
}

#[test]
fn blank_lines_are_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".gitcontrib");
    fs::write(&path, "/src/x\n\n  /src/y  \n").unwrap();

    assert_eq!(RepoList::new(path).load().unwrap(), vec!["/src/x", "/src/y"]);
}

#[test]
fn vendored_folder_names_are_ignored() {
    assert!(should_be_ignored("vendor"));
    assert!(should_be_ignored("node_modules"));
    assert!(should_be_ignored("venv"));
    assert!(!should_be_ignored("src"));
}

#[test]
fn scan_finds_nested_repositories() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    for repo in ["a", "b/nested", "node_modules/c", "vendor/d", "a/.git/modules/e"] {
        fs::create_dir_all(root.join(repo).join(".git")).unwrap();
    }
    fs::create_dir_all(root.join("plain/deeper")).unwrap();

    let mut found = scan_git_folders(root).unwrap();
    found.sort();

    let mut expected = vec![
        fs::canonicalize(root.join("a")).unwrap(),
        fs::canonicalize(root.join("b/nested")).unwrap(),
    ];
    expected.sort();
    assert_eq!(found, expected);
}

#[test]
fn scan_of_a_repository_root_includes_it() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".git")).unwrap();

    let found = scan_git_folders(dir.path()).unwrap();
    assert_eq!(found, vec![fs::canonicalize(dir.path()).unwrap()]);
}

#[test]
fn identity_prefers_the_email() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gitconfig");
    fs::write(&path, "[user]\n\tname = Alice\n\temail = alice@example.com\n").unwrap();

    assert_eq!(identity_from_file(&path), Some("alice@example.com".to_string()));
}

#[test]
fn identity_falls_back_to_the_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gitconfig");
    fs::write(&path, "[user]\n\tname = Alice\n").unwrap();

    assert_eq!(identity_from_file(&path), Some("Alice".to_string()));
}

#[test]
fn identity_is_absent_without_config() {
    let dir = tempdir().unwrap();
    assert_eq!(identity_from_file(&dir.path().join("missing")), None);
}
