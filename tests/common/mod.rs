#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;

pub fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_NOSYSTEM", "1");
    cmd
}

pub fn init_git_repo(dir: &Path) {
    assert!(git(dir, &["init", "-q"]).status().unwrap().success());
    assert!(git(dir, &["config", "user.email", "you@example.com"])
        .status()
        .unwrap()
        .success());
    assert!(git(dir, &["config", "user.name", "Your Name"])
        .status()
        .unwrap()
        .success());
}

/// Write `content` to `name` and commit it as `author` at `date` (RFC 2822).
pub fn commit_file_as(dir: &Path, name: &str, content: &str, author: (&str, &str), date: &str) {
    commit_file_dated(dir, name, content, author, date, date);
}

/// Like [`commit_file_as`], with a committer date that differs from the
/// author date, as after a rebase or an amend.
pub fn commit_file_dated(
    dir: &Path,
    name: &str,
    content: &str,
    author: (&str, &str),
    author_date: &str,
    committer_date: &str,
) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();

    assert!(git(dir, &["add", "."]).status().unwrap().success());
    assert!(git(dir, &["commit", "-q", "-m", &format!("edit {name}")])
        .env("GIT_AUTHOR_NAME", author.0)
        .env("GIT_AUTHOR_EMAIL", author.1)
        .env("GIT_COMMITTER_NAME", author.0)
        .env("GIT_COMMITTER_EMAIL", author.1)
        .env("GIT_AUTHOR_DATE", author_date)
        .env("GIT_COMMITTER_DATE", committer_date)
        .status()
        .unwrap()
        .success());
}

/// Object id of `spec`, e.g. `HEAD:a.txt`.
pub fn rev_parse(dir: &Path, spec: &str) -> String {
    let out = git(dir, &["rev-parse", spec]).output().unwrap();
    assert!(out.status.success());
    String::from_utf8(out.stdout).unwrap().trim().to_string()
}
