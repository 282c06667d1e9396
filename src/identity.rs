use std::path::Path;

/// Identity used when none is given: `user.email`, else `user.name`, from
/// the global git config.
pub fn default_identity() -> Option<String> {
    let path = dirs::home_dir()?.join(".gitconfig");
    identity_from_file(&path)
}

pub fn identity_from_file(path: &Path) -> Option<String> {
    let config = gix::config::File::from_path_no_includes(path.to_path_buf(), gix::config::Source::User).ok()?;
    config
        .string("user.email")
        .or_else(|| config.string("user.name"))
        .map(|value| value.to_string())
        .filter(|value| !value.is_empty())
}
