use std::path::{Path, PathBuf};

/// Locations searched for a configuration file, relative to a project root.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["objclint.toml", ".objclint.toml", "config/objclint.toml"];

/// Find a configuration file under `root`.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_first_candidate() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_config(dir.path()), None);

        std::fs::create_dir(dir.path().join("config")).unwrap();
        std::fs::write(dir.path().join("config/objclint.toml"), "").unwrap();
        assert_eq!(
            find_config(dir.path()),
            Some(dir.path().join("config/objclint.toml"))
        );

        std::fs::write(dir.path().join(".objclint.toml"), "").unwrap();
        assert_eq!(
            find_config(dir.path()),
            Some(dir.path().join(".objclint.toml"))
        );
    }
}
