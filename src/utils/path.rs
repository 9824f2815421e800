//! Path utilities: expand ~ and anchor relative database paths.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Absolute paths are kept, `~/…` is expanded, anything else lives under `base`.
pub fn resolve_under(path: &str, base: &Path) -> PathBuf {
    let expanded = expand_tilde(path);
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_anchored() {
        let base = Path::new("/var/venue");
        assert_eq!(
            resolve_under("venue.sqlite", base),
            PathBuf::from("/var/venue/venue.sqlite")
        );
        assert_eq!(
            resolve_under("/tmp/x.sqlite", base),
            PathBuf::from("/tmp/x.sqlite")
        );
    }
}
