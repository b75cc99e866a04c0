use std::path::{Path, PathBuf};

/// Resolve the directory that holds `.parayan/`.
///
/// Priority:
/// 1. `--root` flag / `PARAYAN_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.parayan/`
/// 3. The user's home directory
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if let Some(found) = find_upward(&cwd) {
        return found;
    }

    home::home_dir().unwrap_or(cwd)
}

fn find_upward(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(parayan_core::paths::PARAYAN_DIR).is_dir())
        .map(Path::to_path_buf)
}
