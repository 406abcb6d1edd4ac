//! Locating the CEF helper binary and resource directory.

use std::path::{Path, PathBuf};

/// Overrides the helper binary location.
pub const HELPER_PATH_ENV: &str = "LANTERN_CEF_HELPER_PATH";
/// File name of the helper next to the main executable.
pub const HELPER_BINARY_NAME: &str = "lantern-cef-helper";

/// Find a dedicated subprocess helper.  Without one, CEF relaunches the
/// main executable for its subprocesses.
pub(crate) fn find_helper_binary() -> Option<String> {
    if let Ok(path) = std::env::var(HELPER_PATH_ENV) {
        if Path::new(&path).exists() {
            return Some(path);
        }
        tracing::warn!("{HELPER_PATH_ENV} set but file not found: {path}");
    }

    let exe = std::env::current_exe().ok()?;
    let helper = exe.parent()?.join(HELPER_BINARY_NAME);
    if helper.exists() {
        return helper.to_str().map(str::to_string);
    }

    None
}

/// Find the CEF resource directory (containing locales/, *.pak, icudtl.dat).
pub(crate) fn find_cef_dir() -> Option<PathBuf> {
    // 1. Explicit env var (e.g. set by a launcher script).
    if let Ok(dir) = std::env::var("CEF_DIR") {
        let p = PathBuf::from(&dir);
        if p.join("icudtl.dat").exists() {
            return Some(p);
        }
    }

    // 2. Resolve from LD_LIBRARY_PATH (where libcef.so lives).
    if let Ok(ld) = std::env::var("LD_LIBRARY_PATH") {
        let cwd = std::env::current_dir().ok();
        if let Some(dir) = library_path_candidates(&ld, cwd.as_deref())
            .into_iter()
            .find(|p| p.join("libcef.so").exists() && p.join("icudtl.dat").exists())
        {
            return Some(dir);
        }
    }

    // 3. Same directory as the running executable.
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?;
    dir.join("icudtl.dat").exists().then(|| dir.to_path_buf())
}

/// Absolute directories listed in a `LD_LIBRARY_PATH`-style value.
fn library_path_candidates(value: &str, cwd: Option<&Path>) -> Vec<PathBuf> {
    value
        .split(':')
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let p = PathBuf::from(entry);
            if p.is_absolute() {
                Some(p)
            } else {
                cwd.map(|cwd| cwd.join(p))
            }
        })
        .collect()
}
