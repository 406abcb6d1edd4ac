//! Translation of [`EngineConfiguration`] into CEF settings and switches.

use cef::{LogSeverity, Settings};
use lantern_core::{EngineConfiguration, LogVerbosity};

use crate::discovery;

/// Build the process-wide CEF settings.
pub(crate) fn build_settings(config: &EngineConfiguration) -> Settings {
    let mut settings = Settings::default();
    settings.no_sandbox = config.sandbox_disabled as _;
    settings.windowless_rendering_enabled = config.windowless_rendering as _;
    settings.log_severity = log_severity(config.log_verbosity);

    if let Some(color) = config.background_color {
        settings.background_color = color;
    }

    if let Some(path) = cache_path(config) {
        tracing::debug!("CEF cache path: {path}");
        settings.root_cache_path = path.into();
    }

    if let Some(helper) = discovery::find_helper_binary() {
        tracing::info!("using CEF helper: {helper}");
        settings.browser_subprocess_path = helper.as_str().into();
    }

    // CEF requires absolute resource paths.
    if let Some(cef_dir) = discovery::find_cef_dir() {
        tracing::info!("CEF resource dir: {}", cef_dir.display());
        let locales = cef_dir.join("locales");
        settings.resources_dir_path = cef_dir.to_str().unwrap_or_default().into();
        settings.locales_dir_path = locales.to_str().unwrap_or_default().into();
    }

    settings
}

/// Cache directory as a CEF string.  Non-UTF-8 paths fall back to the CEF
/// default.
pub(crate) fn cache_path(config: &EngineConfiguration) -> Option<&str> {
    let cache = config.cache_directory.as_deref()?;
    let path = cache.to_str();
    if path.is_none() {
        tracing::warn!("cache path {} is not valid UTF-8, using CEF default", cache.display());
    }
    path
}

pub(crate) fn log_severity(verbosity: LogVerbosity) -> LogSeverity {
    match verbosity {
        LogVerbosity::Verbose => LogSeverity::VERBOSE,
        LogVerbosity::ErrorOnly => LogSeverity::ERROR,
    }
}

/// Split a configured flag into switch name and optional value.
pub(crate) fn split_switch(flag: &str) -> (&str, Option<&str>) {
    let flag = flag.trim_start_matches('-');
    match flag.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (flag, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_core::{InitialDocument, WindowSpec};
    use std::path::PathBuf;

    #[test]
    fn bare_switch_has_no_value() {
        assert_eq!(split_switch("disable-gpu"), ("disable-gpu", None));
    }

    #[test]
    fn valued_switch_splits_on_first_equals() {
        assert_eq!(
            split_switch("disable-features=UseSkiaRenderer,CanvasOopRasterization"),
            ("disable-features", Some("UseSkiaRenderer,CanvasOopRasterization"))
        );
        assert_eq!(split_switch("--js-flags=--a=b"), ("js-flags", Some("--a=b")));
    }

    fn config_with_cache(cache: Option<PathBuf>) -> EngineConfiguration {
        EngineConfiguration {
            sandbox_disabled: true,
            software_rendering_only: true,
            windowless_rendering: true,
            background_color: None,
            cache_directory: cache,
            log_verbosity: LogVerbosity::ErrorOnly,
            extra_flags: Vec::new(),
            window: WindowSpec::default(),
            initial_document: InitialDocument::greeting(),
        }
    }

    #[test]
    fn utf8_cache_path_is_used() {
        let config = config_with_cache(Some(PathBuf::from("/work/browser_cache")));
        assert_eq!(cache_path(&config), Some("/work/browser_cache"));
        assert_eq!(cache_path(&config_with_cache(None)), None);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_cache_path_falls_back() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/work/cache-\xff");
        let config = config_with_cache(Some(PathBuf::from(raw)));
        assert_eq!(cache_path(&config), None);
    }

    #[test]
    fn verbosity_maps_to_severity() {
        assert!(log_severity(LogVerbosity::Verbose) == LogSeverity::VERBOSE);
        assert!(log_severity(LogVerbosity::ErrorOnly) == LogSeverity::ERROR);
    }
}
