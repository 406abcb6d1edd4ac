//! Engine startup configuration.
//!
//! Built once from the process arguments and environment before the
//! engine is initialised, then read-only.  Nothing in here can fail:
//! missing or malformed inputs fall back to defaults.

use std::path::PathBuf;

use crate::args::{ProcessArgs, DEBUG_SWITCH, ENABLE_GPU_SWITCH};

/// Cache directory name, relative to the working directory.
pub const CACHE_DIR_NAME: &str = "browser_cache";

/// Overrides the cache directory.
pub const CACHE_DIR_ENV: &str = "LANTERN_CACHE_DIR";
/// Replaces the embedded greeting page with a URL.
pub const START_URL_ENV: &str = "LANTERN_START_URL";
/// Window width in logical pixels.
pub const WINDOW_WIDTH_ENV: &str = "LANTERN_WINDOW_WIDTH";
/// Window height in logical pixels.
pub const WINDOW_HEIGHT_ENV: &str = "LANTERN_WINDOW_HEIGHT";

const DEFAULT_WINDOW_TITLE: &str = "Lantern";
const DEFAULT_WIDTH: u32 = 1200;
const DEFAULT_HEIGHT: u32 = 800;
const MAX_DIMENSION: u32 = i32::MAX as u32;

/// Opaque white, used while compositing in software.
pub const SOFTWARE_BACKGROUND_COLOR: u32 = 0xFFFF_FFFF;

/// Switches that keep every GPU path off.  Spawning a GPU helper needs a
/// code-signed bundle on some platforms, so unsigned development builds
/// render in software unless `--enable-gpu` is given.
pub const ACCELERATION_DISABLING_SWITCHES: [&str; 9] = [
    "disable-gpu",
    "disable-gpu-compositing",
    "disable-gpu-sandbox",
    "disable-gpu-vsync",
    "disable-accelerated-video-decode",
    "disable-accelerated-2d-canvas",
    "disable-webgl",
    "disable-software-rasterizer",
    "single-process",
];

/// Appended after [`ACCELERATION_DISABLING_SWITCHES`] in software mode.
pub const SUPPLEMENTARY_SOFTWARE_SWITCHES: [&str; 3] = [
    "disable-accelerated-painting",
    "disable-gpu-process-for-dx12-info-collection",
    "disable-features=UseSkiaRenderer,CanvasOopRasterization",
];

const GREETING_PAGE: &str = concat!(
    "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Lantern</title></head>",
    "<body style=\"font-family: sans-serif; margin: 3em;\">",
    "<h1>Lantern is running</h1>",
    "<p>This page is rendered by an embedded Chromium engine.</p>",
    "<p>Try visiting <a href=\"https://www.google.com\">Google</a>.</p>",
    "</body></html>",
);

// ── Environment ──────────────────────────────────────────────────

/// Source of environment variables and the working directory.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;

    fn current_dir(&self) -> Option<PathBuf>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn current_dir(&self) -> Option<PathBuf> {
        std::env::current_dir().ok()
    }
}

// ── Configuration ────────────────────────────────────────────────

/// Engine log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogVerbosity {
    Verbose,
    ErrorOnly,
}

/// Native window placement for the top-level view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self { title: DEFAULT_WINDOW_TITLE.into(), width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT }
    }
}

/// What the first view loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialDocument {
    /// Inline HTML, loaded through a `data:` URL.
    Html(String),
    Url(String),
}

impl InitialDocument {
    pub fn greeting() -> Self {
        InitialDocument::Html(GREETING_PAGE.into())
    }

    pub fn to_url(&self) -> String {
        match self {
            InitialDocument::Html(html) => {
                format!("data:text/html,{}", urlencoding::encode(html))
            }
            InitialDocument::Url(url) => url.clone(),
        }
    }
}

impl Default for InitialDocument {
    fn default() -> Self {
        Self::greeting()
    }
}

/// Startup configuration handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfiguration {
    /// Always set: the process sandbox is off for this supervisor.
    pub sandbox_disabled: bool,
    pub software_rendering_only: bool,
    pub windowless_rendering: bool,
    pub background_color: Option<u32>,
    /// Absolute path, or `None` to let the engine pick its default.
    pub cache_directory: Option<PathBuf>,
    pub log_verbosity: LogVerbosity,
    /// Switch names (optionally `name=value`) appended to the engine's
    /// command line, without leading dashes.
    pub extra_flags: Vec<String>,
    pub window: WindowSpec,
    pub initial_document: InitialDocument,
}

/// Builds [`EngineConfiguration`] from process arguments.
pub struct RuntimeConfigurator<'a> {
    env: &'a dyn Environment,
}

impl<'a> RuntimeConfigurator<'a> {
    pub fn new(env: &'a dyn Environment) -> Self {
        Self { env }
    }

    pub fn build_configuration(&self, args: &ProcessArgs) -> EngineConfiguration {
        let enable_gpu = args.has_switch(ENABLE_GPU_SWITCH);

        let mut extra_flags = Vec::new();
        if enable_gpu {
            tracing::warn!("running with GPU acceleration; helper processes must be code signed");
        } else {
            tracing::info!("disabling GPU processes and hardware acceleration");
            extra_flags.extend(ACCELERATION_DISABLING_SWITCHES.iter().map(|s| s.to_string()));
            extra_flags.extend(SUPPLEMENTARY_SOFTWARE_SWITCHES.iter().map(|s| s.to_string()));
        }

        let log_verbosity = if args.has_switch(DEBUG_SWITCH) {
            tracing::info!("debug logging enabled");
            LogVerbosity::Verbose
        } else {
            LogVerbosity::ErrorOnly
        };

        EngineConfiguration {
            sandbox_disabled: true,
            software_rendering_only: !enable_gpu,
            windowless_rendering: !enable_gpu,
            background_color: (!enable_gpu).then_some(SOFTWARE_BACKGROUND_COLOR),
            cache_directory: self.cache_directory(),
            log_verbosity,
            extra_flags,
            window: self.window(),
            initial_document: self.initial_document(),
        }
    }

    fn cache_directory(&self) -> Option<PathBuf> {
        let cwd = self.env.current_dir();

        if let Some(dir) = self.non_empty_var(CACHE_DIR_ENV) {
            let dir = PathBuf::from(dir);
            if dir.is_absolute() {
                return Some(dir);
            }
            return cwd.map(|cwd| cwd.join(dir));
        }

        match cwd {
            Some(cwd) => Some(cwd.join(CACHE_DIR_NAME)),
            None => {
                tracing::debug!("working directory unavailable, using engine cache default");
                None
            }
        }
    }

    fn window(&self) -> WindowSpec {
        let defaults = WindowSpec::default();
        WindowSpec {
            width: self.dimension(WINDOW_WIDTH_ENV).unwrap_or(defaults.width),
            height: self.dimension(WINDOW_HEIGHT_ENV).unwrap_or(defaults.height),
            ..defaults
        }
    }

    /// Positive size that also fits the engine's signed pixel coordinates.
    fn dimension(&self, key: &str) -> Option<u32> {
        self.env
            .var(key)
            .and_then(|s| s.trim().parse().ok())
            .filter(|v| (1..=MAX_DIMENSION).contains(v))
    }

    fn initial_document(&self) -> InitialDocument {
        match self.non_empty_var(START_URL_ENV) {
            Some(url) => InitialDocument::Url(url),
            None => InitialDocument::greeting(),
        }
    }

    fn non_empty_var(&self, key: &str) -> Option<String> {
        self.env.var(key).filter(|v| !v.trim().is_empty())
    }
}
