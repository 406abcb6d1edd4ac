//! Process argument vector with Chromium-style switch lookup.
//!
//! The vector is shared with the engine, which classifies helper processes
//! from its own switches (`--type=renderer`, ...), so arguments are kept
//! verbatim and only queried here.

/// Opt into hardware acceleration (requires signed helper processes).
pub const ENABLE_GPU_SWITCH: &str = "enable-gpu";
/// Verbose engine logging.
pub const DEBUG_SWITCH: &str = "debug";

const RECOGNIZED_SWITCHES: [&str; 2] = [ENABLE_GPU_SWITCH, DEBUG_SWITCH];

/// Ordered process arguments, program name first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessArgs {
    args: Vec<String>,
}

impl ProcessArgs {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { args: args.into_iter().map(Into::into).collect() }
    }

    /// Arguments of the running process.  Non-UTF-8 arguments are converted
    /// lossily.
    pub fn from_env() -> Self {
        Self {
            args: std::env::args_os().map(|a| a.to_string_lossy().into_owned()).collect(),
        }
    }

    /// Every argument, program name included.
    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Whether `--name` or `--name=value` is present.
    pub fn has_switch(&self, name: &str) -> bool {
        self.switches().any(|(n, _)| n == name)
    }

    /// Value of the first `--name=value`.  A bare `--name` yields `Some("")`.
    pub fn switch_value(&self, name: &str) -> Option<&str> {
        self.switches().find(|(n, _)| *n == name).map(|(_, v)| v.unwrap_or(""))
    }

    /// Everything except the program name and the switches this supervisor
    /// consumes.  Informational only: the engine parses the full argument
    /// vector itself, so this list does not change what it receives.
    pub fn passthrough(&self) -> Vec<&str> {
        let mut after_terminator = false;
        self.args
            .iter()
            .skip(1)
            .filter(|arg| {
                if after_terminator {
                    return true;
                }
                if arg.as_str() == "--" {
                    after_terminator = true;
                    return true;
                }
                match parse_switch(arg) {
                    Some((name, _)) => !RECOGNIZED_SWITCHES.contains(&name),
                    None => true,
                }
            })
            .map(String::as_str)
            .collect()
    }

    fn switches(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.args
            .iter()
            .skip(1)
            .take_while(|arg| arg.as_str() != "--")
            .filter_map(|arg| parse_switch(arg))
    }
}

/// Split `--name[=value]` into its parts.  Single-dash and bare arguments
/// are not switches.
fn parse_switch(arg: &str) -> Option<(&str, Option<&str>)> {
    let body = arg.strip_prefix("--")?;
    if body.is_empty() {
        return None;
    }
    match body.split_once('=') {
        Some((name, value)) => Some((name, Some(value))),
        None => Some((body, None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> ProcessArgs {
        ProcessArgs::new(list.iter().copied())
    }

    #[test]
    fn program_name_is_never_a_switch() {
        let a = args(&["--debug"]);
        assert_eq!(a.program(), Some("--debug"));
        assert!(!a.has_switch("debug"));
    }

    #[test]
    fn finds_bare_and_valued_switches() {
        let a = args(&["lantern", "--enable-gpu", "--type=renderer"]);
        assert!(a.has_switch("enable-gpu"));
        assert_eq!(a.switch_value("type"), Some("renderer"));
        assert_eq!(a.switch_value("enable-gpu"), Some(""));
        assert_eq!(a.switch_value("debug"), None);
    }

    #[test]
    fn single_dash_is_not_a_switch() {
        let a = args(&["lantern", "-debug", "debug"]);
        assert!(!a.has_switch("debug"));
    }

    #[test]
    fn switches_stop_at_terminator() {
        let a = args(&["lantern", "--", "--debug"]);
        assert!(!a.has_switch("debug"));
        assert_eq!(a.passthrough(), vec!["--", "--debug"]);
    }

    #[test]
    fn passthrough_drops_only_recognized_switches() {
        let a = args(&[
            "lantern",
            "--debug",
            "--remote-debugging-port=9222",
            "--enable-gpu=1",
            "https://example.com",
        ]);
        assert_eq!(a.passthrough(), vec!["--remote-debugging-port=9222", "https://example.com"]);
    }
}
