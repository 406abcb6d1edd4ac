//! CEF `App`: appends the configured switches to the browser process's
//! command line.

use cef::rc::Rc;
use cef::{wrap_app, App, CefString, CommandLine, ImplApp, ImplCommandLine, WrapApp};

use crate::settings::split_switch;

#[derive(Clone, Default)]
pub(crate) struct LanternApp {
    /// Switches for the browser process, without leading dashes.
    pub switches: Vec<String>,
}

wrap_app! {
    pub(crate) struct AppBuilder {
        app: LanternApp,
    }

    impl App {
        fn on_before_command_line_processing(
            &self,
            process_type: Option<&CefString>,
            command_line: Option<&mut CommandLine>,
        ) {
            // Helper processes receive their switches from the browser process.
            let is_browser = process_type.map(|t| t.to_string().is_empty()).unwrap_or(true);
            let Some(cmd) = command_line else { return };
            if !is_browser {
                return;
            }

            for flag in &self.app.switches {
                let (name, value) = split_switch(flag);
                let name: CefString = name.into();
                match value {
                    Some(value) => {
                        let value: CefString = value.into();
                        cmd.append_switch_with_value(Some(&name), Some(&value));
                    }
                    None => cmd.append_switch(Some(&name)),
                }
            }
        }
    }
}

impl AppBuilder {
    pub fn build(app: LanternApp) -> App {
        Self::new(app)
    }
}
