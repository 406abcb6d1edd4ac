//! Top-level startup / run / shutdown sequence.

use std::sync::Arc;

use crate::args::ProcessArgs;
use crate::client::SupervisorClient;
use crate::config::{Environment, RuntimeConfigurator, SystemEnvironment};
use crate::engine::{Engine, ViewRequest};
use crate::error::SupervisorError;
use crate::role::{ProcessRole, ProcessRoleDispatcher};

/// Drives one engine instance from process start to exit status.
pub struct ApplicationSupervisor<E: Engine> {
    engine: E,
    env: Box<dyn Environment>,
}

impl<E: Engine> ApplicationSupervisor<E> {
    pub fn new(engine: E) -> Self {
        Self::with_environment(engine, Box::new(SystemEnvironment))
    }

    pub fn with_environment(engine: E, env: Box<dyn Environment>) -> Self {
        Self { engine, env }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run to completion and return the process exit status.
    ///
    /// Helper processes return the engine's exit code without touching any
    /// configuration.  The primary process returns 0 after the last view
    /// closes, or 1 if startup fails.
    pub fn run(&mut self, args: &ProcessArgs) -> i32 {
        if let ProcessRole::Secondary { exit_code } =
            ProcessRoleDispatcher::determine_role(&mut self.engine, args)
        {
            return exit_code;
        }

        tracing::info!("starting browser");
        match self.run_primary(args) {
            Ok(()) => {
                tracing::info!("browser closed successfully");
                0
            }
            Err(e) => {
                let cause = std::error::Error::source(&e)
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                tracing::error!(cause = %cause, "{e}");
                e.exit_code()
            }
        }
    }

    fn run_primary(&mut self, args: &ProcessArgs) -> Result<(), SupervisorError> {
        let config = RuntimeConfigurator::new(self.env.as_ref()).build_configuration(args);
        tracing::debug!(unrecognized = ?args.passthrough(), "arguments left to the engine");

        tracing::info!("initialising engine");
        self.engine.initialize(args, &config).map_err(SupervisorError::Initialization)?;

        let client = Arc::new(SupervisorClient::new(self.engine.loop_control()));
        let request = ViewRequest {
            url: config.initial_document.to_url(),
            window: config.window.clone(),
        };

        tracing::info!(title = %request.window.title, "creating browser window");
        if let Err(e) = self.engine.create_view(&request, client) {
            // No view will ever register, so the loop could never end.
            self.engine.shutdown();
            return Err(SupervisorError::ViewCreation(e));
        }

        tracing::info!("running message loop; close the window to exit");
        self.engine.run_message_loop();

        tracing::info!("shutting down engine");
        self.engine.shutdown();
        Ok(())
    }
}
