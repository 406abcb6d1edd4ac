//! Primary / helper process classification.

use crate::args::ProcessArgs;
use crate::engine::Engine;

/// Role of the running process, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessRole {
    /// Owns the event loop and the UI.
    Primary,
    /// Engine helper process.  The engine's subprocess entry point has
    /// already run; the process must exit with `exit_code`.
    Secondary { exit_code: i32 },
}

impl ProcessRole {
    pub fn is_primary(self) -> bool {
        matches!(self, ProcessRole::Primary)
    }
}

/// Hands helper processes to the engine before anything else happens.
pub struct ProcessRoleDispatcher;

impl ProcessRoleDispatcher {
    /// Classify this process.  For a helper, the engine's subprocess logic
    /// runs to completion inside this call.
    pub fn determine_role<E: Engine + ?Sized>(engine: &mut E, args: &ProcessArgs) -> ProcessRole {
        match engine.execute_process(args) {
            Some(exit_code) => {
                tracing::debug!(exit_code, "secondary process exiting");
                ProcessRole::Secondary { exit_code }
            }
            None => ProcessRole::Primary,
        }
    }
}
