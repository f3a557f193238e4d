//! Launcher: the single call from a parsed config into the application.

use anyhow::Result;
use tracing::error;

use crate::config::Config;
use crate::errors::IncubatorError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// 128 + SIGINT, as a shell reports a process killed by Ctrl-C.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Anything the launcher can run over an input and output path.
pub trait Runner {
    fn run(&self, input: &str, output: &str) -> Result<()>;
}

/// Call `runner.run(input, output)` once and map the outcome to an exit code.
///
/// A failure is logged as `Error: <message>` (full context chain) and yields
/// [`EXIT_FAILURE`]; the error itself is not inspected beyond logging.
pub fn launch<R: Runner + ?Sized>(runner: &R, cfg: &Config) -> i32 {
    match runner.run(&cfg.input, &cfg.output) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            match e.downcast_ref::<IncubatorError>() {
                Some(typed) => error!(code = typed.code(), "Error: {e:#}"),
                None => error!("Error: {e:#}"),
            }
            EXIT_FAILURE
        }
    }
}
