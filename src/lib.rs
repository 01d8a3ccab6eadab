//! Small OpenGL tutorial programs and the pieces they share.
//!
//! Each binary under `src/bin` opens a window through [`abs::App`], builds a
//! [`abs::ShaderProgram`] and one or more [`abs::Mesh`]es, and draws them every frame.

use std::process::ExitCode;

pub mod abs;
pub mod config;
pub mod error;
pub mod logging;

pub use error::Error;

/// Runs a tutorial program body and turns its outcome into a process exit status.
pub fn run_tutorial(name: &str, body: impl FnOnce() -> Result<(), Error>) -> ExitCode {
    logging::init();
    log::info!("starting {name}");

    match body() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
