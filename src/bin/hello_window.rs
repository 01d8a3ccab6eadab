//! Opens a window and clears it every frame. Escape closes it.

use std::process::ExitCode;

use learngl::{Error, abs::App, config::WindowConfig};

fn main() -> ExitCode {
    learngl::run_tutorial("hello_window", run)
}

fn run() -> Result<(), Error> {
    let mut app = App::new(&WindowConfig::load()?)?;
    app.run(|_, _| Ok(()))
}
