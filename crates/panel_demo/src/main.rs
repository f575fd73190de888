//! Opens the demo window. Run with `RUST_LOG=debug` for verbose logging.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    match panel_demo::run(panel_demo::DemoOptions::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
