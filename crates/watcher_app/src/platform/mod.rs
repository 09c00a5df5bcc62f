//! Process wiring: logging, configuration and the runtime the engine runs on.
mod app;
mod config;
mod logging;

pub use app::run_app;
