//! Terminal host for the ragdesk core: CLI, configuration, logging, message loop.
mod app;
mod cli;
mod config;
mod documents;
mod effects;
mod input;
mod logging;
mod ui;

pub use app::run_app;
