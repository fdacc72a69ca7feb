mod app;
mod commands;
mod config;
mod controller;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
