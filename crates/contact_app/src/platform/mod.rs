pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
mod effects;
pub mod logging;
pub mod ui;
