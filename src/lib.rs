//! This crate contains a turn-based box-pushing puzzle game for the terminal.
//!
//! The puzzle rules live in [`engine`], fed by the [`loader`] which turns symbolic [`layout`]s into
//! playable levels on a fixed [`grid`]. The terminal front end built on Ratatui is a thin adapter
//! around the engine: it forwards movement, reset and advance commands and only reads state back
//! for rendering.

pub mod config;
pub mod engine;
pub mod grid;
pub mod layout;
pub mod loader;

mod app;
mod events;
mod file_loader;
mod timer;
mod types;
mod ui;

pub use app::App;
pub use config::Config;
