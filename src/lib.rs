//! Pokedex Explorer - PokeAPI catalog browser built on tui-dispatch
//!
//! The binary wires terminal, event bus and effect handler; everything
//! else lives here so it can be tested without a terminal.

pub mod action;
pub mod api;
pub mod audio;
pub mod catalog;
pub mod components;
pub mod config;
pub mod display;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod sprite;
pub mod state;
