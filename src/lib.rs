//! # Triadic
//!
//! A terminal trainer for triads. Triadic shows a chord symbol with an
//! inversion, and the learner answers by holding keys on a two-octave
//! keyboard, typed as note names or played on a MIDI keyboard.
//!
//! The drill itself (task generation, exclusions, answer checking) lives in
//! `triadic-core`, which also builds for the web. This crate adds the
//! front end around it.
//!
//! ## Modules
//!
//! - `repl`: The interactive loop; multiplexes typed input, MIDI keys,
//!   options-file changes and the auto-advance timer.
//! - `commands`: REPL commands and the registry that dispatches them.
//! - `audio`: Sine chord playback via cpal and MIDI keyboard input via midir.
//! - `config`: Loading and saving drill options as JSON.
//! - `display`: Colored rendering of chords, the keyboard and feedback.

pub mod audio;
pub mod commands;
pub mod config;
pub mod display;
pub mod repl;

// Re-export commonly used types and functions for convenience
pub use crate::config::{load_options, save_options};
pub use crate::repl::{start, Repl, ReplConfig};
pub use triadic_core::{DrillOptions, SequenceMode, Session};
