//! Creative idea assistant - turns a few keywords into ideas
//!
//! Sends a short prompt to Gemini's `generateContent` API, keeps the reply in
//! a small view state, and exports it by sharing the text or a rendered PDF.

pub mod ai;
pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod state;

pub use error::{Error, Result};
