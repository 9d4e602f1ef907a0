#![forbid(unsafe_code)]

//! Core: cell geometry, language codes, and subscriber setup shared by the
//! tessel text engine.

pub mod geometry;
pub mod language;
pub mod logging;

pub use geometry::{LineBox, Point};
pub use language::Language;
