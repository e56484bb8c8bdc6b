//! Doom fire simulation core
//!
//! `geometry` turns a pixel surface into a fixed-budget grid, `engine` runs the
//! flame automaton over it and `session` drives the engine from a frame clock.

pub mod engine;
pub mod geometry;
pub mod session;
pub mod wind;

pub use engine::FireEngine;
pub use geometry::GridGeometry;
pub use session::FireSession;
pub use wind::WindDirection;
