//! Subcue Core Library
//!
//! Subtitle preview engine whose output matches the offline burn-in pass.
//! This library contains the timing engine, the text formatting pipeline,
//! the font scaling model shared with the encoder, and the drag-to-position
//! controller, all composed by a single-threaded orchestrator.
//!
//! ## Layers
//!
//! - `core` holds the pure building blocks and the orchestrator.
//! - `ipc` holds the JSON command envelope, emitted events, and the
//!   payload handed to the burn-in backend.

pub mod core;
pub mod ipc;
