//! IPC (Inter-Process Communication) Module
//!
//! JSON command envelope accepted by the engine, the events it emits, and
//! the style payload handed to the burn-in backend.

mod dispatch;
mod events;
mod payloads;

pub use dispatch::*;
pub use events::*;
pub use payloads::*;
