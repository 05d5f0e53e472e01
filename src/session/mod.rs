//! Session Module - Single source of truth for one user's session
//!
//! Architecture:
//! - Store: owned snapshot plus named mutation operations
//! - Latency: the simulated-backend seam
//! - Navigation: route guard over the current snapshot

pub mod latency;
pub mod navigation;
pub mod store;

pub use latency::*;
pub use navigation::*;
pub use store::*;
