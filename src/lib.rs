//! Career Compass
//!
//! Logic core of a career-onboarding assistant:
//! - Stage-gated onboarding questionnaire
//! - Rule-based career recommendations
//! - Static staged roadmaps per career
//! - In-memory session store with simulated backend latency

pub mod api;
pub mod config;
pub mod engine;
pub mod session;

pub use engine::*;
pub use session::*;
