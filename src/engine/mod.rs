//! Engine Module - Recommendation and roadmap logic
//!
//! Pure, deterministic transformations with no I/O:
//! - Matcher: questionnaire answers -> ranked career recommendations
//! - Roadmap: career id -> static staged roadmap (total, with a generic template)
//! - Questionnaire: stage-gated progression producing the answers
//! - Catalog: interests, qualifications and future-plan options

pub mod catalog;
pub mod matcher;
pub mod questionnaire;
pub mod roadmap;
pub mod types;

pub use catalog::*;
pub use matcher::*;
pub use questionnaire::*;
pub use roadmap::*;
pub use types::*;
