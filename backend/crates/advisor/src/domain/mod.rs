//! Domain Layer
//!
//! - Completion service port
//! - Advisor prompt construction

pub mod completion;
pub mod prompt;
