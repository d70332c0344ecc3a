pub mod config;
pub mod model;

pub use config::Config;
pub use model::{direct_submission_count, Classified, ReleaseKind, SequenceRecord};
