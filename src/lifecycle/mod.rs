//! Two-phase module evaluation and after-evaluation hooks

mod scheduler;

pub use scheduler::{ConfiguredHook, EvaluationScheduler};
