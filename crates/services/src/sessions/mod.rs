mod plan;
mod progress;
mod service;
mod workflow;

// Public API of the study subsystem.
pub use crate::error::SessionError;
pub use plan::{SessionPlan, StudyCard};
pub use progress::SessionProgress;
pub use service::{Rating, StudySession, Tally};
pub use workflow::{SessionAnswerResult, SessionLoopService};
