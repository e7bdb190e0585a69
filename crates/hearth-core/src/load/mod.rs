//! Cognitive-load scoring.
//!
//! Two independent scorers: a 0..=1 heuristic for individual tasks and a
//! per-member aggregation over free-text survey responses. Both are pure and
//! deterministic.

pub mod survey;
pub mod task;

pub use survey::{
    classify_task_type, resolve_answer_users, MemberLoad, SurveyBreakdown, TaskType,
};
pub use task::calculate_task_cognitive_load;
