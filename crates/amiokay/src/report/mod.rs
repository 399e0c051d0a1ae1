//! Turns one set of quiz answers into the full results payload.

mod insights;
pub mod router;
mod service;
mod summary;
pub mod views;

pub use router::report_router;
pub use service::ReportService;
pub use summary::{AnswerError, EngineSettings, QuizAnswers, ReportEngine};
pub use views::{QuizCatalogView, ReportNarrative, ReportResult, SpecialistNote, StageEcho};
