//! Pure ranking and matching over the population dataset.
//!
//! Nothing in this module performs I/O, logs, or mutates its inputs. Missing
//! lookups resolve to documented defaults instead of errors.

mod prevalence;
mod related;
mod severity;
mod specialists;
mod trends;

pub use prevalence::{rank_prevalence, PrevalenceRow, PrevalenceSource};
pub use related::{suggest_related, SuggestionRow, DEFAULT_MIN_SUPPORT, DEFAULT_SUGGESTION_LIMIT};
pub use severity::{project_severity, truncate_label, SeverityChartRow, DEFAULT_LABEL_BUDGET};
pub use specialists::{match_specialists, SpecialistMatch, DEFAULT_SPECIALIST_LIMIT};
pub use trends::{top_symptoms_by_stage, StageTrend, TrendEntry, DEFAULT_TREND_LIMIT};

use crate::dataset::SymptomId;

/// Display name used when a symptom id is absent from the catalog tables.
pub fn placeholder_name(id: SymptomId) -> String {
    format!("Symptom {id}")
}
