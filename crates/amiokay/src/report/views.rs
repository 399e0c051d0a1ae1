use crate::dataset::{AggregateStats, LifeStage, LifeStageId, QuizCategory};
use crate::engine::{PrevalenceRow, SeverityChartRow, SpecialistMatch, SuggestionRow};
use serde::Serialize;

/// The life stage the report was computed for, echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageEcho {
    pub stage_id: LifeStageId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialistNote {
    pub specialist_type: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportNarrative {
    pub headline: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    pub related_note: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specialist_notes: Vec<SpecialistNote>,
    pub disclaimer: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_stage: Option<StageEcho>,
    pub symptom_count: usize,
    pub total_responses: u64,
    pub prevalence: Vec<PrevalenceRow>,
    pub related: Vec<SuggestionRow>,
    pub specialists: Vec<SpecialistMatch>,
    pub severity: Vec<SeverityChartRow>,
    pub narrative: ReportNarrative,
}

/// Everything the quiz screens need before any answers exist.
#[derive(Debug, Clone, Serialize)]
pub struct QuizCatalogView {
    pub categories: Vec<QuizCategory>,
    pub life_stages: Vec<LifeStage>,
    pub stats: AggregateStats,
}
