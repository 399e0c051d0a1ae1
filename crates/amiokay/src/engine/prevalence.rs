use super::placeholder_name;
use crate::dataset::{LifeStageId, PrevalenceTable, StagePrevalenceTable, SymptomId};
use serde::Serialize;
use std::collections::HashSet;

/// Which table supplied a row's effective percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrevalenceSource {
    LifeStage,
    Overall,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrevalenceRow {
    pub symptom_id: SymptomId,
    pub symptom_name: String,
    pub category_icon: String,
    /// Stage-specific share when available, otherwise the overall share.
    pub percentage: f64,
    pub overall_percentage: f64,
    pub source: PrevalenceSource,
}

/// Ranks the selected symptoms by how common they are for the chosen stage.
///
/// Duplicate ids collapse to their first occurrence. Rows are ordered by
/// effective percentage, highest first; equal percentages keep selection
/// order.
pub fn rank_prevalence(
    selected: &[SymptomId],
    stage: Option<LifeStageId>,
    overall: &PrevalenceTable,
    by_stage: &StagePrevalenceTable,
) -> Vec<PrevalenceRow> {
    let stage_table = stage.and_then(|stage| by_stage.get(&stage));
    let mut seen = HashSet::with_capacity(selected.len());

    let mut rows: Vec<PrevalenceRow> = selected
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .map(|id| {
            let entry = overall.get(&id);
            let stage_entry = stage_table.and_then(|table| table.get(&id));

            let (percentage, source) = match (stage_entry, entry) {
                (Some(stage_entry), _) => (stage_entry.percentage, PrevalenceSource::LifeStage),
                (None, Some(entry)) => (entry.percentage, PrevalenceSource::Overall),
                (None, None) => (0.0, PrevalenceSource::Missing),
            };

            PrevalenceRow {
                symptom_id: id,
                symptom_name: entry
                    .map(|entry| entry.symptom_name.clone())
                    .unwrap_or_else(|| placeholder_name(id)),
                category_icon: entry
                    .map(|entry| entry.category_icon.clone())
                    .unwrap_or_default(),
                percentage,
                overall_percentage: entry.map_or(0.0, |entry| entry.percentage),
                source,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    rows
}
