use super::placeholder_name;
use crate::dataset::{LifeStage, LifeStageId, PrevalenceTable, StagePrevalenceTable, SymptomId};
use serde::Serialize;

pub const DEFAULT_TREND_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendEntry {
    pub rank: usize,
    pub symptom_id: SymptomId,
    pub symptom_name: String,
    pub percentage: f64,
    pub report_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTrend {
    pub stage_id: LifeStageId,
    pub stage_name: String,
    pub symptoms: Vec<TrendEntry>,
}

/// Most reported symptoms within each life stage, in catalog order.
///
/// Stages without statistics produce an empty list rather than being skipped.
pub fn top_symptoms_by_stage(
    life_stages: &[LifeStage],
    overall: &PrevalenceTable,
    by_stage: &StagePrevalenceTable,
    limit: usize,
) -> Vec<StageTrend> {
    life_stages
        .iter()
        .map(|stage| {
            let mut entries: Vec<_> = by_stage
                .get(&stage.stage_id)
                .map(|table| table.iter().collect())
                .unwrap_or_default();

            entries.sort_by(|(a_id, a), (b_id, b)| {
                b.percentage
                    .total_cmp(&a.percentage)
                    .then_with(|| b.report_count.cmp(&a.report_count))
                    .then_with(|| a_id.cmp(b_id))
            });

            let symptoms = entries
                .into_iter()
                .take(limit)
                .enumerate()
                .map(|(index, (id, entry))| TrendEntry {
                    rank: index + 1,
                    symptom_id: *id,
                    symptom_name: overall
                        .get(id)
                        .map(|overall| overall.symptom_name.clone())
                        .unwrap_or_else(|| placeholder_name(*id)),
                    percentage: entry.percentage,
                    report_count: entry.report_count,
                })
                .collect();

            StageTrend {
                stage_id: stage.stage_id,
                stage_name: stage.stage_name.clone(),
                symptoms,
            }
        })
        .collect()
}
