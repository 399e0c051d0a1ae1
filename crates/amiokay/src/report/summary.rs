use super::insights::generate_narrative;
use super::views::{ReportResult, StageEcho};
use crate::dataset::{LifeStageId, PopulationDataset, SymptomId};
use crate::engine::{
    match_specialists, project_severity, rank_prevalence, suggest_related, DEFAULT_LABEL_BUDGET,
    DEFAULT_MIN_SUPPORT, DEFAULT_SPECIALIST_LIMIT, DEFAULT_SUGGESTION_LIMIT,
};
use serde::Deserialize;
use std::collections::BTreeSet;

/// One completed quiz: the symptoms ticked and the life stage chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuizAnswers {
    #[serde(default)]
    pub symptom_ids: Vec<SymptomId>,
    #[serde(default)]
    pub life_stage_id: Option<LifeStageId>,
}

impl QuizAnswers {
    pub fn new(symptom_ids: Vec<SymptomId>, life_stage_id: Option<LifeStageId>) -> Self {
        Self {
            symptom_ids,
            life_stage_id,
        }
    }

    pub fn selected_set(&self) -> BTreeSet<SymptomId> {
        self.symptom_ids.iter().copied().collect()
    }

    /// Callers that present results must reject an empty selection; the
    /// engine itself accepts one.
    pub fn validate(&self) -> Result<(), AnswerError> {
        if self.symptom_ids.is_empty() {
            return Err(AnswerError::EmptySelection);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnswerError {
    #[error("select at least one symptom to build a report")]
    EmptySelection,
}

/// Tuning knobs for the ranking functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub min_support: usize,
    pub suggestion_limit: usize,
    pub specialist_limit: usize,
    pub label_budget: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            specialist_limit: DEFAULT_SPECIALIST_LIMIT,
            label_budget: DEFAULT_LABEL_BUDGET,
        }
    }
}

/// Borrows a dataset and turns quiz answers into a full report.
#[derive(Debug, Clone, Copy)]
pub struct ReportEngine<'a> {
    dataset: &'a PopulationDataset,
    settings: EngineSettings,
}

impl<'a> ReportEngine<'a> {
    pub fn new(dataset: &'a PopulationDataset, settings: EngineSettings) -> Self {
        Self { dataset, settings }
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    pub fn compute(&self, answers: &QuizAnswers) -> ReportResult {
        let dataset = self.dataset;
        let selected = answers.selected_set();

        let prevalence = rank_prevalence(
            &answers.symptom_ids,
            answers.life_stage_id,
            &dataset.prevalence_overall,
            &dataset.prevalence_by_stage,
        );
        let related = suggest_related(
            &selected,
            &dataset.cooccurrences,
            &dataset.prevalence_overall,
            self.settings.min_support,
            self.settings.suggestion_limit,
        );
        let specialists = match_specialists(
            &selected,
            &dataset.specialists,
            &dataset.prevalence_overall,
            self.settings.specialist_limit,
        );
        let severity = project_severity(&prevalence, &dataset.severity, self.settings.label_budget);

        let life_stage = answers.life_stage_id.map(|stage_id| StageEcho {
            stage_id,
            stage_name: dataset
                .life_stage(stage_id)
                .map(|stage| stage.stage_name.clone()),
        });
        let stage_name = life_stage
            .as_ref()
            .and_then(|echo| echo.stage_name.as_deref());
        let narrative = generate_narrative(&prevalence, &related, &specialists, stage_name);

        ReportResult {
            symptom_count: selected.len(),
            total_responses: dataset.stats.total_responses,
            life_stage,
            prevalence,
            related,
            specialists,
            severity,
            narrative,
        }
    }
}
