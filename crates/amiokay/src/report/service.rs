use super::summary::{AnswerError, EngineSettings, QuizAnswers, ReportEngine};
use super::views::{QuizCatalogView, ReportResult};
use crate::dataset::PopulationDataset;
use crate::engine::{top_symptoms_by_stage, StageTrend};
use std::sync::Arc;
use tracing::debug;

/// Holds the loaded dataset and serves reports for the HTTP layer and CLI.
#[derive(Debug, Clone)]
pub struct ReportService {
    dataset: Arc<PopulationDataset>,
    settings: EngineSettings,
}

impl ReportService {
    pub fn new(dataset: Arc<PopulationDataset>, settings: EngineSettings) -> Self {
        Self { dataset, settings }
    }

    pub fn dataset(&self) -> &PopulationDataset {
        &self.dataset
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    pub fn report(&self, answers: &QuizAnswers) -> Result<ReportResult, AnswerError> {
        answers.validate()?;
        debug!(
            symptoms = answers.symptom_ids.len(),
            life_stage = ?answers.life_stage_id,
            "computing symptom report"
        );
        Ok(ReportEngine::new(&self.dataset, self.settings).compute(answers))
    }

    pub fn catalog(&self) -> QuizCatalogView {
        QuizCatalogView {
            categories: self.dataset.quiz_structure.clone(),
            life_stages: self.dataset.life_stages.clone(),
            stats: self.dataset.stats,
        }
    }

    pub fn trends(&self, limit: usize) -> Vec<StageTrend> {
        top_symptoms_by_stage(
            &self.dataset.life_stages,
            &self.dataset.prevalence_overall,
            &self.dataset.prevalence_by_stage,
            limit,
        )
    }
}
