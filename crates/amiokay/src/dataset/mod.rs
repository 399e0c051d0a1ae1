//! Precomputed population statistics consumed by the result engine.
//!
//! Every table is produced offline by the export job and delivered as flat
//! lookup structures. Field names follow the export layout so the JSON files
//! deserialize without an intermediate mapping step.

mod loader;

pub use loader::{DatasetError, DatasetSource, JsonBundleSource, JsonDirectorySource};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomId(pub u32);

impl fmt::Display for SymptomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LifeStageId(pub u32);

impl fmt::Display for LifeStageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialistId(pub u32);

/// A symptom as listed in the quiz catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSymptom {
    pub symptom_id: SymptomId,
    pub symptom_name: String,
    #[serde(default)]
    pub description: String,
}

/// Quiz display grouping. Only the catalog endpoint reads this table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizCategory {
    pub category_id: u32,
    pub category_name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub symptoms: Vec<QuizSymptom>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeStage {
    pub stage_id: LifeStageId,
    pub stage_name: String,
    #[serde(default)]
    pub age_range_start: Option<u8>,
    #[serde(default)]
    pub age_range_end: Option<u8>,
}

/// Share of all respondents reporting a symptom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrevalenceEntry {
    pub symptom_id: SymptomId,
    pub symptom_name: String,
    #[serde(default)]
    pub category_icon: String,
    #[serde(default)]
    pub report_count: u32,
    pub percentage: f64,
}

/// Share of respondents within one life stage reporting a symptom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagePrevalenceEntry {
    #[serde(default)]
    pub report_count: u32,
    pub percentage: f64,
}

/// Directional co-occurrence: of the people reporting `symptom_id_a`,
/// `co_occurrence_pct` percent also report `symptom_id_b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooccurrencePair {
    pub symptom_id_a: SymptomId,
    pub symptom_id_b: SymptomId,
    #[serde(default)]
    pub co_occurrence_count: u32,
    pub co_occurrence_pct: f64,
}

/// Severity ratings for a symptom. The three shares sum to at most 100; the
/// remainder selected the symptom without rating it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub pct_mild: f64,
    #[serde(default)]
    pub pct_moderate: f64,
    #[serde(default)]
    pub pct_severe: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialist {
    pub specialist_id: SpecialistId,
    pub specialist_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub what_to_expect: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub symptom_ids: Vec<SymptomId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    #[serde(default)]
    pub total_responses: u64,
}

pub type PrevalenceTable = BTreeMap<SymptomId, PrevalenceEntry>;
pub type StagePrevalenceTable = BTreeMap<LifeStageId, BTreeMap<SymptomId, StagePrevalenceEntry>>;
pub type SeverityTable = BTreeMap<SymptomId, SeverityBreakdown>;

/// The full set of lookup tables delivered by the data provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationDataset {
    pub quiz_structure: Vec<QuizCategory>,
    pub life_stages: Vec<LifeStage>,
    pub prevalence_overall: PrevalenceTable,
    pub prevalence_by_stage: StagePrevalenceTable,
    pub cooccurrences: Vec<CooccurrencePair>,
    pub specialists: Vec<Specialist>,
    pub severity: SeverityTable,
    pub stats: AggregateStats,
}

impl PopulationDataset {
    pub fn life_stage(&self, id: LifeStageId) -> Option<&LifeStage> {
        self.life_stages.iter().find(|stage| stage.stage_id == id)
    }
}

/// Names of the exported tables, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetTable {
    QuizStructure,
    LifeStages,
    PrevalenceOverall,
    PrevalenceByStage,
    Cooccurrences,
    Specialists,
    Severity,
    Stats,
}

impl DatasetTable {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::QuizStructure,
            Self::LifeStages,
            Self::PrevalenceOverall,
            Self::PrevalenceByStage,
            Self::Cooccurrences,
            Self::Specialists,
            Self::Severity,
            Self::Stats,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::QuizStructure => "quiz_structure",
            Self::LifeStages => "life_stages",
            Self::PrevalenceOverall => "prevalence_overall",
            Self::PrevalenceByStage => "prevalence_by_stage",
            Self::Cooccurrences => "cooccurrences",
            Self::Specialists => "specialists",
            Self::Severity => "severity",
            Self::Stats => "stats",
        }
    }

    /// Display-only tables may be absent; every other table is required.
    pub const fn required(self) -> bool {
        !matches!(self, Self::QuizStructure | Self::Stats)
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.key())
    }
}

impl fmt::Display for DatasetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
