use super::placeholder_name;
use crate::dataset::{CooccurrencePair, PrevalenceTable, SymptomId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_MIN_SUPPORT: usize = 2;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// A symptom the user did not select that co-occurs with their selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionRow {
    pub symptom_id: SymptomId,
    pub symptom_name: String,
    pub category_icon: String,
    /// Mean co-occurrence percentage across supporting symptoms, rounded.
    pub score: u32,
    /// Number of distinct selected symptoms providing evidence.
    pub support: usize,
}

/// Evidence for one candidate, keyed by the selected symptom it came from.
#[derive(Debug, Default)]
struct Evidence {
    // selected -> candidate rows
    forward: BTreeMap<SymptomId, f64>,
    // candidate -> selected rows
    reverse: BTreeMap<SymptomId, f64>,
}

impl Evidence {
    /// One percentage per selected source, preferring the selected -> candidate
    /// direction when the table stores both.
    fn contributions(&self) -> impl Iterator<Item = f64> + '_ {
        self.forward.values().copied().chain(
            self.reverse
                .iter()
                .filter(|(source, _)| !self.forward.contains_key(*source))
                .map(|(_, pct)| *pct),
        )
    }
}

/// Aggregates co-occurrence evidence for symptoms outside the selection.
///
/// A candidate needs evidence from at least `min_support` distinct selected
/// symptoms. Candidates are ranked by mean percentage, highest first, with
/// ties broken by symptom id, and the first `top_n` are returned.
pub fn suggest_related(
    selected: &BTreeSet<SymptomId>,
    pairs: &[CooccurrencePair],
    overall: &PrevalenceTable,
    min_support: usize,
    top_n: usize,
) -> Vec<SuggestionRow> {
    let mut evidence: BTreeMap<SymptomId, Evidence> = BTreeMap::new();

    for pair in pairs {
        let a_selected = selected.contains(&pair.symptom_id_a);
        let b_selected = selected.contains(&pair.symptom_id_b);

        match (a_selected, b_selected) {
            (true, false) => {
                evidence
                    .entry(pair.symptom_id_b)
                    .or_default()
                    .forward
                    .entry(pair.symptom_id_a)
                    .or_insert(pair.co_occurrence_pct);
            }
            (false, true) => {
                evidence
                    .entry(pair.symptom_id_a)
                    .or_default()
                    .reverse
                    .entry(pair.symptom_id_b)
                    .or_insert(pair.co_occurrence_pct);
            }
            _ => {}
        }
    }

    let mut ranked: Vec<(SymptomId, f64, usize)> = evidence
        .iter()
        .filter_map(|(candidate, evidence)| {
            let (sum, support) = evidence
                .contributions()
                .fold((0.0, 0usize), |(sum, count), pct| (sum + pct, count + 1));
            if support == 0 || support < min_support {
                return None;
            }
            Some((*candidate, sum / support as f64, support))
        })
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(id, mean, support)| {
            let entry = overall.get(&id);
            SuggestionRow {
                symptom_id: id,
                symptom_name: entry
                    .map(|entry| entry.symptom_name.clone())
                    .unwrap_or_else(|| placeholder_name(id)),
                category_icon: entry
                    .map(|entry| entry.category_icon.clone())
                    .unwrap_or_default(),
                score: mean.round().max(0.0) as u32,
                support,
            }
        })
        .collect()
}
