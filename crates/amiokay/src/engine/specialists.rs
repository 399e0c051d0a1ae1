use crate::dataset::{PrevalenceTable, Specialist, SpecialistId, SymptomId};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

pub const DEFAULT_SPECIALIST_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialistMatch {
    pub specialist_id: SpecialistId,
    pub specialist_type: String,
    pub description: String,
    pub what_to_expect: String,
    pub icon: String,
    /// Number of selected symptoms this specialist covers.
    pub score: usize,
    /// Competition rank: equal scores share a rank and the next rank skips.
    pub rank: usize,
    pub matched_symptom_ids: Vec<SymptomId>,
    pub matched_symptom_names: Vec<String>,
}

/// Ranks specialists by how many selected symptoms fall in their set.
///
/// Specialists with no match are dropped. Equal scores keep catalog order.
pub fn match_specialists(
    selected: &BTreeSet<SymptomId>,
    specialists: &[Specialist],
    overall: &PrevalenceTable,
    top_n: usize,
) -> Vec<SpecialistMatch> {
    let mut scored: Vec<(&Specialist, Vec<SymptomId>)> = specialists
        .iter()
        .filter_map(|specialist| {
            let mut seen = HashSet::new();
            let matched: Vec<SymptomId> = specialist
                .symptom_ids
                .iter()
                .copied()
                .filter(|id| selected.contains(id) && seen.insert(*id))
                .collect();
            (!matched.is_empty()).then_some((specialist, matched))
        })
        .collect();

    scored.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    scored.truncate(top_n);

    let scores: Vec<usize> = scored.iter().map(|(_, matched)| matched.len()).collect();

    scored
        .into_iter()
        .map(|(specialist, matched)| {
            let score = matched.len();
            let rank = 1 + scores.iter().filter(|other| **other > score).count();
            let matched_symptom_names = matched
                .iter()
                .map(|id| {
                    overall
                        .get(id)
                        .map(|entry| entry.symptom_name.clone())
                        .unwrap_or_default()
                })
                .collect();

            SpecialistMatch {
                specialist_id: specialist.specialist_id,
                specialist_type: specialist.specialist_type.clone(),
                description: specialist.description.clone(),
                what_to_expect: specialist.what_to_expect.clone(),
                icon: specialist.icon.clone(),
                score,
                rank,
                matched_symptom_ids: matched,
                matched_symptom_names,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::PrevalenceEntry;

    fn specialist(id: u32, name: &str, symptoms: &[u32]) -> Specialist {
        Specialist {
            specialist_id: SpecialistId(id),
            specialist_type: name.to_string(),
            description: String::new(),
            what_to_expect: String::new(),
            icon: String::new(),
            symptom_ids: symptoms.iter().copied().map(SymptomId).collect(),
        }
    }

    fn selection(ids: &[u32]) -> BTreeSet<SymptomId> {
        ids.iter().copied().map(SymptomId).collect()
    }

    fn names() -> PrevalenceTable {
        [(1, "Heavy periods"), (2, "Irregular cycles")]
            .into_iter()
            .map(|(id, name)| {
                (
                    SymptomId(id),
                    PrevalenceEntry {
                        symptom_id: SymptomId(id),
                        symptom_name: name.to_string(),
                        category_icon: String::new(),
                        report_count: 0,
                        percentage: 0.0,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn orders_by_match_count() {
        let catalog = [specialist(2, "Y", &[1]), specialist(1, "X", &[1, 2, 3])];
        let matches = match_specialists(&selection(&[1, 2]), &catalog, &names(), 3);

        let order: Vec<(&str, usize, usize)> = matches
            .iter()
            .map(|m| (m.specialist_type.as_str(), m.score, m.rank))
            .collect();
        assert_eq!(order, vec![("X", 2, 1), ("Y", 1, 2)]);
        assert_eq!(
            matches[0].matched_symptom_names,
            vec!["Heavy periods", "Irregular cycles"]
        );
    }

    #[test]
    fn drops_zero_matches_and_respects_limit() {
        let catalog = [
            specialist(1, "A", &[1]),
            specialist(2, "B", &[2]),
            specialist(3, "C", &[1, 2]),
            specialist(4, "D", &[9]),
        ];
        let matches = match_specialists(&selection(&[1, 2]), &catalog, &names(), 2);

        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.score > 0));
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(matches[0].specialist_type, "C");
    }

    #[test]
    fn ties_share_rank() {
        let catalog = [
            specialist(1, "A", &[1]),
            specialist(2, "B", &[2]),
            specialist(3, "C", &[1, 2]),
        ];
        let matches = match_specialists(&selection(&[1, 2]), &catalog, &names(), 3);
        let ranks: Vec<usize> = matches.iter().map(|m| m.rank).collect();
        assert_eq!(ranks, vec![1, 2, 2]);
    }

    #[test]
    fn unknown_symptom_name_resolves_to_empty() {
        let catalog = [specialist(1, "A", &[1, 50])];
        let matches = match_specialists(&selection(&[1, 50]), &catalog, &names(), 3);
        assert_eq!(matches[0].matched_symptom_names, vec!["Heavy periods", ""]);
    }

    #[test]
    fn repeated_catalog_ids_count_once() {
        let catalog = [specialist(1, "A", &[1, 1, 1])];
        let matches = match_specialists(&selection(&[1]), &catalog, &names(), 3);
        assert_eq!(matches[0].score, 1);
    }

    #[test]
    fn unknown_selection_matches_nothing() {
        let catalog = [specialist(1, "A", &[1, 2])];
        assert!(match_specialists(&selection(&[404]), &catalog, &names(), 3).is_empty());
    }
}
