use super::PrevalenceRow;
use crate::dataset::{SeverityTable, SymptomId};
use serde::Serialize;

pub const DEFAULT_LABEL_BUDGET: usize = 20;

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityChartRow {
    pub symptom_id: SymptomId,
    pub symptom_name: String,
    pub label: String,
    pub mild: f64,
    pub moderate: f64,
    pub severe: f64,
}

/// Attaches severity shares to already ranked prevalence rows, keeping their
/// order. Each missing share defaults to 0.
pub fn project_severity(
    rows: &[PrevalenceRow],
    severity: &SeverityTable,
    label_budget: usize,
) -> Vec<SeverityChartRow> {
    rows.iter()
        .map(|row| {
            let breakdown = severity.get(&row.symptom_id);
            SeverityChartRow {
                symptom_id: row.symptom_id,
                symptom_name: row.symptom_name.clone(),
                label: truncate_label(&row.symptom_name, label_budget),
                mild: breakdown.map_or(0.0, |b| b.pct_mild),
                moderate: breakdown.map_or(0.0, |b| b.pct_moderate),
                severe: breakdown.map_or(0.0, |b| b.pct_severe),
            }
        })
        .collect()
}

/// Shortens `name` to at most `budget` characters, ending with `…` when cut.
///
/// Counts characters rather than bytes. A budget of zero behaves like one.
pub fn truncate_label(name: &str, budget: usize) -> String {
    let budget = budget.max(1);
    if name.chars().count() <= budget {
        return name.to_string();
    }

    let prefix: String = name.chars().take(budget - 1).collect();
    let mut label = prefix.trim_end().to_string();
    label.push(ELLIPSIS);
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SeverityBreakdown;
    use crate::engine::PrevalenceSource;

    fn row(id: u32, name: &str) -> PrevalenceRow {
        PrevalenceRow {
            symptom_id: SymptomId(id),
            symptom_name: name.to_string(),
            category_icon: String::new(),
            percentage: 10.0,
            overall_percentage: 10.0,
            source: PrevalenceSource::Overall,
        }
    }

    #[test]
    fn keeps_order_and_defaults_missing_shares() {
        let severity = SeverityTable::from([(
            SymptomId(2),
            SeverityBreakdown {
                total: 10,
                pct_mild: 20.0,
                pct_moderate: 30.0,
                pct_severe: 40.0,
            },
        )]);
        let rows = [row(2, "Anxiety"), row(7, "Brain fog")];
        let chart = project_severity(&rows, &severity, DEFAULT_LABEL_BUDGET);

        assert_eq!(chart[0].symptom_id, SymptomId(2));
        assert_eq!((chart[0].mild, chart[0].moderate, chart[0].severe), (20.0, 30.0, 40.0));
        assert_eq!(chart[1].symptom_id, SymptomId(7));
        assert_eq!((chart[1].mild, chart[1].moderate, chart[1].severe), (0.0, 0.0, 0.0));
    }

    #[test]
    fn short_names_are_untouched() {
        assert_eq!(truncate_label("Insomnia", 20), "Insomnia");
        assert_eq!(truncate_label("Exactly ten", 11), "Exactly ten");
    }

    #[test]
    fn long_names_keep_prefix_and_fit_budget() {
        let name = "Difficulty losing weight";
        let label = truncate_label(name, 12);
        assert_eq!(label, "Difficulty…");
        assert!(label.chars().count() <= 12);
        assert!(name.starts_with(label.trim_end_matches(ELLIPSIS)));
    }

    #[test]
    fn truncation_counts_characters() {
        let label = truncate_label("Ménopause précoce", 6);
        assert_eq!(label, "Ménop…");
    }

    #[test]
    fn zero_budget_still_marks_truncation() {
        assert_eq!(truncate_label("Anxiety", 0), "…");
    }
}
