use super::views::{ReportNarrative, SpecialistNote};
use crate::engine::{PrevalenceRow, PrevalenceSource, SpecialistMatch, SuggestionRow};

const DISCLAIMER: &str = "These figures describe how often symptoms are reported together by \
anonymous respondents. They are not a diagnosis; a clinician can help figure out what's going on.";

pub(crate) fn generate_narrative(
    prevalence: &[PrevalenceRow],
    related: &[SuggestionRow],
    specialists: &[SpecialistMatch],
    stage_name: Option<&str>,
) -> ReportNarrative {
    let headline = if prevalence.is_empty() {
        "Select a few symptoms to see how many others report the same thing.".to_string()
    } else {
        match prevalence.first().filter(|row| row.percentage >= 1.0) {
            Some(row) => format!(
                "You're not alone: {} of every 10 respondents{} report {}.",
                tenths(row.percentage),
                stage_phrase(row, stage_name),
                row.symptom_name.to_lowercase()
            ),
            None => "Your symptoms are more common than you think, and you're not alone."
                .to_string(),
        }
    };

    let observations = prevalence
        .iter()
        .map(|row| match row.source {
            PrevalenceSource::Missing => format!(
                "{}: not enough responses yet to compare",
                row.symptom_name
            ),
            _ => format!(
                "{}: reported by {:.0}% of respondents{}",
                row.symptom_name,
                row.percentage,
                stage_phrase(row, stage_name)
            ),
        })
        .collect();

    let related_note = if related.is_empty() {
        "No strong co-occurrences found.".to_string()
    } else {
        let names: Vec<&str> = related
            .iter()
            .map(|row| row.symptom_name.as_str())
            .collect();
        format!(
            "People who report your symptoms also commonly mention {}.",
            join_names(&names)
        )
    };

    let specialist_notes = specialists
        .iter()
        .map(|specialist| {
            let matched: Vec<&str> = specialist
                .matched_symptom_names
                .iter()
                .map(String::as_str)
                .filter(|name| !name.is_empty())
                .collect();
            let mut explanation = format!(
                "Based on your symptoms, {} {} could be a great next step.",
                article(&specialist.specialist_type),
                specialist.specialist_type
            );
            if !matched.is_empty() {
                explanation.push_str(&format!(
                    " They commonly help with {}.",
                    join_names(&matched).to_lowercase()
                ));
            }
            if !specialist.what_to_expect.is_empty() {
                explanation.push(' ');
                explanation.push_str(&specialist.what_to_expect);
            }

            SpecialistNote {
                specialist_type: specialist.specialist_type.clone(),
                explanation,
            }
        })
        .collect();

    ReportNarrative {
        headline,
        observations,
        related_note,
        specialist_notes,
        disclaimer: DISCLAIMER,
    }
}

fn stage_phrase(row: &PrevalenceRow, stage_name: Option<&str>) -> String {
    match (row.source, stage_name) {
        (PrevalenceSource::LifeStage, Some(name)) => format!(" in {name}"),
        _ => String::new(),
    }
}

// Whole "n in 10" count, never below 1 for a non-trivial share.
fn tenths(percentage: f64) -> u32 {
    ((percentage / 10.0).round() as u32).clamp(1, 10)
}

fn article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some(first) if "AEIOUaeiou".contains(first) => "an",
        _ => "a",
    }
}

fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{SpecialistId, SymptomId};

    fn row(id: u32, name: &str, percentage: f64, source: PrevalenceSource) -> PrevalenceRow {
        PrevalenceRow {
            symptom_id: SymptomId(id),
            symptom_name: name.to_string(),
            category_icon: String::new(),
            percentage,
            overall_percentage: percentage,
            source,
        }
    }

    #[test]
    fn observations_quote_stage_figures() {
        let rows = [
            row(3, "Painful cramps", 47.1, PrevalenceSource::LifeStage),
            row(9, "Hair thinning", 14.2, PrevalenceSource::Overall),
            row(40, "Symptom 40", 0.0, PrevalenceSource::Missing),
        ];
        let narrative = generate_narrative(&rows, &[], &[], Some("Adult (25-34)"));

        assert_eq!(
            narrative.headline,
            "You're not alone: 5 of every 10 respondents in Adult (25-34) report painful cramps."
        );
        assert_eq!(
            narrative.observations,
            vec![
                "Painful cramps: reported by 47% of respondents in Adult (25-34)",
                "Hair thinning: reported by 14% of respondents",
                "Symptom 40: not enough responses yet to compare",
            ]
        );
        assert_eq!(narrative.related_note, "No strong co-occurrences found.");
    }

    #[test]
    fn related_and_specialist_text_lists_names() {
        let related = [
            SuggestionRow {
                symptom_id: SymptomId(4),
                symptom_name: "PMS mood changes".to_string(),
                category_icon: String::new(),
                score: 55,
                support: 2,
            },
            SuggestionRow {
                symptom_id: SymptomId(6),
                symptom_name: "Insomnia".to_string(),
                category_icon: String::new(),
                score: 51,
                support: 2,
            },
        ];
        let specialist = SpecialistMatch {
            specialist_id: SpecialistId(1),
            specialist_type: "Endocrinologist".to_string(),
            description: String::new(),
            what_to_expect: "Expect blood work.".to_string(),
            icon: String::new(),
            score: 2,
            rank: 1,
            matched_symptom_ids: vec![SymptomId(8), SymptomId(5)],
            matched_symptom_names: vec!["Hormonal acne".to_string(), "Chronic fatigue".to_string()],
        };

        let narrative = generate_narrative(&[], &related, &[specialist], None);

        assert_eq!(
            narrative.related_note,
            "People who report your symptoms also commonly mention PMS mood changes and Insomnia."
        );
        assert_eq!(
            narrative.specialist_notes[0].explanation,
            "Based on your symptoms, an Endocrinologist could be a great next step. They commonly help with hormonal acne and chronic fatigue. Expect blood work."
        );
    }

    #[test]
    fn join_names_uses_serial_comma() {
        assert_eq!(join_names(&["A", "B", "C"]), "A, B, and C");
        assert_eq!(join_names(&["A"]), "A");
    }

    #[test]
    fn empty_selection_gets_prompt_headline() {
        let narrative = generate_narrative(&[], &[], &[], None);
        assert!(narrative.headline.starts_with("Select a few symptoms"));
        assert!(narrative.observations.is_empty());
    }
}
