use crate::infra::{build_service, parse_life_stage, parse_symptom_id};
use amiokay::config::AppConfig;
use amiokay::dataset::{LifeStageId, SymptomId};
use amiokay::engine::{PrevalenceSource, StageTrend, DEFAULT_TREND_LIMIT};
use amiokay::error::AppError;
use amiokay::report::{QuizAnswers, ReportResult};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

const DEMO_SYMPTOMS: [u32; 5] = [1, 3, 5, 8, 11];
const DEMO_STAGE: u32 = 3;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Comma separated symptom ids, e.g. 1,3,8
    #[arg(long, required = true, value_delimiter = ',', value_parser = parse_symptom_id)]
    pub(crate) symptoms: Vec<SymptomId>,
    /// Life stage id used for stage-specific prevalence
    #[arg(long, value_parser = parse_life_stage)]
    pub(crate) stage: Option<LifeStageId>,
    /// Directory holding the exported dataset (defaults to APP_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TrendsArgs {
    /// Directory holding the exported dataset (defaults to APP_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Symptoms listed per life stage
    #[arg(long, default_value_t = DEFAULT_TREND_LIMIT)]
    pub(crate) limit: usize,
    /// Print the listing as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Directory holding the exported dataset (defaults to APP_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        symptoms,
        stage,
        data_dir,
        json,
    } = args;

    let config = AppConfig::load()?;
    let service = build_service(&config, data_dir)?;
    let report = service.report(&QuizAnswers::new(symptoms, stage))?;

    if json {
        print_json(&report)
    } else {
        render_report(&report);
        Ok(())
    }
}

pub(crate) fn run_trends(args: TrendsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config, args.data_dir)?;
    let trends = service.trends(args.limit);

    if args.json {
        print_json(&trends)
    } else {
        render_trends(&trends);
        Ok(())
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config, args.data_dir)?;

    let answers = QuizAnswers::new(
        DEMO_SYMPTOMS.into_iter().map(SymptomId).collect(),
        Some(LifeStageId(DEMO_STAGE)),
    );

    println!("Symptom quiz demo");
    println!(
        "Sample answers: symptoms {:?}, life stage {}",
        DEMO_SYMPTOMS, DEMO_STAGE
    );
    println!();
    let report = service.report(&answers)?;
    render_report(&report);

    println!();
    render_trends(&service.trends(3));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value).map_err(std::io::Error::from)?;
    writeln!(handle)?;
    Ok(())
}

fn render_report(report: &ReportResult) {
    let stage = report
        .life_stage
        .as_ref()
        .map(|stage| match &stage.stage_name {
            Some(name) => name.clone(),
            None => format!("life stage {}", stage.stage_id),
        })
        .unwrap_or_else(|| "all life stages".to_string());

    println!(
        "Symptom report for {} ({} symptoms, {} responses)",
        stage, report.symptom_count, report.total_responses
    );
    println!("{}", report.narrative.headline);

    println!("\nHow common are your symptoms");
    for (index, row) in report.prevalence.iter().enumerate() {
        let basis = match row.source {
            PrevalenceSource::LifeStage => "your life stage",
            PrevalenceSource::Overall => "all respondents",
            PrevalenceSource::Missing => "no data",
        };
        println!(
            "  {}. {} {} | {:.1}% ({})",
            index + 1,
            row.category_icon,
            row.symptom_name,
            row.percentage,
            basis
        );
    }

    println!("\nOften reported alongside");
    if report.related.is_empty() {
        println!("  - {}", report.narrative.related_note);
    }
    for row in &report.related {
        println!(
            "  - {} {} | {}% across {} of your symptoms",
            row.category_icon, row.symptom_name, row.score, row.support
        );
    }

    println!("\nWho could help");
    if report.specialists.is_empty() {
        println!("  - No specialist covers this selection yet.");
    }
    for specialist in &report.specialists {
        println!(
            "  #{} {} {} ({} matching: {})",
            specialist.rank,
            specialist.icon,
            specialist.specialist_type,
            specialist.score,
            specialist.matched_symptom_names.join(", ")
        );
    }
    for note in &report.narrative.specialist_notes {
        println!("    {}", note.explanation);
    }

    println!("\nSeverity reported by others");
    for row in &report.severity {
        println!(
            "  {:<20} mild {:>3.0}% | moderate {:>3.0}% | severe {:>3.0}%",
            row.label, row.mild, row.moderate, row.severe
        );
    }

    if !report.narrative.observations.is_empty() {
        println!("\nNotes");
        for observation in &report.narrative.observations {
            println!("  - {observation}");
        }
    }

    println!("\n{}", report.narrative.disclaimer);
}

fn render_trends(trends: &[StageTrend]) {
    println!("Most reported symptoms by life stage");
    for stage in trends {
        println!("- {}", stage.stage_name);
        if stage.symptoms.is_empty() {
            println!("    not enough responses yet");
        }
        for entry in &stage.symptoms {
            println!(
                "    {}. {} | {:.1}% ({} reports)",
                entry.rank, entry.symptom_name, entry.percentage, entry.report_count
            );
        }
    }
}
