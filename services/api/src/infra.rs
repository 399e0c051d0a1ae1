use amiokay::config::AppConfig;
use amiokay::dataset::{DatasetSource, JsonDirectorySource, LifeStageId, PopulationDataset, SymptomId};
use amiokay::error::AppError;
use amiokay::report::ReportService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the dataset from `data_dir`, or from the configured directory when
/// no override is given, and wraps it in a service using configured settings.
pub(crate) fn build_service(
    config: &AppConfig,
    data_dir: Option<PathBuf>,
) -> Result<ReportService, AppError> {
    let data_dir = data_dir.unwrap_or_else(|| config.dataset.data_dir.clone());
    let dataset = load_dataset(data_dir)?;
    Ok(ReportService::new(Arc::new(dataset), config.engine))
}

pub(crate) fn load_dataset(data_dir: PathBuf) -> Result<PopulationDataset, AppError> {
    let source = JsonDirectorySource::new(data_dir);
    let dataset = source.load()?;
    info!(
        root = %source.root().display(),
        symptoms = dataset.prevalence_overall.len(),
        specialists = dataset.specialists.len(),
        "population dataset loaded"
    );
    Ok(dataset)
}

/// Parses one entry of a `--symptoms 1,3,8` list.
pub(crate) fn parse_symptom_id(raw: &str) -> Result<SymptomId, String> {
    raw.trim()
        .parse::<u32>()
        .map(SymptomId)
        .map_err(|err| format!("'{raw}' is not a symptom id ({err})"))
}

pub(crate) fn parse_life_stage(raw: &str) -> Result<LifeStageId, String> {
    raw.trim()
        .parse::<u32>()
        .map(LifeStageId)
        .map_err(|err| format!("'{raw}' is not a life stage id ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symptom_id_tolerates_spacing() {
        assert_eq!(parse_symptom_id(" 11 "), Ok(SymptomId(11)));
    }

    #[test]
    fn symptom_id_rejects_negative_values() {
        let err = parse_symptom_id("-1").expect_err("negative rejected");
        assert!(err.contains("'-1'"));
    }

    #[test]
    fn missing_directory_reports_the_first_required_table() {
        let err = load_dataset(PathBuf::from("/nonexistent/amiokay-data"))
            .expect_err("nothing to load");
        assert!(err.to_string().contains("life_stages"));
    }
}
