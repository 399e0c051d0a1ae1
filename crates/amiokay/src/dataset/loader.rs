use super::{DatasetTable, PopulationDataset};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Boundary to whatever delivers the precomputed tables.
pub trait DatasetSource {
    fn load(&self) -> Result<PopulationDataset, DatasetError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("required dataset table '{table}' is missing")]
    MissingTable { table: DatasetTable },
    #[error("failed to read dataset file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("dataset table '{table}' does not match its schema: {source}")]
    Parse {
        table: DatasetTable,
        #[source]
        source: serde_json::Error,
    },
    #[error("dataset bundle must be a JSON object keyed by table name: {0}")]
    Bundle(#[source] serde_json::Error),
}

/// Reads the export layout: one `<table>.json` file per table in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
}

impl JsonDirectorySource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_table(&self, table: DatasetTable) -> Result<Option<Value>, DatasetError> {
        let path = self.root.join(table.file_name());
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(DatasetError::Io { path, source }),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| DatasetError::Parse { table, source })
    }
}

impl DatasetSource for JsonDirectorySource {
    fn load(&self) -> Result<PopulationDataset, DatasetError> {
        debug!(root = %self.root.display(), "loading dataset directory");
        assemble(|table| self.read_table(table))
    }
}

/// A single JSON document whose top-level keys are the table names.
#[derive(Debug, Clone)]
pub struct JsonBundleSource {
    tables: Map<String, Value>,
}

impl JsonBundleSource {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let tables = serde_json::from_reader(reader).map_err(DatasetError::Bundle)?;
        Ok(Self { tables })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(io::BufReader::new(file))
    }
}

impl DatasetSource for JsonBundleSource {
    fn load(&self) -> Result<PopulationDataset, DatasetError> {
        assemble(|table| Ok(self.tables.get(table.key()).cloned()))
    }
}

fn assemble<F>(mut fetch: F) -> Result<PopulationDataset, DatasetError>
where
    F: FnMut(DatasetTable) -> Result<Option<Value>, DatasetError>,
{
    let dataset = PopulationDataset {
        quiz_structure: decode_table(&mut fetch, DatasetTable::QuizStructure)?,
        life_stages: decode_table(&mut fetch, DatasetTable::LifeStages)?,
        prevalence_overall: decode_table(&mut fetch, DatasetTable::PrevalenceOverall)?,
        prevalence_by_stage: decode_table(&mut fetch, DatasetTable::PrevalenceByStage)?,
        cooccurrences: decode_table(&mut fetch, DatasetTable::Cooccurrences)?,
        specialists: decode_table(&mut fetch, DatasetTable::Specialists)?,
        severity: decode_table(&mut fetch, DatasetTable::Severity)?,
        stats: decode_table(&mut fetch, DatasetTable::Stats)?,
    };

    debug!(
        symptoms = dataset.prevalence_overall.len(),
        life_stages = dataset.life_stages.len(),
        cooccurrences = dataset.cooccurrences.len(),
        specialists = dataset.specialists.len(),
        "dataset loaded"
    );

    Ok(dataset)
}

// `null` counts as absent so a bundle cannot satisfy a required table with it.
fn decode_table<T, F>(fetch: &mut F, table: DatasetTable) -> Result<T, DatasetError>
where
    T: DeserializeOwned + Default,
    F: FnMut(DatasetTable) -> Result<Option<Value>, DatasetError>,
{
    match fetch(table)?.filter(|value| !value.is_null()) {
        Some(value) => {
            serde_json::from_value(value).map_err(|source| DatasetError::Parse { table, source })
        }
        None if table.required() => Err(DatasetError::MissingTable { table }),
        None => Ok(T::default()),
    }
}
