//! fm-project: formulation file format, validation and CSV exchange.

pub mod csv_io;
pub mod schema;
pub mod validate;

pub use csv_io::{export_ingredients, import_ingredients, read_csv, write_csv};
pub use schema::{Formulation, LATEST_VERSION};
pub use validate::{ValidationError, validate_formulation};

use fm_analysis::{needs_normalization, total_inclusion};
use std::path::Path;
use tracing::{debug, warn};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported file extension: {path}")]
    UnsupportedFormat { path: String },

    #[error("CSV file needs a header row and at least one data row")]
    EmptyCsv,

    #[error("CSV file has no name column")]
    MissingNameColumn,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Serialization chosen from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            _ => Err(ProjectError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

fn loaded(formulation: Formulation, path: &Path) -> ProjectResult<Formulation> {
    validate_formulation(&formulation)?;
    let total = total_inclusion(&formulation.ingredients);
    if !formulation.ingredients.is_empty() && needs_normalization(total) {
        warn!(path = %path.display(), total, "inclusions do not sum to 100%");
    }
    debug!(
        path = %path.display(),
        ingredients = formulation.ingredients.len(),
        enzymes = formulation.enzymes.len(),
        "formulation loaded"
    );
    Ok(formulation)
}

pub fn load_yaml(path: &Path) -> ProjectResult<Formulation> {
    let content = std::fs::read_to_string(path)?;
    let formulation: Formulation = serde_yaml::from_str(&content)?;
    loaded(formulation, path)
}

pub fn save_yaml(path: &Path, formulation: &Formulation) -> ProjectResult<()> {
    validate_formulation(formulation)?;
    let content = serde_yaml::to_string(formulation)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Formulation> {
    let content = std::fs::read_to_string(path)?;
    let formulation: Formulation = serde_json::from_str(&content)?;
    loaded(formulation, path)
}

pub fn save_json(path: &Path, formulation: &Formulation) -> ProjectResult<()> {
    validate_formulation(formulation)?;
    let content = serde_json::to_string_pretty(formulation)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load YAML or JSON depending on the extension.
pub fn load(path: &Path) -> ProjectResult<Formulation> {
    match FileFormat::from_path(path)? {
        FileFormat::Yaml => load_yaml(path),
        FileFormat::Json => load_json(path),
    }
}

/// Save YAML or JSON depending on the extension.
pub fn save(path: &Path, formulation: &Formulation) -> ProjectResult<()> {
    match FileFormat::from_path(path)? {
        FileFormat::Yaml => save_yaml(path, formulation),
        FileFormat::Json => save_json(path, formulation),
    }
}
