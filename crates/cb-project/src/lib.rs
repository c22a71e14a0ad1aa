//! cb-project: chiller case file format, validation and evaluation.

pub mod run;
pub mod schema;
pub mod validate;

pub use run::{CaseReport, run_case};
pub use schema::*;
pub use validate::{ValidationError, validate_case};

use cb_fluids::StandardTableRef;
use std::path::Path;

/// Newest case file version this crate reads and writes.
pub const LATEST_VERSION: u32 = 1;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported case file extension: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Fluid error: {0}")]
    Fluid(#[from] cb_fluids::FluidError),

    #[error("Process error: {0}")]
    Process(#[from] cb_process::ProcessError),
}

fn validate_standard(case: &CaseDef) -> Result<(), ValidationError> {
    validate_case(case, &StandardTableRef)
}

pub fn load_yaml(path: &Path) -> ProjectResult<CaseDef> {
    let content = std::fs::read_to_string(path)?;
    let case: CaseDef = serde_yaml::from_str(&content)?;
    validate_standard(&case)?;
    Ok(case)
}

pub fn save_yaml(path: &Path, case: &CaseDef) -> ProjectResult<()> {
    validate_standard(case)?;
    let content = serde_yaml::to_string(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<CaseDef> {
    let content = std::fs::read_to_string(path)?;
    let case: CaseDef = serde_json::from_str(&content)?;
    validate_standard(&case)?;
    Ok(case)
}

pub fn save_json(path: &Path, case: &CaseDef) -> ProjectResult<()> {
    validate_standard(case)?;
    let content = serde_json::to_string_pretty(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> ProjectResult<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("json") => Ok(Format::Json),
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Load a case, picking YAML or JSON from the file extension.
pub fn load_case(path: &Path) -> ProjectResult<CaseDef> {
    match format_of(path)? {
        Format::Yaml => load_yaml(path),
        Format::Json => load_json(path),
    }
}

/// Save a case, picking YAML or JSON from the file extension.
pub fn save_case(path: &Path, case: &CaseDef) -> ProjectResult<()> {
    match format_of(path)? {
        Format::Yaml => save_yaml(path, case),
        Format::Json => save_json(path, case),
    }
}
