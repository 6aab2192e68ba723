//! bf-project: network file format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_network};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Unsupported file extension: {path}")]
    UnknownFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn finish(file: NetworkFile) -> ProjectResult<NetworkFile> {
    let file = migrate_to_latest(file)?;
    validate_network(&file)?;
    Ok(file)
}

pub fn from_yaml_str(content: &str) -> ProjectResult<NetworkFile> {
    finish(serde_yaml::from_str(content)?)
}

pub fn from_json_str(content: &str) -> ProjectResult<NetworkFile> {
    finish(serde_json::from_str(content)?)
}

pub fn load_yaml(path: &Path) -> ProjectResult<NetworkFile> {
    from_yaml_str(&std::fs::read_to_string(path)?)
}

pub fn save_yaml(path: &Path, file: &NetworkFile) -> ProjectResult<()> {
    validate_network(file)?;
    let content = serde_yaml::to_string(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<NetworkFile> {
    from_json_str(&std::fs::read_to_string(path)?)
}

pub fn save_json(path: &Path, file: &NetworkFile) -> ProjectResult<()> {
    validate_network(file)?;
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a network file, picking the format from the extension (`.yaml`, `.yml`, `.json`).
pub fn load(path: &Path) -> ProjectResult<NetworkFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => load_yaml(path),
        Some("json") => load_json(path),
        _ => Err(ProjectError::UnknownFormat {
            path: path.display().to_string(),
        }),
    }
}
