//! Schema migration framework.

use crate::ProjectError;
use crate::schema::NetworkFile;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut file: NetworkFile) -> Result<NetworkFile, ProjectError> {
    while file.version < LATEST_VERSION {
        file = migrate_one_version(file)?;
    }
    Ok(file)
}

fn migrate_one_version(file: NetworkFile) -> Result<NetworkFile, ProjectError> {
    match file.version {
        0 => migrate_v0_to_v1(file),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files were written before the fluid backend was selectable; they
/// all used the liquid-water correlation, which is the field's default.
fn migrate_v0_to_v1(mut file: NetworkFile) -> Result<NetworkFile, ProjectError> {
    file.version = 1;
    Ok(file)
}
