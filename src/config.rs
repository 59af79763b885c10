use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{CodegenError, CodegenResult};

pub const DEFINITIONS_DIR_VAR: &str = "CODEGEN_DEFINITIONS_DIR";
pub const TEMPLATES_DIR_VAR: &str = "CODEGEN_TEMPLATES_DIR";
pub const APP_DIR_VAR: &str = "CODEGEN_APP_DIR";

/// Locations the generator reads from and writes to. None of them has a
/// default; every path must be supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one `<EntityName>.json` per entity
    pub definitions_dir: PathBuf,
    /// Root that template paths are resolved against
    pub templates_dir: PathBuf,
    /// Application source root; generated pages land under `app/(protected)`
    pub app_dir: PathBuf,
}

impl Config {
    pub fn new(
        definitions_dir: impl Into<PathBuf>,
        templates_dir: impl Into<PathBuf>,
        app_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            definitions_dir: definitions_dir.into(),
            templates_dir: templates_dir.into(),
            app_dir: app_dir.into(),
        }
    }

    pub fn from_env() -> CodegenResult<Self> {
        Self::resolve(None, None, None)
    }

    /// Explicit paths win; anything not given is read from the environment.
    pub fn resolve(
        definitions_dir: Option<PathBuf>,
        templates_dir: Option<PathBuf>,
        app_dir: Option<PathBuf>,
    ) -> CodegenResult<Self> {
        let definitions_dir =
            definitions_dir.map_or_else(|| required_path(DEFINITIONS_DIR_VAR), Ok)?;
        let templates_dir = templates_dir.map_or_else(|| required_path(TEMPLATES_DIR_VAR), Ok)?;
        let app_dir = app_dir.map_or_else(|| required_path(APP_DIR_VAR), Ok)?;

        Ok(Self {
            definitions_dir,
            templates_dir,
            app_dir,
        })
    }

    /// Path of the definition file for `entity_name`.
    pub fn definition_path(&self, entity_name: &str) -> PathBuf {
        self.definitions_dir.join(format!("{}.json", entity_name))
    }

    /// Root of the authenticated route group that entity pages live in.
    pub fn protected_routes_dir(&self) -> PathBuf {
        self.app_dir.join("app").join("(protected)")
    }
}

fn required_path(var: &str) -> CodegenResult<PathBuf> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(PathBuf::from(value)),
        _ => Err(CodegenError::Configuration(format!(
            "{} must be set to a directory path",
            var
        ))),
    }
}
