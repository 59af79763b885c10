// Next.js CRUD scaffolding - reads entity definitions and drives the
// shared, entity and step generators

pub mod entity_generator;
pub mod file_generator;
pub mod shared_generator;
pub mod step_generator;
pub mod utils;
pub mod variables;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::config::Config;
use crate::definition::EntityDefinition;
use crate::error::{CodegenError, CodegenResult};

use entity_generator::EntityComponentGenerator;
use file_generator::{BatchReport, FileGenerator};
use shared_generator::SharedComponentGenerator;
use step_generator::EntityStepGenerator;
use variables::{prepare_template_variables, TemplateVariables};

/// Entities that exist in the backend but are never generated here.
const BUILT_IN_ENTITIES: [&str; 2] = ["user", "authority"];

/// Main code generator orchestrator
pub struct NextJsGenerator {
    config: Config,
    files: FileGenerator,
}

impl NextJsGenerator {
    pub fn new(config: Config) -> Self {
        let files = FileGenerator::new(config.templates_dir.clone());
        Self { config, files }
    }

    /// Read and parse `<definitions>/<entity_name>.json`.
    pub async fn load_definition(&self, entity_name: &str) -> CodegenResult<EntityDefinition> {
        let path = self.config.definition_path(entity_name);
        let json = fs::read_to_string(&path).await.map_err(|e| {
            CodegenError::Definition(format!("Failed to read {}: {}", path.display(), e))
        })?;

        EntityDefinition::from_json(&json).map_err(|e| {
            CodegenError::Definition(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub async fn prepare(&self, entity_name: &str) -> CodegenResult<TemplateVariables> {
        let definition = self.load_definition(entity_name).await?;
        Ok(prepare_template_variables(entity_name, &definition))
    }

    /// Generate pages, components and actions for one entity. A missing or
    /// malformed definition is an error; template problems are reported per file.
    pub async fn generate_entity(&self, entity_name: &str) -> CodegenResult<BatchReport> {
        info!("Generating {}", entity_name);
        let vars = self.prepare(entity_name).await?;
        Ok(self.render_entity(&vars).await)
    }

    /// Generate the form wizard steps for one entity into `output_dir`.
    pub async fn generate_entity_steps(
        &self,
        entity_name: &str,
        output_dir: &Path,
    ) -> CodegenResult<BatchReport> {
        let vars = self.prepare(entity_name).await?;
        Ok(self.render_entity_steps(&vars, output_dir).await)
    }

    /// Entity files plus wizard steps in [`NextJsGenerator::steps_dir`], from
    /// a single read of the definition.
    pub async fn generate_entity_with_steps(
        &self,
        entity_name: &str,
    ) -> CodegenResult<BatchReport> {
        info!("Generating {} with form steps", entity_name);
        let vars = self.prepare(entity_name).await?;

        let mut report = self.render_entity(&vars).await;
        report.merge(self.render_entity_steps(&vars, &self.steps_dir(&vars)).await);
        Ok(report)
    }

    pub async fn render_entity(&self, vars: &TemplateVariables) -> BatchReport {
        let report = EntityComponentGenerator::new(&self.files, &self.config)
            .generate(vars)
            .await;

        info!(
            "{}: {} written, {} skipped, {} failed",
            vars.entity_name,
            report.written.len(),
            report.skipped.len(),
            report.failed.len()
        );
        report
    }

    pub async fn render_entity_steps(
        &self,
        vars: &TemplateVariables,
        output_dir: &Path,
    ) -> BatchReport {
        info!("Generating form steps for {} in {}", vars.entity_name, output_dir.display());
        EntityStepGenerator::new(&self.files)
            .generate(vars, output_dir)
            .await
    }

    /// Default location of the step files: next to the entity's form component.
    pub fn steps_dir(&self, vars: &TemplateVariables) -> PathBuf {
        EntityComponentGenerator::new(&self.files, &self.config)
            .route_dir(vars)
            .join("components")
            .join("form")
    }

    pub async fn generate_shared_components(&self) -> BatchReport {
        info!("Generating shared components");
        SharedComponentGenerator::new(&self.files, &self.config)
            .generate()
            .await
    }

    /// Shared components once, then every definition in listing order. The
    /// first definition that fails to load aborts the run.
    pub async fn generate_all(&self) -> CodegenResult<BatchReport> {
        self.generate_every_entity(false).await
    }

    /// [`NextJsGenerator::generate_all`], with wizard steps for every entity.
    pub async fn generate_all_with_steps(&self) -> CodegenResult<BatchReport> {
        self.generate_every_entity(true).await
    }

    async fn generate_every_entity(&self, with_steps: bool) -> CodegenResult<BatchReport> {
        let mut report = self.generate_shared_components().await;

        let entity_names = self.entity_names().await?;
        info!("Found {} entity definitions", entity_names.len());

        for entity_name in entity_names {
            let entity_report = if with_steps {
                self.generate_entity_with_steps(&entity_name).await?
            } else {
                self.generate_entity(&entity_name).await?
            };
            report.merge(entity_report);
        }

        Ok(report)
    }

    /// Names of all `*.json` definitions, in directory listing order.
    pub async fn entity_names(&self) -> CodegenResult<Vec<String>> {
        let dir = &self.config.definitions_dir;
        let mut entries = fs::read_dir(dir).await.map_err(|e| {
            CodegenError::Io(format!(
                "Failed to read definitions directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }

        Ok(names)
    }

    /// Check every definition without generating anything. Returns one
    /// message per problem; an empty list means the definitions are usable.
    pub async fn validate_definitions(&self) -> CodegenResult<Vec<String>> {
        let entity_names = self.entity_names().await?;
        let known: HashSet<String> = entity_names.iter().map(|name| name.to_lowercase()).collect();

        let mut errors = Vec::new();
        for entity_name in &entity_names {
            let definition = match self.load_definition(entity_name).await {
                Ok(definition) => definition,
                Err(err) => {
                    errors.push(err.to_string());
                    continue;
                }
            };

            for rel in &definition.relationships {
                let target = rel.other_entity_name.to_lowercase();
                let built_in = rel.relationship_with_built_in_entity
                    || BUILT_IN_ENTITIES.contains(&target.as_str());

                if !built_in && !known.contains(&target) {
                    errors.push(format!(
                        "Entity {} has relationship '{}' pointing to undefined entity {}",
                        entity_name,
                        rel.name(),
                        rel.other_entity_name
                    ));
                }
            }
        }

        if !errors.is_empty() {
            warn!("{} problem(s) found in entity definitions", errors.len());
        }
        Ok(errors)
    }
}
