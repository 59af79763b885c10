// Form wizard step generator
use minijinja::Value;
use std::path::{Path, PathBuf};

use super::file_generator::{BatchReport, FileGenerator, FileSpec};
use super::variables::TemplateVariables;

const STEP_TEMPLATES: [&str; 5] = ["basic", "dates", "settings", "relationships", "review"];

pub struct EntityStepGenerator<'a> {
    files: &'a FileGenerator,
}

impl<'a> EntityStepGenerator<'a> {
    pub fn new(files: &'a FileGenerator) -> Self {
        Self { files }
    }

    /// Form config plus one file per wizard step, all under `output_dir`.
    /// Steps are generated even when the entity has nothing to show in them.
    pub fn manifest(&self, vars: &TemplateVariables, output_dir: &Path) -> Vec<FileSpec> {
        let context = Value::from_serialize(vars);
        let file = &vars.entity_file_name;

        let mut manifest = vec![FileSpec::render(
            "entity/components/form/entity-form-config.ts.jinja",
            output_dir.join(format!("{}-form-config.ts", file)),
            context.clone(),
        )];

        manifest.extend(STEP_TEMPLATES.iter().map(|step| {
            let output: PathBuf = output_dir
                .join("steps")
                .join(format!("{}-step-{}.tsx", file, step));
            FileSpec::render(
                format!("entity/components/form/steps/entity-step-{}.tsx.jinja", step),
                output,
                context.clone(),
            )
        }));

        manifest
    }

    pub async fn generate(&self, vars: &TemplateVariables, output_dir: &Path) -> BatchReport {
        let manifest = self.manifest(vars, output_dir);
        self.files.generate_files(&manifest).await
    }
}
