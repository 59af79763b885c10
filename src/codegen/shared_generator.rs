// App-wide components written once per run
use minijinja::Value;
use serde::Serialize;

use super::file_generator::{BatchReport, FileGenerator, FileSpec};
use crate::config::Config;

/// Variables available to the shared templates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedVariables {
    pub generator_name: &'static str,
    pub generator_version: &'static str,
}

impl Default for SharedVariables {
    fn default() -> Self {
        Self {
            generator_name: env!("CARGO_PKG_NAME"),
            generator_version: env!("CARGO_PKG_VERSION"),
        }
    }
}

pub struct SharedComponentGenerator<'a> {
    files: &'a FileGenerator,
    config: &'a Config,
}

impl<'a> SharedComponentGenerator<'a> {
    pub fn new(files: &'a FileGenerator, config: &'a Config) -> Self {
        Self { files, config }
    }

    pub fn manifest(&self) -> Vec<FileSpec> {
        let app = &self.config.app_dir;
        let context = Value::from_serialize(SharedVariables::default());

        vec![
            FileSpec::render(
                "shared/components/toast-provider.tsx.jinja",
                app.join("components").join("toast-provider.tsx"),
                context.clone(),
            ),
            FileSpec::render(
                "shared/components/auth/permission-guard.tsx.jinja",
                app.join("components").join("auth").join("permission-guard.tsx"),
                context,
            ),
            // Not per-entity, copied as they are
            FileSpec::copy("shared/lib/utils.ts", app.join("lib").join("utils.ts")),
            FileSpec::copy(
                "shared/hooks/use-debounce.ts",
                app.join("hooks").join("use-debounce.ts"),
            ),
        ]
    }

    /// Rewrites the same fixed files on every call.
    pub async fn generate(&self) -> BatchReport {
        let manifest = self.manifest();
        self.files.generate_files(&manifest).await
    }
}
