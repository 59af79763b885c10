// File generation - renders templates (or copies files verbatim) into the
// output tree, isolating failures per file

use futures::future::join_all;
use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use serde::Serialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

use crate::error::{CodegenError, CodegenResult};

/// How a manifest entry turns its source into the output file.
#[derive(Debug, Clone)]
pub enum FileAction {
    /// Render the source as a template against this context
    Render(Value),
    /// Copy the source byte for byte
    Copy,
}

/// One manifest entry: a source under the template root and the file it produces.
#[derive(Debug, Clone)]
pub struct FileSpec {
    pub source: String,
    pub output: PathBuf,
    pub action: FileAction,
}

impl FileSpec {
    pub fn render(template: impl Into<String>, output: impl Into<PathBuf>, context: Value) -> Self {
        Self {
            source: template.into(),
            output: output.into(),
            action: FileAction::Render(context),
        }
    }

    pub fn copy(source: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            action: FileAction::Copy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Written,
    SkippedMissingTemplate,
}

/// What happened to every entry of one or more batches.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, CodegenError)>,
}

impl BatchReport {
    fn record(&mut self, output: &Path, result: CodegenResult<FileOutcome>) {
        match result {
            Ok(FileOutcome::Written) => self.written.push(output.to_path_buf()),
            Ok(FileOutcome::SkippedMissingTemplate) => self.skipped.push(output.to_path_buf()),
            Err(err) => self.failed.push((output.to_path_buf(), err)),
        }
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.written.extend(other.written);
        self.skipped.extend(other.skipped);
        self.failed.extend(other.failed);
    }

    /// Failures caused by the filesystem rather than by a template.
    pub fn io_failures(&self) -> impl Iterator<Item = &(PathBuf, CodegenError)> {
        self.failed.iter().filter(|(_, err)| err.is_io())
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

pub struct FileGenerator {
    templates_dir: PathBuf,
    env: Environment<'static>,
}

impl FileGenerator {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        let templates_dir = templates_dir.into();

        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(templates_dir.clone()));
        // Output is source code; HTML escaping would corrupt it
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_path_join_callback(join_relative);

        Self { templates_dir, env }
    }

    /// Render `template` into `output`. A template that does not exist is
    /// logged and skipped, never an error.
    pub async fn generate_file<S: Serialize>(
        &self,
        template: &str,
        output: &Path,
        context: &S,
    ) -> CodegenResult<FileOutcome> {
        if !self.source_exists(template).await {
            error!(
                "Template not found: {} (skipping {})",
                self.templates_dir.join(template).display(),
                output.display()
            );
            return Ok(FileOutcome::SkippedMissingTemplate);
        }

        let rendered = self
            .env
            .get_template(template)
            .and_then(|tmpl| tmpl.render(context))
            .map_err(|e| {
                CodegenError::Template(format!("{} -> {}: {:#}", template, output.display(), e))
            })?;

        write_file(output, rendered.as_bytes()).await?;
        info!("Generated {}", output.display());
        Ok(FileOutcome::Written)
    }

    /// Copy `source` verbatim into `output`, with the same missing-source policy
    /// as [`FileGenerator::generate_file`].
    pub async fn copy_file(&self, source: &str, output: &Path) -> CodegenResult<FileOutcome> {
        if !self.source_exists(source).await {
            error!(
                "Source file not found: {} (skipping {})",
                self.templates_dir.join(source).display(),
                output.display()
            );
            return Ok(FileOutcome::SkippedMissingTemplate);
        }

        if let Some(parent) = output.parent() {
            ensure_dir(parent).await?;
        }
        fs::copy(self.templates_dir.join(source), output)
            .await
            .map_err(|e| {
                CodegenError::Io(format!(
                    "Failed to copy {} to {}: {}",
                    source,
                    output.display(),
                    e
                ))
            })?;

        info!("Copied {}", output.display());
        Ok(FileOutcome::Written)
    }

    /// Process every entry of the manifest. Entries run concurrently and each
    /// has its own failure boundary, so one bad template never stops the rest.
    pub async fn generate_files(&self, specs: &[FileSpec]) -> BatchReport {
        let results = join_all(specs.iter().map(|spec| async move {
            let result = match &spec.action {
                FileAction::Render(context) => {
                    self.generate_file(&spec.source, &spec.output, context).await
                }
                FileAction::Copy => self.copy_file(&spec.source, &spec.output).await,
            };
            if let Err(err) = &result {
                error!("Failed to generate {}: {}", spec.output.display(), err);
            }
            result
        }))
        .await;

        let mut report = BatchReport::default();
        for (spec, result) in specs.iter().zip(results) {
            report.record(&spec.output, result);
        }

        if !report.skipped.is_empty() {
            warn!("{} file(s) skipped because their template is missing", report.skipped.len());
        }
        report
    }

    async fn source_exists(&self, source: &str) -> bool {
        fs::try_exists(self.templates_dir.join(source))
            .await
            .unwrap_or(false)
    }
}

/// Recursive, idempotent directory creation.
pub async fn ensure_dir(path: &Path) -> CodegenResult<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| {
            CodegenError::Io(format!("Failed to create directory {}: {}", path.display(), e))
        })
}

/// Write `contents` to `path`, creating missing ancestors and replacing any
/// existing file.
async fn write_file(path: &Path, contents: &[u8]) -> CodegenResult<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }
    fs::write(path, contents)
        .await
        .map_err(|e| CodegenError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

/// `./x` and `../x` in include/import/extends resolve against the including
/// template's directory; any other name is relative to the template root.
fn join_relative<'s>(name: &'s str, parent: &'s str) -> Cow<'s, str> {
    if !(name.starts_with("./") || name.starts_with("../")) {
        return Cow::Borrowed(name);
    }

    let mut segments: Vec<&str> = parent.split('/').collect();
    segments.pop();
    for segment in name.split('/') {
        match segment {
            "." | "" => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    Cow::Owned(segments.join("/"))
}
