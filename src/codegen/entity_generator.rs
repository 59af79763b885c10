// Per-entity page, component and action generator
use minijinja::Value;
use std::path::PathBuf;

use super::file_generator::{BatchReport, FileGenerator, FileSpec};
use super::variables::TemplateVariables;
use crate::config::Config;

pub struct EntityComponentGenerator<'a> {
    files: &'a FileGenerator,
    config: &'a Config,
}

impl<'a> EntityComponentGenerator<'a> {
    pub fn new(files: &'a FileGenerator, config: &'a Config) -> Self {
        Self { files, config }
    }

    /// `app/(protected)/<routePath>` for this entity
    pub fn route_dir(&self, vars: &TemplateVariables) -> PathBuf {
        self.config.protected_routes_dir().join(&vars.route_path)
    }

    /// Fixed list of pages, components and actions. Every entry is produced
    /// regardless of the entity's shape.
    pub fn manifest(&self, vars: &TemplateVariables) -> Vec<FileSpec> {
        let route_dir = self.route_dir(vars);
        let context = Value::from_serialize(vars);
        let file = &vars.entity_file_name;

        let entries: Vec<(&str, PathBuf)> = vec![
            // Routing pages
            ("entity/page.tsx.jinja", route_dir.join("page.tsx")),
            ("entity/layout.tsx.jinja", route_dir.join("layout.tsx")),
            ("entity/new/page.tsx.jinja", route_dir.join("new").join("page.tsx")),
            ("entity/[id]/page.tsx.jinja", route_dir.join("[id]").join("page.tsx")),
            (
                "entity/[id]/edit/page.tsx.jinja",
                route_dir.join("[id]").join("edit").join("page.tsx"),
            ),
            // CRUD components
            (
                "entity/components/entity-table.tsx.jinja",
                route_dir.join("components").join(format!("{}-table.tsx", file)),
            ),
            (
                "entity/components/entity-form.tsx.jinja",
                route_dir.join("components").join(format!("{}-form.tsx", file)),
            ),
            (
                "entity/components/entity-details.tsx.jinja",
                route_dir.join("components").join(format!("{}-details.tsx", file)),
            ),
            (
                "entity/components/entity-search-and-filters.tsx.jinja",
                route_dir.join("components").join(format!("{}-search-and-filters.tsx", file)),
            ),
            (
                "entity/components/entity-delete-dialog.tsx.jinja",
                route_dir.join("components").join(format!("{}-delete-dialog.tsx", file)),
            ),
            // Action handlers
            (
                "entity/actions/entity-actions.ts.jinja",
                route_dir.join("actions").join(format!("{}-actions.ts", file)),
            ),
            (
                "entity/actions/bulk-actions.ts.jinja",
                route_dir.join("actions").join("bulk-actions.ts"),
            ),
        ];

        entries
            .into_iter()
            .map(|(template, output)| FileSpec::render(template, output, context.clone()))
            .collect()
    }

    pub async fn generate(&self, vars: &TemplateVariables) -> BatchReport {
        let manifest = self.manifest(vars);
        self.files.generate_files(&manifest).await
    }
}
