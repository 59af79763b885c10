// nextjs-codegen - scaffold CRUD pages for one entity, or for every
// definition in the definitions directory

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nextjs_codegen::config::{APP_DIR_VAR, DEFINITIONS_DIR_VAR, TEMPLATES_DIR_VAR};
use nextjs_codegen::{Config, NextJsGenerator};

#[derive(Debug, Parser)]
#[command(
    name = "nextjs-codegen",
    version,
    about = "Generate Next.js CRUD UI from entity definitions"
)]
struct Cli {
    /// Entity to generate; every definition is generated when omitted
    entity: Option<String>,

    /// Directory with one <EntityName>.json per entity
    #[arg(long, env = DEFINITIONS_DIR_VAR)]
    definitions_dir: Option<PathBuf>,

    /// Template root
    #[arg(long, env = TEMPLATES_DIR_VAR)]
    templates_dir: Option<PathBuf>,

    /// Application source root
    #[arg(long, env = APP_DIR_VAR)]
    app_dir: Option<PathBuf>,

    /// Also generate the form wizard steps
    #[arg(long)]
    steps: bool,

    /// Check the definitions and exit without generating anything
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.definitions_dir, cli.templates_dir, cli.app_dir)?;
    let generator = NextJsGenerator::new(config);

    if cli.validate {
        let problems = generator.validate_definitions().await?;
        if problems.is_empty() {
            info!("All entity definitions are valid");
            return Ok(());
        }
        for problem in &problems {
            error!("{}", problem);
        }
        anyhow::bail!("{} problem(s) found in entity definitions", problems.len());
    }

    let report = match (&cli.entity, cli.steps) {
        (Some(entity_name), false) => generator.generate_entity(entity_name).await?,
        (Some(entity_name), true) => generator.generate_entity_with_steps(entity_name).await?,
        (None, false) => generator.generate_all().await?,
        (None, true) => generator.generate_all_with_steps().await?,
    };

    info!(
        "Done: {} written, {} skipped, {} failed",
        report.written.len(),
        report.skipped.len(),
        report.failed.len()
    );

    if let Some((path, err)) = report.io_failures().next() {
        anyhow::bail!("Could not write {}: {}", path.display(), err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_directory_flags_are_bound_to_environment() {
        Cli::command().debug_assert();

        let command = Cli::command();
        for (id, var) in [
            ("definitions_dir", DEFINITIONS_DIR_VAR),
            ("templates_dir", TEMPLATES_DIR_VAR),
            ("app_dir", APP_DIR_VAR),
        ] {
            let arg = command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .unwrap();
            assert_eq!(arg.get_env(), Some(OsStr::new(var)));
        }
    }

    #[test]
    fn test_steps_flag_with_entity() {
        let cli = Cli::try_parse_from([
            "nextjs-codegen",
            "Meeting",
            "--steps",
            "--definitions-dir",
            "/defs",
            "--templates-dir",
            "/templates",
            "--app-dir",
            "/app",
        ])
        .unwrap();

        assert_eq!(cli.entity.as_deref(), Some("Meeting"));
        assert!(cli.steps);
        assert_eq!(cli.app_dir, Some(PathBuf::from("/app")));
    }
}
