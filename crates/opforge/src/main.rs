//! opforge - Scaffold operation libraries
//!
//! Commands:
//! - library new|exists|list: Manage libraries in an operations directory
//! - operation new|exists|list: Manage operations inside a library
//! - templates init|show: Set up or inspect the template root
//! - camel <SNAKE>: Print the CamelCase form of a snake_case name

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use opforge::{to_camel_case, Scaffolder, TemplateSet};
use opforge_core::{Config, Paths};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "opforge")]
#[command(about = "Scaffold operation libraries and operations from templates")]
#[command(version)]
#[command(after_help = r#"TEMPLATES:
    <root>/make_library/__init__.py     LIBRARYNAME is replaced with the library name
    <root>/make_operation/__init__.py   NEWOPERATION is replaced with the CamelCase operation name

    Template root: --templates, then $OPFORGE_TEMPLATE_DIR, then config.json,
    then the opforge data directory.

EXAMPLES:
    opforge templates init                  # Write the built-in templates
    opforge library new geometry            # Create operations/geometry
    opforge operation new geometry do_thing # Create operations/geometry/do_thing
    opforge operation list geometry --json
"#)]
struct Cli {
    /// Template root directory
    #[arg(long, global = true, value_name = "DIR")]
    templates: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage libraries
    #[command(subcommand)]
    Library(LibraryCommand),

    /// Manage operations
    #[command(subcommand)]
    Operation(OperationCommand),

    /// Set up or inspect templates
    #[command(subcommand)]
    Templates(TemplatesCommand),

    /// Print the CamelCase form of a snake_case name
    Camel {
        /// snake_case name
        name: String,
    },
}

#[derive(Subcommand)]
enum LibraryCommand {
    /// Create a new library
    New {
        name: String,
        /// Operations directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Check whether a library exists
    Exists {
        name: String,
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// List libraries
    List {
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum OperationCommand {
    /// Create a new operation (and its library if missing)
    New {
        library: String,
        /// Operation name in snake_case
        name: String,
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Check whether an operation exists
    Exists {
        library: String,
        name: String,
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// List operations in a library
    List {
        library: String,
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum TemplatesCommand {
    /// Write the built-in templates to the template root
    Init {
        /// Template root to write to, recorded in config.json
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Rewrite existing template initializers
        #[arg(long)]
        force: bool,
    },

    /// Show the resolved template locations
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = Config::load_default()?;
    let templates = TemplateSet::from_root(&config.resolve_template_root(cli.templates.as_deref()))
        .with_initializer(&config.initializer);

    match cli.command {
        Commands::Library(cmd) => cmd_library(cmd, &config, templates),
        Commands::Operation(cmd) => cmd_operation(cmd, &config, templates),
        Commands::Templates(TemplatesCommand::Init { root, force }) => {
            cmd_templates_init(&config, &templates, root.as_deref(), force)
        }
        Commands::Templates(TemplatesCommand::Show) => cmd_templates_show(&templates),
        Commands::Camel { name } => {
            println!("{}", to_camel_case(&name));
            Ok(())
        }
    }
}

fn operations_dir<'a>(dir: &'a Option<PathBuf>, config: &'a Config) -> &'a Path {
    dir.as_deref().unwrap_or(config.operations_dir.as_path())
}

/// Scaffolder with templates checked up front, for commands that create things
fn creating_scaffolder(templates: TemplateSet) -> Result<Scaffolder> {
    templates
        .validate()
        .context("Templates are not set up. Run: opforge templates init")?;
    Ok(Scaffolder::new(templates))
}

fn cmd_library(cmd: LibraryCommand, config: &Config, templates: TemplateSet) -> Result<()> {
    match cmd {
        LibraryCommand::New { name, dir } => {
            let scaffolder = creating_scaffolder(templates)?;
            let path = scaffolder
                .library_create(&name, operations_dir(&dir, config))
                .with_context(|| format!("Failed to create library: {}", name))?;
            println!("success: Library created: {}", path.display());
            Ok(())
        }

        LibraryCommand::Exists { name, dir } => {
            let exists = Scaffolder::new(templates).library_exists(&name, operations_dir(&dir, config))?;
            report_exists(exists)
        }

        LibraryCommand::List { dir, json } => {
            let libraries = Scaffolder::new(templates).list_libraries(operations_dir(&dir, config))?;
            print_names(&libraries, json, "No libraries found.")
        }
    }
}

fn cmd_operation(cmd: OperationCommand, config: &Config, templates: TemplateSet) -> Result<()> {
    match cmd {
        OperationCommand::New { library, name, dir } => {
            let scaffolder = creating_scaffolder(templates)?;
            let path = scaffolder
                .operation_create(operations_dir(&dir, config), &library, &name)
                .with_context(|| format!("Failed to create operation: {}/{}", library, name))?;
            println!("success: Operation created: {}", path.display());
            println!("info: Class name: {}", to_camel_case(&name));
            Ok(())
        }

        OperationCommand::Exists { library, name, dir } => {
            let exists = Scaffolder::new(templates).operation_exists(
                operations_dir(&dir, config),
                &library,
                &name,
            )?;
            report_exists(exists)
        }

        OperationCommand::List { library, dir, json } => {
            let operations =
                Scaffolder::new(templates).list_operations(operations_dir(&dir, config), &library)?;
            print_names(&operations, json, "No operations found.")
        }
    }
}

/// Templates `templates init` writes to: `--root` if given, else the resolved set
fn init_target(config: &Config, resolved: &TemplateSet, root: Option<&Path>) -> TemplateSet {
    match root {
        Some(root) => TemplateSet::from_root(root).with_initializer(&config.initializer),
        None => resolved.clone(),
    }
}

fn cmd_templates_init(
    config: &Config,
    resolved: &TemplateSet,
    root: Option<&Path>,
    force: bool,
) -> Result<()> {
    let templates = init_target(config, resolved, root);
    templates.write_builtin(force).with_context(|| {
        format!(
            "Failed to initialize templates in {}",
            templates.library_dir.display()
        )
    })?;

    println!("success: Library template: {}", templates.library_dir.display());
    println!("success: Operation template: {}", templates.operation_dir.display());

    if let Some(root) = root {
        let root = std::env::current_dir()?.join(root);
        let config_path = Paths::new().config_file();
        let updated = Config {
            template_root: Some(root.clone()),
            ..config.clone()
        };
        updated
            .save(&config_path)
            .with_context(|| format!("Failed to save config: {}", config_path.display()))?;
        println!("info: Template root recorded: {}", root.display());
    }
    Ok(())
}

fn cmd_templates_show(templates: &TemplateSet) -> Result<()> {
    println!("\x1b[1mTemplates\x1b[0m");
    println!("  library:     {}", templates.library_dir.display());
    println!("  operation:   {}", templates.operation_dir.display());
    println!("  initializer: {}", templates.initializer);
    println!();

    match templates.validate() {
        Ok(()) => println!("\x1b[32mready\x1b[0m"),
        Err(e) => println!("\x1b[33mnot ready:\x1b[0m {}", e),
    }
    Ok(())
}

fn report_exists(exists: bool) -> Result<()> {
    println!("{}", exists);
    let code = exists_exit_code(exists);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// `exists` commands fail the process when the answer is no
fn exists_exit_code(exists: bool) -> i32 {
    if exists {
        0
    } else {
        1
    }
}

fn print_names(names: &[String], json: bool, empty_message: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(names)?);
        return Ok(());
    }

    if names.is_empty() {
        println!("\x1b[2m{}\x1b[0m", empty_message);
    }
    for name in names {
        println!("  {}", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_operation_new_args() {
        let cli = Cli::parse_from([
            "opforge",
            "operation",
            "new",
            "mylib",
            "do_thing",
            "--dir",
            "/tmp/ops",
            "--templates",
            "/srv/templates",
        ]);

        assert_eq!(cli.templates, Some(PathBuf::from("/srv/templates")));
        match cli.command {
            Commands::Operation(OperationCommand::New { library, name, dir }) => {
                assert_eq!(library, "mylib");
                assert_eq!(name, "do_thing");
                assert_eq!(dir, Some(PathBuf::from("/tmp/ops")));
            }
            _ => panic!("expected operation new"),
        }
    }

    #[test]
    fn test_templates_init_args() {
        let cli = Cli::parse_from(["opforge", "templates", "init", "--root", "/srv/tpl", "--force"]);

        match cli.command {
            Commands::Templates(TemplatesCommand::Init { root, force }) => {
                assert_eq!(root, Some(PathBuf::from("/srv/tpl")));
                assert!(force);
            }
            _ => panic!("expected templates init"),
        }
    }

    #[test]
    fn test_init_target_prefers_root() {
        let config = Config {
            initializer: "mod.py".to_string(),
            ..Default::default()
        };
        let resolved = TemplateSet::from_root(Path::new("/resolved"));

        let target = init_target(&config, &resolved, Some(Path::new("/explicit")));
        assert_eq!(target.library_dir, PathBuf::from("/explicit/make_library"));
        assert_eq!(target.initializer, "mod.py");

        assert_eq!(init_target(&config, &resolved, None), resolved);
    }

    #[test]
    fn test_exists_exit_code() {
        assert_eq!(exists_exit_code(true), 0);
        assert_eq!(exists_exit_code(false), 1);
    }

    #[test]
    fn test_operations_dir_falls_back_to_config() {
        let config = Config::default();
        assert_eq!(operations_dir(&None, &config), Path::new("operations"));

        let explicit = Some(PathBuf::from("/elsewhere"));
        assert_eq!(operations_dir(&explicit, &config), Path::new("/elsewhere"));
    }
}
