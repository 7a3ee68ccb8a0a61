use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand};
use serde_json::json;

use cmdtree::logging::init_tracing;
use cmdtree::scan::{split_for_completion, split_line};
use cmdtree::{
    ArgumentRegistry, Command, Completer, EngineConfig, KnobStore, Resolver, Subject, TreeSpec,
};

#[derive(Parser)]
#[command(name = "cmdtree")]
#[command(about = "Resolve and complete command lines against a command tree")]
#[command(version)]
struct Cli {
    /// Engine config file (default: platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Command tree file (TOML)
    #[arg(long)]
    tree: Option<PathBuf>,

    /// Settings file read by settable arguments (TOML)
    #[arg(long)]
    knobs: Option<PathBuf>,

    /// Log to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a full command line
    Resolve {
        /// The line, quoted as one argument
        line: String,
    },
    /// Complete the last word of a partial line
    Complete {
        /// The line up to the cursor
        line: String,
    },
    /// Show usage for a command path, or every command
    Docs {
        path: Vec<String>,
    },
    /// List argument shorthands usable in tree files
    Kinds,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load()?,
    };
    config.validate()?;

    let registry = ArgumentRegistry::builtin();
    let tree_path = cli.tree.or_else(|| config.tree.path.clone());
    let knobs_path = cli.knobs.or_else(|| config.knobs.path.clone());

    match cli.command {
        Commands::Kinds => {
            print!("{}", registry.describe());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve { line } => {
            let (root, subject) = load_tree(tree_path, knobs_path, &registry)?;
            let tokens = split_line(&line);
            let outcome = Resolver::new(&root, &subject)
                .with_config(&config)
                .resolve(&tokens);
            match outcome {
                Ok(resolution) => {
                    let out = json!({
                        "path": resolution.path,
                        "bindings": resolution.bindings,
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    let out = json!({
                        "error": {
                            "type": e.error_type(),
                            "message": e.to_string(),
                            "understood": e.understood(),
                        }
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Complete { line } => {
            let (root, subject) = load_tree(tree_path, knobs_path, &registry)?;
            let tokens = split_for_completion(&line);
            let list = Completer::new(&root, &subject)
                .with_config(&config)
                .complete(&tokens);
            let out = json!({
                "prefix": list.prefix,
                "completions": list.ranked(),
                "hints": list.hints,
                "truncated": list.truncated,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Docs { path } => {
            let (root, _) = load_tree(tree_path, knobs_path, &registry)?;
            print_docs(&root, &path)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Builds the command tree and the subject its settable arguments read.
fn load_tree(
    tree_path: Option<PathBuf>,
    knobs_path: Option<PathBuf>,
    registry: &ArgumentRegistry,
) -> anyhow::Result<(Command, Subject)> {
    let Some(tree_path) = tree_path else {
        bail!("no command tree given; pass --tree or set [tree] path in the config");
    };
    let root = TreeSpec::load(&tree_path)?
        .build(registry)
        .with_context(|| format!("building tree from {}", tree_path.display()))?;

    let knobs = match knobs_path {
        Some(path) => KnobStore::load(&path)?,
        None => KnobStore::new(),
    };
    Ok((root, Subject::new().with_knobs(knobs)))
}

fn print_docs(root: &Command, path: &[String]) -> anyhow::Result<()> {
    if path.is_empty() {
        for line in root.outline() {
            println!("{}", line);
        }
        return Ok(());
    }
    let Some(node) = root.find(path) else {
        bail!("no command '{}'", path.join(" "));
    };
    let (parents, _) = path.split_at(path.len() - 1);
    println!("{}", node.documentation(parents));
    Ok(())
}
