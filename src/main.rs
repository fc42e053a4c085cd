//! classparam CLI - check and inspect parameter manifests

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use classparam::{FixSuggestion, Manifest, ParamDump, ParamError, Registry};

#[derive(Parser)]
#[command(name = "classparam")]
#[command(about = "Class-level configuration parameters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a manifest to an empty registry and summarize it
    Validate {
        /// Path to a manifest (.yaml)
        file: String,
    },

    /// Print current parameter values as JSON
    Dump {
        /// Path to a manifest (.yaml)
        file: String,

        /// Only dump this class
        #[arg(short, long)]
        class: Option<String>,

        /// Change a parameter after the manifest is applied
        #[arg(long = "set", value_name = "CLASS.NAME=VALUE")]
        overrides: Vec<String>,
    },

    /// Bind NAME VALUE pairs on one class, then print its parameters
    Configure {
        /// Path to a manifest (.yaml)
        file: String,

        /// Target class
        class: String,

        /// Alternating NAME VALUE arguments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { file } => validate(&file),
        Commands::Dump {
            file,
            class,
            overrides,
        } => dump(&file, class.as_deref(), &overrides),
        Commands::Configure { file, class, args } => configure(&file, &class, &args),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn load(file: &str) -> Result<Registry, ParamError> {
    let manifest = Manifest::load(file)?;
    let registry = Registry::new();
    manifest.apply(&registry)?;
    Ok(registry)
}

fn validate(file: &str) -> Result<(), ParamError> {
    let registry = load(file)?;

    println!("{} Manifest '{}' is valid", "✓".green(), file);
    for class in registry.classes() {
        let names = registry.param_names(&class);
        println!("  {} ({} parameters)", class.as_str().cyan().bold(), names.len());
        for name in names {
            let kind = registry
                .binding_kind(&class, &name)
                .map(|k| k.to_string())
                .unwrap_or_default();
            println!("    {} {}", name, kind.dimmed());
        }
    }

    Ok(())
}

fn dump(file: &str, class: Option<&str>, overrides: &[String]) -> Result<(), ParamError> {
    let registry = load(file)?;

    for input in overrides {
        let (target, name, value) = parse_override(input)?;
        registry.change_params(target, [(name, value)])?;
    }

    let output = match class {
        Some(class) => dump_value(registry.dump_params(class)?),
        None => {
            let mut all = Map::new();
            for class in registry.classes() {
                let params = registry.dump_params(&class)?;
                all.insert(class.to_string(), dump_value(params));
            }
            Value::Object(all)
        }
    };

    println!("{output:#}");
    Ok(())
}

fn configure(file: &str, class: &str, args: &[String]) -> Result<(), ParamError> {
    let registry = load(file)?;

    // Names stay strings; only value slots are parsed as JSON
    let flat: Vec<Value> = args
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            if i % 2 == 0 {
                Value::String(arg.clone())
            } else {
                parse_value(arg)
            }
        })
        .collect();

    registry.configure_flat(class, &flat)?;

    println!("{:#}", dump_value(registry.dump_params(class)?));
    Ok(())
}

/// Split `Class.NAME=VALUE`. The class part may itself contain dots.
fn parse_override(input: &str) -> Result<(&str, &str, Value), ParamError> {
    let invalid = || ParamError::InvalidOverride {
        input: input.to_string(),
    };

    let (target, value) = input.split_once('=').ok_or_else(invalid)?;
    let (class, name) = target.rsplit_once('.').ok_or_else(invalid)?;
    if class.is_empty() || name.is_empty() {
        return Err(invalid());
    }

    Ok((class, name, parse_value(value)))
}

/// JSON if it parses, plain string otherwise
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn dump_value(dump: ParamDump) -> Value {
    Value::Object(dump.into_iter().collect())
}
