//! Node Schema CLI
//!
//! Command-line interface for inspecting node property descriptors and
//! validating configured nodes.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use node_schema::{
    apply_defaults, get_essentials, is_relevant, is_visible, load_config, load_descriptors,
    load_unit, search_properties, validate_unit, visibility_requirement, ConfigurationSnapshot,
    LoadError, OperationContext, PropertyDescriptor, Severity, ValidationOptions,
    ValidationProfile, DEFAULT_MAX_RESULTS,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "node-schema")]
#[command(about = "Inspect node property schemas and validate node configurations")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the top-level properties shown for a configuration
    Visible {
        /// Descriptor source: file path or URL (http:// or https://)
        descriptors: String,

        /// Configuration (parameters object) to evaluate against
        #[arg(long)]
        config: Option<String>,

        /// Only list properties relevant to the configured resource/operation
        #[arg(long)]
        relevant: bool,

        /// Also list hidden properties with the reason they are hidden
        #[arg(long)]
        explain: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a configuration with declared defaults filled in
    Defaults {
        /// Descriptor source: file path or URL
        descriptors: String,

        /// Configuration to complete (empty if not specified)
        #[arg(long)]
        config: Option<String>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show the essential properties of a node type
    Essentials {
        /// Descriptor source: file path or URL
        descriptors: String,

        /// Node type (e.g., n8n-nodes-base.httpRequest)
        #[arg(long = "type", short = 't')]
        unit_type: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Search properties by name, display name and description
    Search {
        /// Descriptor source: file path or URL
        descriptors: String,

        /// Search text
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max: usize,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a configured node against its descriptors
    Validate {
        /// Descriptor source: file path or URL
        descriptors: String,

        /// Node source: a workflow node object with `type` and `parameters`
        unit: String,

        /// Validation profile: minimal, runtime or strict
        #[arg(long, default_value = "runtime")]
        profile: String,

        /// Run node-kind checks regardless of profile
        #[arg(long, conflicts_with = "no_specialized")]
        specialized: bool,

        /// Skip node-kind checks even in strict profile
        #[arg(long)]
        no_specialized: bool,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Visible {
            descriptors,
            config,
            relevant,
            explain,
            json,
        } => run_visible(&descriptors, config.as_deref(), relevant, explain, json),

        Commands::Defaults {
            descriptors,
            config,
            pretty,
        } => run_defaults(&descriptors, config.as_deref(), pretty),

        Commands::Essentials {
            descriptors,
            unit_type,
            pretty,
        } => run_essentials(&descriptors, &unit_type, pretty),

        Commands::Search {
            descriptors,
            query,
            max,
            json,
        } => run_search(&descriptors, &query, max, json),

        Commands::Validate {
            descriptors,
            unit,
            profile,
            specialized,
            no_specialized,
            json,
        } => {
            let specialized = match (specialized, no_specialized) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            run_validate(&descriptors, &unit, &profile, specialized, json)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn load_error(e: LoadError) -> u8 {
    eprintln!("Error: {}", e);
    e.exit_code() as u8
}

fn load_inputs(
    descriptors: &str,
    config: Option<&str>,
) -> Result<(Vec<PropertyDescriptor>, ConfigurationSnapshot), u8> {
    let descriptors = load_descriptors(descriptors).map_err(load_error)?;
    let config = match config {
        Some(source) => load_config(source).map_err(load_error)?,
        None => ConfigurationSnapshot::new(),
    };
    Ok((descriptors, config))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), u8> {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;
    println!("{}", output);
    Ok(())
}

#[derive(Serialize)]
struct VisibleEntry<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    property_type: &'a str,
    visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

fn run_visible(
    descriptors: &str,
    config: Option<&str>,
    relevant: bool,
    explain: bool,
    json_output: bool,
) -> Result<(), u8> {
    let (descriptors, config) = load_inputs(descriptors, config)?;
    let config = apply_defaults(&descriptors, &config);
    let context = OperationContext::from_config(&config);

    let entries: Vec<VisibleEntry> = descriptors
        .iter()
        .filter_map(|d| {
            let shown = if relevant {
                is_relevant(d, &config, &context)
            } else {
                is_visible(d, &config)
            };
            if !shown && !explain {
                return None;
            }
            Some(VisibleEntry {
                name: &d.name,
                property_type: d.property_type.as_str(),
                visible: shown,
                reason: if shown {
                    None
                } else {
                    visibility_requirement(d, &config)
                },
            })
        })
        .collect();

    if json_output {
        return print_json(&entries, false);
    }
    for entry in &entries {
        match &entry.reason {
            _ if entry.visible => println!("{} ({})", entry.name, entry.property_type),
            Some(reason) => println!("- {} ({}): {}", entry.name, entry.property_type, reason),
            None => println!("- {} ({}): not relevant", entry.name, entry.property_type),
        }
    }
    Ok(())
}

fn run_defaults(descriptors: &str, config: Option<&str>, pretty: bool) -> Result<(), u8> {
    let (descriptors, config) = load_inputs(descriptors, config)?;
    print_json(&apply_defaults(&descriptors, &config), pretty)
}

fn run_essentials(descriptors: &str, unit_type: &str, pretty: bool) -> Result<(), u8> {
    let descriptors = load_descriptors(descriptors).map_err(load_error)?;
    print_json(&get_essentials(&descriptors, unit_type), pretty)
}

fn run_search(descriptors: &str, query: &str, max: usize, json_output: bool) -> Result<(), u8> {
    let descriptors = load_descriptors(descriptors).map_err(load_error)?;
    let results = search_properties(&descriptors, query, max);

    if json_output {
        return print_json(&results, false);
    }
    if results.is_empty() {
        println!("No properties match '{}'", query);
    }
    for result in &results {
        println!(
            "{} ({}): {}",
            result.path.as_deref().unwrap_or(&result.name),
            result.property_type.as_str(),
            result.description
        );
    }
    Ok(())
}

fn run_validate(
    descriptors: &str,
    unit: &str,
    profile: &str,
    specialized: Option<bool>,
    json_output: bool,
) -> Result<(), u8> {
    let Some(profile) = ValidationProfile::parse(profile) else {
        eprintln!(
            "Error: unknown profile '{}' (expected minimal, runtime or strict)",
            profile
        );
        return Err(2);
    };

    let descriptors = load_descriptors(descriptors).map_err(load_error)?;
    let unit = load_unit(unit).map_err(load_error)?;

    let mut options = ValidationOptions::new(profile);
    if let Some(enabled) = specialized {
        options = options.specialized(enabled);
    }
    let report = validate_unit(&descriptors, &unit, &options);

    if json_output {
        print_json(&report, false)?;
    } else if report.is_valid() {
        println!("Valid");
        for issue in report.with_severity(Severity::Warning) {
            println!("  {}", issue);
        }
    } else {
        eprintln!("Validation failed:");
        for issue in &report.issues {
            eprintln!("  {}", issue);
        }
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(1)
    }
}
