//! Command-line front end for im-authors
//!
//! # Usage
//!
//! ```bash
//! # Canonicalize a few names
//! im-authors format "Murilo Mendes" "bonvicino, Régis"
//!
//! # Preview the repairs to a catalog, then apply them
//! im-authors normalize catalogo.json
//! im-authors normalize catalogo.json --write --save-log
//!
//! # Candidate duplicates, best first
//! im-authors scan catalogo.json --limit 50
//!
//! # Every recorded spelling of one person
//! im-authors vocab catalogo.json --pattern 'CABRAL|MELO NETO'
//! ```

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use im_authors::telemetry::{self, DEFAULT_LOG_LEVEL};
use im_authors::{
    normalize, normalize_author_text, AuthorsError, CanonicalRegistry, Catalog, DuplicateReport,
    Engine, EngineConfig, Result, Vocabulary,
};

#[derive(Parser, Debug)]
#[command(name = "im-authors", version, about = "Canonicalize author names in a catalog")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Extra rule file (TOML or JSON); may be repeated, later files win
    #[arg(long = "rules", global = true, value_name = "PATH")]
    rules: Vec<PathBuf>,

    /// Do not load the builtin rules
    #[arg(long, global = true)]
    no_builtin_rules: bool,

    /// Engine configuration file (TOML or JSON)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory whose .im-authors/rules.toml is loaded (defaults to the
    /// current directory)
    #[arg(long, global = true, value_name = "PATH")]
    project_root: Option<PathBuf>,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical form of each name
    Format {
        /// Names to format; arguments with newlines hold one name per line
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Repair the author fields of a catalog
    Normalize(NormalizeArgs),
    /// Report pairs of names that may be the same person
    Scan(ScanArgs),
    /// List the distinct names of a catalog
    Vocab(VocabArgs),
    /// List the loaded canonical rules
    Rules,
}

#[derive(Args, Debug)]
struct NormalizeArgs {
    /// Catalog JSON file
    catalog: PathBuf,

    /// Write the result (to --output, or back to the catalog)
    #[arg(long)]
    write: bool,

    /// Destination for --write
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Write the change log to this file
    #[arg(long, value_name = "PATH", conflicts_with = "save_log")]
    log: Option<PathBuf>,

    /// Write the change log to a timestamped file in the current directory
    #[arg(long)]
    save_log: bool,

    /// Print the change log as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Catalog JSON file
    catalog: PathBuf,

    /// Print the report as JSON
    #[arg(long, conflicts_with = "table")]
    json: bool,

    /// Print the report as a table
    #[arg(long)]
    table: bool,

    /// Show at most N pairs
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
}

#[derive(Args, Debug)]
struct VocabArgs {
    /// Catalog JSON file
    catalog: PathBuf,

    /// Case-insensitive regular expression to filter names
    #[arg(long, value_name = "REGEX")]
    pattern: Option<String>,

    /// Only names from this field
    #[arg(long, value_name = "FIELD")]
    field: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = telemetry::init(&cli.global.log_level) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run(cli) {
        tracing::error!(error = %err, "im-authors failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.global)?;

    match cli.command {
        Command::Format { names } => {
            let engine = build_engine(&cli.global, config)?;
            for text in &names {
                for name in normalize_author_text(text, &engine) {
                    println!("{name}");
                }
            }
            Ok(())
        }
        Command::Normalize(args) => {
            let engine = build_engine(&cli.global, config)?;
            run_normalize(&engine, &args)
        }
        Command::Scan(args) => run_scan(config, &args),
        Command::Vocab(args) => run_vocab(&config, &args),
        Command::Rules => {
            let engine = build_engine(&cli.global, config)?;
            print_rules(engine.registry());
            Ok(())
        }
    }
}

fn load_config(global: &GlobalArgs) -> Result<EngineConfig> {
    match &global.config {
        Some(path) => EngineConfig::load(path),
        None => Ok(EngineConfig::default()),
    }
}

fn build_engine(global: &GlobalArgs, config: EngineConfig) -> Result<Engine> {
    let project_root = match &global.project_root {
        Some(root) => Some(root.clone()),
        None => std::env::current_dir().ok(),
    };

    let mut builder =
        CanonicalRegistry::standard_builder(project_root.as_deref(), !global.no_builtin_rules)?;
    for path in &global.rules {
        builder.add_file(path)?;
    }
    let registry = builder.build()?;
    tracing::info!(
        "{} rules, {} merge rules",
        registry.len(),
        registry.merge_rules().len()
    );

    Ok(Engine::new(config, registry))
}

fn run_normalize(engine: &Engine, args: &NormalizeArgs) -> Result<()> {
    let catalog = Catalog::load(&args.catalog)?;
    let outcome = normalize(&catalog, engine);
    let changes = &outcome.changes;

    if args.json {
        println!("{}", changes.to_json()?);
    } else {
        print!("{changes}");
        println!(
            "{} fields changed in {} of {} records ({} reconstructed)",
            changes.len(),
            changes.records_changed(),
            catalog.len(),
            changes.reconstructed_count()
        );
    }

    let log_path = match (&args.log, args.save_log) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(default_log_path()),
        (None, false) => None,
    };
    if let Some(path) = log_path {
        write_text(&path, &changes.render())?;
        println!("Change log written to {}", path.display());
    }

    if args.write {
        let destination = args.output.as_deref().unwrap_or(&args.catalog);
        outcome.catalog.save(destination)?;
        println!("Catalog written to {}", destination.display());
    } else if !changes.is_empty() {
        println!("Dry run; pass --write to save the catalog");
    }

    Ok(())
}

fn run_scan(config: EngineConfig, args: &ScanArgs) -> Result<()> {
    let catalog = Catalog::load(&args.catalog)?;
    let vocabulary = Vocabulary::from_catalog(&catalog, &config.fields);
    let engine = Engine::new(config, CanonicalRegistry::empty());

    let mut report = engine.scanner().scan(&vocabulary);
    if let Some(limit) = args.limit {
        report.truncate(limit);
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else if args.table {
        println!("{}", report_table(&report));
    } else {
        println!("Total unique names: {}", report.names_scanned);
        print!("{report}");
    }
    Ok(())
}

fn run_vocab(config: &EngineConfig, args: &VocabArgs) -> Result<()> {
    let catalog = Catalog::load(&args.catalog)?;
    let fields: Vec<&str> = match &args.field {
        Some(field) => vec![field.as_str()],
        None => config.fields.iter().map(String::as_str).collect(),
    };
    let vocabulary = Vocabulary::from_catalog(&catalog, &fields);

    let entries = match &args.pattern {
        Some(pattern) => vocabulary.search(pattern)?,
        None => vocabulary.entries(),
    };
    for entry in &entries {
        println!("{} ({})", entry.name, entry.count);
    }
    println!("{} of {} distinct names", entries.len(), vocabulary.len());
    Ok(())
}

fn print_rules(registry: &CanonicalRegistry) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Variant", "Canonical", "Source"]);
    for (variant, canonical) in registry.rules() {
        let source = registry
            .source_of(variant)
            .map(|s| s.to_string())
            .unwrap_or_default();
        table.add_row(vec![variant.to_string(), canonical.to_string(), source]);
    }
    println!("{table}");

    for rule in registry.merge_rules() {
        println!("merge {:?} -> {:?}", rule.parts, rule.into);
    }
}

fn report_table(report: &DuplicateReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Score", "Name", "Count", "Name", "Count", "Signals"]);
    for pair in report.iter() {
        let signals: Vec<String> = pair.signals.iter().map(|s| s.to_string()).collect();
        table.add_row(vec![
            format!("{:.2}", pair.score),
            pair.name_a.clone(),
            pair.count_a.to_string(),
            pair.name_b.clone(),
            pair.count_b.to_string(),
            signals.join(", "),
        ]);
    }
    table
}

/// `author_fixes_log_YYYYMMDD_HHMMSS.txt`
fn default_log_path() -> PathBuf {
    PathBuf::from(format!(
        "author_fixes_log_{}.txt",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| AuthorsError::io(path, e))
}
