//! Clap derive structures for the `vellum` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// vellum -- drive the Vellum provider lifecycle from the command line
#[derive(Debug, Parser)]
#[command(
    name = "vellum",
    version,
    about = "Manage Vellum document indexes and ML models declaratively",
    long_about = "Runs single provider lifecycle calls (create/update, read, import,\n\
        destroy, lookup) against the Vellum API. Documents are read from JSON\n\
        or YAML files; results are printed as {state, diagnostics}.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Provider API key (VELLUM_API_KEY takes precedence)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Vellum API base URL (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to a config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every provider, resource and data source schema
    Schema,

    /// Check a configuration document without contacting Vellum
    Validate(ValidateArgs),

    /// Create a resource, or update it when prior state is given
    Apply(ApplyArgs),

    /// Refresh recorded state from Vellum
    Read(StateArgs),

    /// Adopt an existing object by id
    Import(ImportArgs),

    /// Delete (or disable) the object recorded in state
    Destroy(StateArgs),

    /// Read a data source by id or name
    Lookup(LookupArgs),
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Resource or data source type, e.g. vellum_document_index
    pub type_name: String,

    /// JSON or YAML document
    pub file: PathBuf,

    /// Validate against the data source schema instead of the resource
    #[arg(long)]
    pub data_source: bool,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    pub type_name: String,

    /// Planned state document
    pub plan: PathBuf,

    /// Prior state document; when absent the resource is created
    #[arg(long)]
    pub state: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct StateArgs {
    pub type_name: String,

    /// Recorded state document
    pub state: PathBuf,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub type_name: String,

    /// Remote identifier to adopt
    pub id: String,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    pub type_name: String,

    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,
}
