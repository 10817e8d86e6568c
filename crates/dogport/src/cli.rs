//! Clap derive structures for the `dogport` CLI.
//!
//! Also compiled by `build.rs` for man page generation, so this file may
//! only depend on clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// dogport -- export dog network-policy state to Terraform
#[derive(Debug, Parser)]
#[command(
    name = "dogport",
    version,
    about = "Export dog network-policy state to Terraform",
    long_about = "Reads groups, hosts, links, zones, services, rulesets, profiles and facts\n\
        from a dog API and writes Terraform resource definitions plus import\n\
        blocks, so existing objects can be adopted without being recreated.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "DOGPORT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// dog API endpoint (overrides profile)
    #[arg(long, env = "DOG_API_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// dog API token (overrides profile and keyring)
    #[arg(long, env = "DOG_API_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "DOGPORT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: profile, then 30]
    #[arg(long, env = "DOGPORT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress banners and the run report
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export every table to <table>.tf and <table>_import.tf
    #[command(alias = "x")]
    Export(ExportArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Export ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Environment label; every resource uses the `dog.<environment>` provider
    #[arg(long, short = 'e')]
    pub environment: String,

    /// Directory the .tf files are written to (created if absent)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Only export hosts whose name starts with this prefix
    #[arg(long, default_value = "")]
    pub host_prefix: String,

    /// How to handle display names that sanitize to the same identifier
    #[arg(long, value_name = "POLICY")]
    pub on_collision: Option<CollisionMode>,

    /// Continue with the remaining tables after a table fails
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CollisionMode {
    /// Append the remote id to later identifiers
    Suffix,
    /// Skip later rows and report them
    Reject,
    /// Emit duplicate identifiers unchanged
    Allow,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (tokens masked)
    Show,

    /// Print the configuration file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
