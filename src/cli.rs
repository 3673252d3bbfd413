use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sdforge")]
#[command(version)]
#[command(about = "Provision a removable SD card for a third-party firmware loader", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download artifacts from the mirror catalog into the cache
    Fetch(FetchArgs),

    /// Prepare the device: create the directory layout and place essential files
    Provision(ProvisionArgs),

    /// Report size and hash facts about a file, or list cached artifacts
    Verify(VerifyArgs),

    /// Manage NAND backup sets
    #[command(subcommand)]
    Backup(BackupCommand),

    /// Select a backup set and print the guided restore steps
    Restore {
        /// Index into `backup list` (0 = most recent)
        index: usize,
    },

    /// Remove extracted directories and partial files from the cache
    Clean,

    /// Run health checks: network, cache, device
    Doctor,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
pub struct FetchArgs {
    /// Artifact key from the mirror catalog (see `config show`)
    pub key: Option<String>,

    /// Fetch every artifact in the catalog
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Parser)]
pub struct ProvisionArgs {
    /// Device root to provision (overrides and persists the configured path)
    #[arg(short, long)]
    pub device: Option<PathBuf>,
}

#[derive(Parser)]
pub struct VerifyArgs {
    /// File to verify; omit to list cached artifact archives
    pub path: Option<PathBuf>,

    /// Expected size in bytes; a mismatch is reported, not fatal
    #[arg(short = 's', long)]
    pub expected_size: Option<u64>,

    /// Also compute a content hash (display-only, not a security check)
    #[arg(long)]
    pub hash: bool,
}

#[derive(Subcommand)]
pub enum BackupCommand {
    /// Create a new timestamped backup-set directory
    Create,

    /// List existing backup sets, newest first
    List,

    /// Show one backup set in detail
    Show {
        /// Index into `backup list` (0 = most recent)
        index: usize,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show,

    /// Set the device root path
    SetDevice {
        /// Mount point of the removable device
        path: PathBuf,
    },

    /// Enable or disable automatic device detection
    AutoDetect {
        /// true to enable, false to disable
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Reset the configuration to compiled-in defaults
    Reset,
}
