pub mod cli;
pub mod document;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "promo-mailer")]
#[command(about = "Build promotional emails and move their data through CSV")]
pub struct CliConfig {
    /// Directory that relative file paths are resolved against
    #[arg(long, global = true, default_value = ".")]
    pub base_dir: String,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write the starter promotion to a .toml, .json or .csv file
    Init {
        #[arg(short, long, default_value = "promotion.toml")]
        output: String,
    },
    /// Render a promotion file into an HTML email
    Render {
        input: String,
        #[arg(short, long, default_value = "email.html")]
        output: String,
        /// Refuse to render when validation finds problems
        #[arg(long)]
        strict: bool,
    },
    /// Convert a .toml or .json promotion into the CSV export format
    Export {
        input: String,
        #[arg(short, long, default_value = crate::core::csv_codec::EXPORT_FILE_NAME)]
        output: String,
    },
    /// Convert a CSV export back into an editable .toml or .json document
    Import {
        input: String,
        #[arg(short, long, default_value = "promotion.toml")]
        output: String,
    },
    /// Report problems with the fields of a promotion file
    Check { input: String },
}
