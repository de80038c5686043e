use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use patterndex_validator::ReportFormat;

#[derive(Parser, Debug)]
#[command(
    name = "patterndex",
    about = "Validate, scaffold and index a design-pattern corpus",
    version,
    arg_required_else_help = true
)]
pub(crate) struct Cli {
    /// Corpus root directory.
    #[arg(
        long,
        short = 'r',
        value_name = "DIR",
        default_value = ".",
        global = true
    )]
    pub(crate) root: PathBuf,

    /// Explicit configuration file, layered over `<root>/.patterndex.yaml`.
    #[arg(long = "conf", short = 'c', value_name = "FILE", global = true)]
    pub(crate) config_file: Option<PathBuf>,

    /// Debug logging on stderr (ignored when RUST_LOG is set).
    #[arg(long, short = 'v', global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Check the whole tree against rules V1-V8.
    Check {
        /// Finding format on stdout.
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Print the JSON Schema of one finding and exit.
        #[arg(long)]
        schema: bool,
    },
    /// Scaffold a pattern file or category folder from the templates.
    New {
        #[command(subcommand)]
        target: NewTarget,
    },
    /// Print the generated root index blocks, or rewrite them in place.
    Index {
        /// Rewrite marker blocks in the READMEs.
        #[arg(long)]
        write: bool,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum NewTarget {
    /// `<category>/<slug>.md` from TEMPLATE-PATTERN.md.
    Pattern {
        /// Existing category folder.
        #[arg(long)]
        category: String,
        /// Display name; the file name is its slug.
        #[arg(long)]
        name: String,
        /// One-line intent.
        #[arg(long)]
        intent: Option<String>,
    },
    /// `<name>/README.md` from TEMPLATE-README.md.
    Category {
        /// Folder name (lowercase kebab-case).
        #[arg(long)]
        name: String,
        /// One-line description.
        #[arg(long)]
        description: Option<String>,
    },
}
