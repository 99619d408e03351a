use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use eyre::Result;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "permanence",
    about = "Track patient questionnaires and summarize their answer history",
    version
)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// Data directory (defaults to the platform local-data directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    /// Subdirectory holding the form documents
    #[arg(long, global = true)]
    forms_dir: Option<String>,
    /// Separator used when deriving form ids from names
    #[arg(long, global = true, value_enum)]
    id_style: Option<IdStyleArg>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stored forms
    List,
    /// Print a form document as JSON
    Show { id: String },
    /// Store a complete form document read from a JSON file
    Import {
        file: PathBuf,
        /// Store under this id instead of one derived from the form name
        #[arg(long)]
        id: Option<String>,
    },
    /// Print the templates of every readable form as JSON
    Templates,
    /// Create an empty form from a template JSON file
    Create { template: PathBuf },
    /// Record one submission of answers (KEY=VALUE, VALUE parsed as JSON)
    Answer {
        id: String,
        #[arg(required = true, value_parser = commands::parse_answer)]
        answers: Vec<(String, serde_json::Value)>,
    },
    /// Show problematic/critical flags for a form
    Status { id: String },
    /// Print the clinician summary for a form
    Summary {
        id: String,
        #[arg(long, value_enum, default_value_t = Locale::En)]
        locale: Locale,
    },
    /// Delete a form document
    Delete { id: String },
    /// Read or change the user config
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the user config
    Show,
    /// Set the name of the clinician using this installation
    SetUser { name: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IdStyleArg {
    Underscore,
    Hyphen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Locale {
    En,
    Cs,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::run(cli)
}
