use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "armature",
    about = "Armature: consistency checks for semantic skeleton documents",
    version
)]
pub struct Cli {
    /// Log pass-level detail to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate one skeleton file, or every skeleton in a directory with --all
    Validate {
        /// Skeleton JSON file
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        file: Option<String>,

        /// Validate every *.json file in --dir
        #[arg(long)]
        all: bool,

        /// Directory scanned by --all
        #[arg(long, default_value = "skeletons")]
        dir: String,

        #[command(flatten)]
        validator: ValidatorArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print statistics for one skeleton file without the verdict
    Stats {
        /// Skeleton JSON file
        file: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ValidatorArgs {
    /// JSON Schema applied before the custom passes
    /// (default: schemas/skeleton-schema.json when present)
    #[arg(long, conflicts_with = "no_schema")]
    pub schema: Option<String>,

    /// Skip JSON Schema validation entirely
    #[arg(long)]
    pub no_schema: bool,

    /// TOML file overriding validator thresholds
    #[arg(long)]
    pub config: Option<String>,
}
