use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "canon",
    about = "Canon: validate and realize declared geometric forms",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Judge a declaration against the canon
    Validate {
        /// Path to a declaration JSON file
        declaration: String,

        /// Case-law archive (JSONL) consulted before re-judging
        #[arg(long)]
        caselaw: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a declaration, then realize it into artifacts
    Realize {
        /// Path to a declaration JSON file
        declaration: String,

        /// Wall-clock budget for realization, in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Skip validation (refused unless --allow-bypass is also given)
        #[arg(long)]
        skip_validation: bool,

        /// Sanction a skipped validation; output is marked as bypassed
        #[arg(long)]
        allow_bypass: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a declaration's content signature
    Sign {
        /// Path to a declaration JSON file
        declaration: String,

        /// Include annotations (title, notes, metadata) in the signature
        #[arg(long)]
        with_annotations: bool,
    },

    /// Build a declaration from canonical parameters
    Solve {
        /// Form kind: circle, sphere, regular-polygon, truncated-pyramid
        kind: String,

        /// Canonical parameter (repeatable): --param radius=10
        #[arg(long = "param")]
        params: Vec<String>,

        /// Override the generated title
        #[arg(long)]
        title: Option<String>,

        /// Write the declaration JSON to a file instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
}
