//! CLI argument definitions and parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Input and dictionary arguments shared between commands.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Export text: bare JSON, percent/base64 blob, `SAPC1:` envelope, or a
    /// share URL. Reads from `--input-file` or stdin when omitted.
    pub export: Option<String>,

    /// Read the export from a file instead of the command line.
    #[clap(long, short)]
    pub input_file: Option<PathBuf>,

    /// Name-to-id dictionary JSON (defaults to the bundled dictionary).
    #[clap(long, short)]
    pub maps: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a calculator export into a replayable battle record.
    ///
    /// Decodes the export from any supported encoding, resolves names
    /// through the dictionary, and writes the battle JSON. Unresolvable
    /// names are skipped with a warning on stderr.
    Convert {
        #[clap(flatten)]
        input: InputArgs,

        /// Write the battle record here instead of stdout.
        #[clap(long, short)]
        output: Option<PathBuf>,

        /// Pretty-print the battle JSON.
        #[clap(long)]
        pretty: bool,

        /// Turn number when the export does not state one.
        #[clap(long)]
        turn: Option<i64>,

        /// Gold-spent fallback when the export does not state one.
        #[clap(long)]
        gold_spent: Option<i64>,

        /// Roll-count fallback when the export does not state one.
        #[clap(long)]
        roll_amount: Option<i64>,

        /// Pack name fallback when the export does not state one.
        #[clap(long)]
        pack: Option<String>,
    },

    /// Decode an export and print the expanded calculator JSON.
    ///
    /// Stops after decoding and key expansion, before any battle synthesis.
    /// Useful for inspecting what a share code actually contains.
    Decode {
        #[clap(flatten)]
        input: InputArgs,

        /// Pretty-print the decoded JSON.
        #[clap(long)]
        pretty: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "sap-replay", about = "Convert SAP calculator exports into battle records")]
pub struct SapReplay {
    #[clap(subcommand)]
    pub command: Commands,
}
