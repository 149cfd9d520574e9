//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use sap_replay::{
    cli::{Commands, SapReplay},
    commands::{
        convert::{handle_convert, ConvertParams},
        decode::handle_decode,
    },
    Result,
};

/// Run the CLI.
fn main() -> Result<()> {
    env_logger::init();
    let app = SapReplay::parse();

    match app.command {
        Commands::Convert {
            input,
            output,
            pretty,
            turn,
            gold_spent,
            roll_amount,
            pack,
        } => handle_convert(ConvertParams {
            input,
            output,
            pretty,
            turn,
            gold_spent,
            roll_amount,
            pack,
        })?,

        Commands::Decode { input, pretty } => handle_decode(input, pretty)?,
    }

    Ok(())
}
