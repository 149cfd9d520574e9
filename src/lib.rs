//! SAP Replay Converter Library
//!
//! Translates Super Auto Pets team-calculator exports into the battle-record
//! JSON the game client replays. The export may arrive as bare JSON, a
//! percent-encoded or base64(url) blob, a `SAPC1:` share envelope, or a full
//! share URL; all forms decode to the same record.
//!
//! ## Pipeline
//!
//! 1. **Decode** the raw text into a JSON tree ([`decode`]).
//! 2. **Expand** abbreviated share-code keys to their long names ([`keys`]).
//! 3. **Extract** the calculator state from whatever wrapper it hides in
//!    ([`extract`]).
//! 4. **Assemble** two boards and the surrounding battle record ([`battle`]).
//!
//! Name-to-id resolution goes through a [`maps::CalculatorMaps`] table,
//! bundled with the crate or loaded from a caller-supplied file. Unknown
//! names never fail a conversion; they come back as warnings.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sap_replay::{battle, maps::CalculatorMaps};
//!
//! # fn example() -> sap_replay::Result<()> {
//! let maps = CalculatorMaps::bundled()?;
//! let conversion = battle::convert(&maps, r#"{"p":[{"n":"Ant"}],"o":[]}"#)?;
//! println!("{}", serde_json::to_string_pretty(&conversion.battle)?);
//! # Ok(())
//! # }
//! ```

pub mod battle;
pub mod cli;
pub mod commands;
pub mod decode;
pub mod error;
pub mod extract;
pub mod keys;
pub mod maps;
pub mod read;

// Re-export commonly used types
pub use battle::{convert, Conversion};
pub use error::{ConvertError, Result};
pub use maps::CalculatorMaps;
