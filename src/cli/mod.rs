//! Line-oriented command interface over a [`BTree`](crate::BTree).
//!
//! Thin glue around the index: it parses `set`/`get`/`del`/`rand` commands,
//! applies them, and prints results. All user-facing I/O and logging happens
//! here; the index itself never prints.
//!
//! # Components
//! - [`Command`] / [`CommandError`] - Parsing of one input line
//! - [`Session`] - The read-execute-print loop
//! - [`random_key`] - Key generation for `rand`

mod command;
mod keygen;
mod session;

pub use command::{Command, CommandError};
pub use keygen::{random_key, KEY_ALPHABET, RANDOM_KEY_LEN};
pub use session::Session;
