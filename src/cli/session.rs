//! Interactive session: reads commands, applies them to a tree, prints results.

use std::io::{BufRead, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::cli::command::{Command, CommandError};
use crate::cli::keygen::{random_key, RANDOM_KEY_LEN};
use crate::common::{Error, Result};
use crate::index::btree::BTree;

const PROMPT: &str = "> ";
const NOT_FOUND: &str = "Key not found.";
const HELP: &str = "\
Usage:
set <key>=<val>
del <key>
get <key>
rand <n>
stats
exit";

/// A line-oriented shell over one [`BTree`].
///
/// Generic over its output so tests can capture everything it prints.
///
/// # Example
/// ```
/// use saplingdb::cli::Session;
/// use saplingdb::BTree;
///
/// let mut out = Vec::new();
/// let mut session = Session::with_seed(BTree::new(), &mut out, 1);
/// session.run("set a=1\nget a\n".as_bytes()).unwrap();
/// drop(session);
///
/// let printed = String::from_utf8(out).unwrap();
/// assert!(printed.contains("1\n"));
/// ```
pub struct Session<W: Write> {
    tree: BTree,
    out: W,
    rng: StdRng,
}

impl<W: Write> Session<W> {
    /// Create a session whose `rand` keys come from OS entropy.
    pub fn new(tree: BTree, out: W) -> Self {
        Self {
            tree,
            out,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a session with deterministic `rand` keys.
    pub fn with_seed(tree: BTree, out: W, seed: u64) -> Self {
        Self {
            tree,
            out,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn tree(&self) -> &BTree {
        &self.tree
    }

    /// Consume the session, returning the tree and the output sink.
    pub fn into_parts(self) -> (BTree, W) {
        (self.tree, self.out)
    }

    /// Process lines from `input` until EOF or `exit`.
    ///
    /// Bad input is reported to the user and the session continues.
    ///
    /// # Errors
    /// `Error::Io` if reading input or writing output fails.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        info!(
            min_children = self.tree.config().min_children(),
            "session started"
        );
        self.prompt()?;

        for line in input.lines() {
            let line = line?;
            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Exit)) => break,
                Ok(Some(command)) => self.execute(command)?,
                Err(CommandError::Unknown(verb)) => {
                    warn!(%verb, "unknown command");
                    writeln!(self.out, "{HELP}")?;
                }
                Err(err) => {
                    warn!(%err, "rejected input");
                    writeln!(self.out, "{err}")?;
                }
            }
            self.prompt()?;
        }

        info!(items = self.tree.len(), "session ended");
        Ok(())
    }

    /// Apply one command and print its result.
    ///
    /// # Errors
    /// `Error::Io` if writing output fails.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        debug!(?command, "executing");

        match command {
            Command::Set { key, value } => {
                self.tree.insert(key, value);
                self.print_tree()?;
            }
            Command::Get { key } => match self.tree.find(key.as_bytes()) {
                Ok(value) => writeln!(self.out, "{}", String::from_utf8_lossy(value))?,
                Err(Error::KeyNotFound) => writeln!(self.out, "{NOT_FOUND}")?,
                Err(err) => return Err(err),
            },
            Command::Del { key } => {
                if self.tree.delete(key.as_bytes()) {
                    self.print_tree()?;
                } else {
                    writeln!(self.out, "{NOT_FOUND}")?;
                }
            }
            Command::Rand { count } => {
                for _ in 0..count {
                    let key = random_key(&mut self.rng, RANDOM_KEY_LEN);
                    self.tree.insert(key.clone(), key);
                }
                debug!(count, items = self.tree.len(), "inserted random keys");
                self.print_tree()?;
            }
            Command::Stats => {
                writeln!(
                    self.out,
                    "items: {}, height: {}",
                    self.tree.len(),
                    self.tree.height()
                )?;
                writeln!(self.out, "{}", self.tree.stats().snapshot())?;
            }
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Exit => {}
        }
        Ok(())
    }

    fn print_tree(&mut self) -> Result<()> {
        write!(self.out, "{}", self.tree)?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()?;
        Ok(())
    }
}
