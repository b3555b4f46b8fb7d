//! Parsing of interactive commands.

use thiserror::Error as ThisError;

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `set <key>=<value>`
    Set { key: String, value: String },
    /// `get <key>`
    Get { key: String },
    /// `del <key>`
    Del { key: String },
    /// `rand <n>`: insert `n` random keys.
    Rand { count: usize },
    Stats,
    Help,
    /// `exit` or `quit`
    Exit,
}

/// Input the session rejects. The message is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CommandError {
    #[error("Usage: set <key>=<value>")]
    SetUsage,

    #[error("Usage: get <key>")]
    GetUsage,

    #[error("Usage: del <key>")]
    DelUsage,

    #[error("Usage: rand <n>")]
    RandUsage,

    #[error("not a number: {0}")]
    InvalidCount(String),

    #[error("unknown command: {0}")]
    Unknown(String),
}

impl Command {
    /// Parse one input line.
    ///
    /// The verb is case-insensitive and fields are separated by whitespace.
    /// A blank line parses to `Ok(None)`.
    ///
    /// # Example
    /// ```
    /// use saplingdb::cli::Command;
    ///
    /// let cmd = Command::parse("SET color=dark=blue").unwrap();
    /// assert_eq!(
    ///     cmd,
    ///     Some(Command::Set { key: "color".into(), value: "dark=blue".into() })
    /// );
    /// assert_eq!(Command::parse("   ").unwrap(), None);
    /// ```
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut fields = line.split_whitespace();
        let Some(verb) = fields.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = fields.collect();

        let command = match verb.to_lowercase().as_str() {
            "set" => {
                let &[arg] = args.as_slice() else {
                    return Err(CommandError::SetUsage);
                };
                let (key, value) = arg.split_once('=').ok_or(CommandError::SetUsage)?;
                Command::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "get" => Command::Get {
                key: single_arg(&args, CommandError::GetUsage)?,
            },
            "del" => Command::Del {
                key: single_arg(&args, CommandError::DelUsage)?,
            },
            "rand" => {
                let arg = single_arg(&args, CommandError::RandUsage)?;
                let count = arg
                    .parse()
                    .map_err(|_| CommandError::InvalidCount(arg.clone()))?;
                Command::Rand { count }
            }
            "stats" => Command::Stats,
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };
        Ok(Some(command))
    }
}

fn single_arg(args: &[&str], usage: CommandError) -> Result<String, CommandError> {
    match args {
        [arg] => Ok(arg.to_string()),
        _ => Err(usage),
    }
}
