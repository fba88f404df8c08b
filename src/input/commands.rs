use std::str::FromStr;

/// A line typed by the user while the clock is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a clock for a zone identifier or `local`
    Add {
        /// Zone identifier as typed
        zone: String,
    },
    /// Remove the clock with this id
    Remove {
        /// Clock id shown on the card
        id: String,
    },
    /// Toggle the pin on a clock
    Pin {
        /// Clock id shown on the card
        id: String,
    },
    /// Free-text zone search
    Search {
        /// Raw query text
        query: String,
    },
    /// Shift every clock by a signed number of minutes
    Travel {
        /// Offset from real time
        minutes: i64,
    },
    /// Back to real time
    Reset,
    /// Toggle dark/light
    Theme,
    /// Browse known zones
    List {
        /// Optional substring filter
        filter: Option<String>,
    },
    /// Show usage
    Help,
    /// Leave the clock
    Quit,
}

/// Why a typed line is not a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    /// Blank line
    #[error("empty command")]
    Empty,
    /// Verb not recognized
    #[error("unknown command '{0}', type `help` for a list")]
    UnknownCommand(String),
    /// Verb typed without its argument
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        /// Verb that was typed
        command: &'static str,
        /// What the verb expects
        argument: &'static str,
    },
    /// `travel` argument is not an integer
    #[error("'{0}' is not a whole number of minutes")]
    InvalidMinutes(String),
}

impl Command {
    /// Usage lines shown by `help`.
    pub fn descriptions() -> &'static str {
        "Commands:\n  \
        add <zone>         add a clock (e.g. add Asia/Tokyo, add local)\n  \
        remove <id>        remove a clock\n  \
        pin <id>           pin or unpin a clock\n  \
        search <text>      find zones by name, city, region, country, abbreviation or time\n  \
        travel <minutes>   shift all clocks (e.g. travel +90, travel -30)\n  \
        reset              back to the current time\n  \
        theme              toggle dark/light\n  \
        list [filter]      browse every known zone\n  \
        help               show this help\n  \
        quit               exit"
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandParseError::Empty);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let argument = (!rest.is_empty()).then(|| rest.to_string());

        match verb.to_lowercase().as_str() {
            "add" => argument
                .map(|zone| Command::Add { zone })
                .ok_or(CommandParseError::MissingArgument { command: "add", argument: "a timezone" }),
            "remove" | "rm" => argument
                .map(|id| Command::Remove { id })
                .ok_or(CommandParseError::MissingArgument { command: "remove", argument: "a clock id" }),
            "pin" => argument
                .map(|id| Command::Pin { id })
                .ok_or(CommandParseError::MissingArgument { command: "pin", argument: "a clock id" }),
            "search" | "find" => argument
                .map(|query| Command::Search { query })
                .ok_or(CommandParseError::MissingArgument { command: "search", argument: "some text" }),
            "travel" => {
                let raw = argument.ok_or(CommandParseError::MissingArgument {
                    command: "travel",
                    argument: "a number of minutes",
                })?;
                raw.parse::<i64>()
                    .map(|minutes| Command::Travel { minutes })
                    .map_err(|_| CommandParseError::InvalidMinutes(raw))
            }
            "reset" => Ok(Command::Reset),
            "theme" => Ok(Command::Theme),
            "list" | "explore" => Ok(Command::List { filter: argument }),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandParseError::UnknownCommand(other.to_string())),
        }
    }
}
