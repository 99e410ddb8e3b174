//! # Shell Commands
//!
//! Parses one input line into a [`Command`].
//!
//! ## Command Set
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog                     Show product catalog                       │
//! │  add item_id [quantity]      Adds item(s) to cart                       │
//! │  remove item_id [quantity]   Removes item(s) from cart                  │
//! │  cart                        Show cart summary                          │
//! │  promo code                  Applies promo code                         │
//! │  clear                       Empties the cart                           │
//! │  help [command]              Show help                                  │
//! │  exit                        Terminates the application                 │
//! │                                                                         │
//! │  item_id is the 1-based row number printed by `catalog`                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use simcart_core::validation::{parse_integer, validate_promo_code, validate_quantity};
use simcart_core::ValidationError;

use crate::error::CliError;

/// Usage and description of one command, for `help`.
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

/// All commands, in the order `help` lists them.
pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "catalog",
        usage: "catalog",
        description: "Show product catalog",
    },
    CommandInfo {
        name: "add",
        usage: "add item_id [quantity]",
        description: "Adds item(s) to cart",
    },
    CommandInfo {
        name: "remove",
        usage: "remove item_id [quantity]",
        description: "Removes item(s) from cart",
    },
    CommandInfo {
        name: "cart",
        usage: "cart",
        description: "Show cart summary",
    },
    CommandInfo {
        name: "promo",
        usage: "promo code",
        description: "Applies promo code",
    },
    CommandInfo {
        name: "clear",
        usage: "clear",
        description: "Empties the cart",
    },
    CommandInfo {
        name: "help",
        usage: "help [command]",
        description: "Show help",
    },
    CommandInfo {
        name: "exit",
        usage: "exit",
        description: "Terminates the application",
    },
];

/// Looks up a command's help entry by name.
pub fn command_info(name: &str) -> Option<&'static CommandInfo> {
    COMMANDS.iter().find(|info| info.name == name)
}

/// Text printed by `help [topic]`.
pub fn help_text(topic: Option<&str>) -> String {
    if let Some(info) = topic.and_then(command_info) {
        return format!("Usage:\t{}\n    {}\n", info.usage, info.description);
    }

    let mut text = String::new();
    if let Some(unknown) = topic {
        text.push_str(&format!("Command '{}' is not found\n\n", unknown));
    }
    text.push_str("List of all commands:\n");
    for info in COMMANDS {
        text.push_str(&format!("{:<28}{}\n", info.usage, info.description));
    }
    text
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help(Option<String>),
    Catalog,
    Add { item_id: usize, quantity: i64 },
    Remove { item_id: usize, quantity: i64 },
    Promo(String),
    Clear,
    Cart,
    Exit,
}

impl Command {
    /// Parses a line. Blank lines yield `Ok(None)`.
    ///
    /// ## Errors
    /// - [`CliError::UnknownCommand`] for an unrecognised first word
    /// - [`CliError::Usage`] for missing or extra arguments
    /// - [`CliError::Core`] wrapping a validation error for bad numbers
    pub fn parse(line: &str, max_quantity: i64) -> Result<Option<Command>, CliError> {
        let line = line.trim();
        let (key, rest) = match line.split_once(char::is_whitespace) {
            Some((key, rest)) => (key, rest.trim()),
            None => (line, ""),
        };

        let command = match key {
            "" => return Ok(None),
            "help" => Command::Help((!rest.is_empty()).then(|| rest.to_string())),
            "catalog" => Command::Catalog,
            "cart" => Command::Cart,
            "clear" => Command::Clear,
            "exit" => Command::Exit,
            "promo" => {
                if rest.is_empty() {
                    return Err(usage("promo"));
                }
                Command::Promo(validate_promo_code(rest)?)
            }
            "add" => {
                let (item_id, quantity) = parse_item_args("add", rest, max_quantity)?;
                Command::Add { item_id, quantity }
            }
            "remove" => {
                let (item_id, quantity) = parse_item_args("remove", rest, max_quantity)?;
                Command::Remove { item_id, quantity }
            }
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Parses `item_id [quantity]`; quantity defaults to 1.
fn parse_item_args(name: &str, rest: &str, max_quantity: i64) -> Result<(usize, i64), CliError> {
    let args: Vec<&str> = rest.split_whitespace().collect();
    let (raw_id, raw_qty) = match args.as_slice() {
        [id] => (*id, None),
        [id, qty] => (*id, Some(*qty)),
        _ => return Err(usage(name)),
    };

    let item_id = parse_integer("item id", raw_id)?;
    if item_id < 1 {
        return Err(ValidationError::MustBePositive {
            field: "item id".to_string(),
        }
        .into());
    }

    let quantity = match raw_qty {
        Some(raw) => parse_integer("quantity", raw)?,
        None => 1,
    };
    validate_quantity(quantity, max_quantity)?;

    let item_id = usize::try_from(item_id).map_err(|_| ValidationError::OutOfRange {
        field: "item id".to_string(),
        min: 1,
        max: i64::MAX,
    })?;

    Ok((item_id, quantity))
}

fn usage(name: &str) -> CliError {
    let usage = command_info(name).map(|info| info.usage).unwrap_or(name);
    CliError::Usage(usage.to_string())
}
