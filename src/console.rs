//! Line-oriented command interpreter over the in-memory contact store.

use crate::{
    models::legacy_contact::LegacyContact,
    repository::legacy_contact::{CrudRepository, LegacyContactStore},
};

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { name: String, phone: String, email: String },
    Find { id: i64 },
    Delete { id: i64 },
    Update { id: i64, name: String, phone: String, email: String },
    List,
    Search { name: String },
}

/// Why a line could not be turned into a `Command`. The display text is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Usage(&'static str),
    InvalidId(String),
    Unknown(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "No command entered"),
            ParseError::Usage(usage) => write!(f, "Usage: {}", usage),
            ParseError::InvalidId(raw) => write!(f, "Invalid id: {}", raw),
            ParseError::Unknown(cmd) => write!(f, "Unknown command: {}", cmd),
        }
    }
}

impl std::error::Error for ParseError {}

fn parse_id(raw: &str) -> Result<i64, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidId(raw.to_string()))
}

/// Parses one input line. Arguments are whitespace separated; the command name is case-insensitive.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let args: Vec<&str> = line.split_whitespace().collect();
    let Some((cmd, rest)) = args.split_first() else {
        return Err(ParseError::Empty);
    };

    match cmd.to_lowercase().as_str() {
        "add" => match rest {
            [name, phone, email, ..] => Ok(Command::Add {
                name: name.to_string(),
                phone: phone.to_string(),
                email: email.to_string(),
            }),
            _ => Err(ParseError::Usage("add <name> <phone> <email>")),
        },
        "find" => match rest {
            [id, ..] => Ok(Command::Find { id: parse_id(id)? }),
            _ => Err(ParseError::Usage("find <id>")),
        },
        "delete" => match rest {
            [id, ..] => Ok(Command::Delete { id: parse_id(id)? }),
            _ => Err(ParseError::Usage("delete <id>")),
        },
        "update" => match rest {
            [id, name, phone, email, ..] => Ok(Command::Update {
                id: parse_id(id)?,
                name: name.to_string(),
                phone: phone.to_string(),
                email: email.to_string(),
            }),
            _ => Err(ParseError::Usage("update <id> <name> <phone> <email>")),
        },
        "list" => Ok(Command::List),
        "search" => match rest {
            [name, ..] => Ok(Command::Search { name: name.to_string() }),
            _ => Err(ParseError::Usage("search <name>")),
        },
        _ => Err(ParseError::Unknown(cmd.to_string())),
    }
}

/// Executes commands against a store it owns and returns the lines to print.
#[derive(Debug, Default)]
pub struct CommandProcessor {
    store: LegacyContactStore,
}

impl CommandProcessor {
    pub fn new(store: LegacyContactStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &LegacyContactStore {
        &self.store
    }

    /// Parses and runs one line. Parse failures are reported as output, never as panics.
    pub fn process(&mut self, line: &str) -> Vec<String> {
        match parse(line) {
            Ok(command) => self.execute(command),
            Err(e) => vec![e.to_string()],
        }
    }

    pub fn execute(&mut self, command: Command) -> Vec<String> {
        match command {
            Command::Add { name, phone, email } => {
                let id = self.store.create(LegacyContact::new(&name, &phone, &email));
                tracing::debug!("Console added contact {}", id);
                vec![format!("Contact added with id {}", id)]
            }
            Command::Find { id } => match self.store.read(id) {
                Some(contact) => vec![format!("Contact: {}", contact)],
                None => vec!["Contact not found".to_string()],
            },
            Command::Delete { id } => {
                self.store.delete(id);
                vec!["Contact deleted".to_string()]
            }
            Command::Update { id, name, phone, email } => {
                self.store.update(LegacyContact {
                    id,
                    name,
                    phone,
                    email,
                });
                vec!["Contact updated".to_string()]
            }
            Command::List => {
                let contacts = self.store.find_all();
                if contacts.is_empty() {
                    vec!["Contact list is empty".to_string()]
                } else {
                    contacts.iter().map(ToString::to_string).collect()
                }
            }
            Command::Search { name } => {
                let matches = self.store.find_by_name(&name);
                if matches.is_empty() {
                    vec![format!("No contacts with a name containing: {}", name)]
                } else {
                    matches.iter().map(ToString::to_string).collect()
                }
            }
        }
    }
}
