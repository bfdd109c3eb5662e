use contact_core::Field;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Edit { field: Field, value: String },
    Send,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("commande vide")]
    Empty,
    #[error("commande inconnue : {0} (tapez `help`)")]
    Unknown(String),
}

/// Parses one line typed by the user.
///
/// Field commands keep the rest of the line verbatim apart from the single
/// separator; an empty remainder clears the field.
pub fn parse_command(line: &str) -> Result<InputCommand, InputError> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    if line.trim().is_empty() {
        return Err(InputError::Empty);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line, ""),
    };

    if let Ok(field) = word.parse::<Field>() {
        return Ok(InputCommand::Edit {
            field,
            value: rest.to_string(),
        });
    }

    match word.to_ascii_lowercase().as_str() {
        "send" | "envoyer" => Ok(InputCommand::Send),
        "show" | "afficher" => Ok(InputCommand::Show),
        "help" | "aide" | "?" => Ok(InputCommand::Help),
        "quit" | "exit" | "quitter" => Ok(InputCommand::Quit),
        _ => Err(InputError::Unknown(word.to_string())),
    }
}
