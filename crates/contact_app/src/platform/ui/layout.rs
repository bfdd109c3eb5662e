use super::constants::*;
use super::render::{LineStyle, ScreenLine};

/// Static lines printed once when the interactive form opens.
pub fn initial_lines() -> Vec<ScreenLine> {
    let mut lines = vec![
        ScreenLine::new(LineStyle::Heading, BRAND),
        ScreenLine::new(LineStyle::Heading, HEADING),
    ];
    lines.extend(help_lines());
    lines
}

pub fn help_lines() -> Vec<ScreenLine> {
    [
        "name <texte>     Votre nom",
        "email <texte>    Votre email",
        "message <texte>  Votre message",
        "send | envoyer   Envoyer le formulaire",
        "show             Afficher le formulaire",
        "help             Afficher cette aide",
        "quit             Quitter",
    ]
    .into_iter()
    .map(|text| ScreenLine::new(LineStyle::Hint, text))
    .collect()
}
