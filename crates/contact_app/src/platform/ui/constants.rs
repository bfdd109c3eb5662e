pub const BRAND: &str = "AMO DATA & IA";
pub const HEADING: &str = "Contactez-nous";
pub const SUBMIT_LABEL: &str = "Envoyer";
pub const MISSING_FIELDS_PREFIX: &str = "Veuillez remplir : ";
pub const ALREADY_SENDING: &str = "Un envoi est déjà en cours.";
pub const PROMPT: &str = "> ";
