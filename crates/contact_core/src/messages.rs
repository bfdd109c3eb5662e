//! User-facing strings shown by the rendering surface.

/// Status line while a request is outstanding.
pub const STATUS_SENDING: &str = "Envoi en cours...";

/// Status line after the endpoint accepted the message.
pub const STATUS_SUCCESS: &str = "Message envoyé avec succès !";

/// Status line when the endpoint declined without giving a reason.
pub const STATUS_REJECTED_FALLBACK: &str = "Erreur lors de l'envoi.";

/// Status line when no interpretable response could be obtained.
pub const STATUS_TRANSPORT_FAILURE: &str = "Erreur serveur. Veuillez réessayer plus tard.";

/// Acknowledgment shown next to the form after a successful send.
pub const ACKNOWLEDGMENT: &str = "Message envoyé !";
