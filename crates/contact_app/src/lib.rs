//! Terminal rendering surface for the contact form.
pub mod platform;
