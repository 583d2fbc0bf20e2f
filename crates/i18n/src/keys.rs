//! Lookup keys used by the contact section and the hero buttons.

pub const NAME_PLACEHOLDER: &str = "CONTACT.NAME_PLACEHOLDER";
pub const NAME_ERROR: &str = "CONTACT.NAME_ERROR";
pub const EMAIL_PLACEHOLDER: &str = "CONTACT.EMAIL_PLACEHOLDER";
pub const EMAIL_ERROR: &str = "CONTACT.EMAIL_ERROR";
pub const MESSAGE_PLACEHOLDER: &str = "CONTACT.MESSAGE_PLACEHOLDER";
pub const MESSAGE_ERROR: &str = "CONTACT.MESSAGE_ERROR";
pub const PRIVACY_TEXT: &str = "CONTACT.PRIVACY_TEXT";
pub const PRIVACY_ERROR: &str = "CONTACT.PRIVACY_ERROR";
pub const SEND: &str = "CONTACT.SEND";
pub const SUCCESS: &str = "CONTACT.SUCCESS";
pub const RETRY: &str = "CONTACT.RETRY";

pub const CHECK_WORK: &str = "ABOVE.CHECK_WORK";
pub const CONTACT_ME: &str = "ABOVE.CONTACT_ME";
