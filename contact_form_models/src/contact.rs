use std::sync::LazyLock;

use regex::Regex;

use crate::macros::nutype_string;

/// Upper bound for the length of a message, counted in UTF-16 code units like
/// the browser's `maxlength`.
pub const MESSAGE_MAX_LENGTH: usize = 500;

/// The email shape accepted by browsers for `<input type="email">`.
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

/// A contact request that passed validation and may be handed to the mail relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: ContactSubject,
    pub message: ContactMessageContent,
}

nutype_string!(ContactName(validate(not_empty)));
nutype_string!(ContactEmail(validate(not_empty, regex = EMAIL_REGEX)));
nutype_string!(ContactSubject(validate(not_empty)));
nutype_string!(ContactMessageContent(validate(
    not_empty,
    predicate = |x| x.encode_utf16().count() <= MESSAGE_MAX_LENGTH
)));
