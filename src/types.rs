//! Core result types for forwarded-email extraction

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A display-name / address pair extracted from a header or recipient line.
///
/// Either side may be absent: some clients only print a name, others fill the
/// name with the address itself (in which case the redundant name is
/// dropped).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mailbox {
    /// Address part (e.g. "jane@example.com"), absent when the captured
    /// token does not have a valid address shape
    pub address: Option<String>,

    /// Display name (e.g. "Jane Doe")
    pub name: Option<String>,
}

impl Mailbox {
    /// Check whether neither an address nor a name was recovered
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.address.is_none() && self.name.is_none()
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.address) {
            (Some(name), Some(address)) => write!(f, "{name} <{address}>"),
            (Some(name), None) => write!(f, "{name}"),
            (None, Some(address)) => write!(f, "{address}"),
            (None, None) => Ok(()),
        }
    }
}

/// The two halves of a forwarded email body: what the forwarding user wrote,
/// and the embedded original message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForwardBody {
    /// Text the forwarding user typed above the boilerplate
    pub message: String,

    /// The embedded original message, boilerplate separator excluded
    pub email: String,
}

/// The reconstructed original (forwarded) email.
///
/// Every field degrades independently: a client that prints no `Cc:` line
/// simply yields an empty list, a missing `Date:` line yields `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OriginalEmail {
    /// Body of the original message, header boilerplate stripped
    pub body: String,

    /// Original author
    pub from: Option<Mailbox>,

    /// Primary recipients
    pub to: Vec<Mailbox>,

    /// Carbon-copy recipients
    pub cc: Vec<Mailbox>,

    /// Original subject
    pub subject: Option<String>,

    /// Original date, verbatim as printed by the client (often localized)
    pub date: Option<String>,
}

impl OriginalEmail {
    /// Best-effort RFC 2822 interpretation of the extracted date string.
    ///
    /// Clients print dates in localized, free-form text; this only succeeds
    /// for the clients that keep the RFC 2822 shape.
    #[must_use]
    pub fn parsed_date(&self) -> Option<DateTime<FixedOffset>> {
        self.date
            .as_deref()
            .and_then(|date| DateTime::parse_from_rfc2822(date).ok())
    }
}

/// Complete result of reading a potentially forwarded email.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedForward {
    /// Whether the body embeds a recognized forwarded message
    pub forwarded: bool,

    /// Text the forwarding user typed, when any
    pub message: Option<String>,

    /// The reconstructed original email, when the body is a forward
    pub email: Option<OriginalEmail>,
}
