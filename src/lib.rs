// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Forwarded-Email Extraction
//!
//! Extracts structured metadata from the plain-text body of an email that
//! embeds a forwarded message: whether the email is a forward, where the
//! forwarding boilerplate ends, and the original message's sender,
//! recipients, carbon-copy list, subject, date and body — across the
//! heterogeneous textual conventions of dozens of mail clients and locales.
//!
//! # Features
//!
//! - Ordered pattern catalog covering Apple Mail, Gmail, Outlook (Live /
//!   365, 2019, New 2019), Thunderbird, Yahoo Mail, MailMate, Missive and
//!   HubSpot conventions, including 17 localized Outlook 2019 narrative
//!   separators
//! - Nested (multiply-forwarded) message reconstruction
//! - Mailbox tokenizer for multi-recipient lines in any catalog shape
//! - Graceful degradation: a field that cannot be recovered is absent, never
//!   an error
//! - Linear-time matching on untrusted input (finite-automaton regex engine,
//!   no backtracking)
//!
//! # Example
//!
//! ```rust
//! use forward_extract::Parser;
//!
//! let parser = Parser::new().unwrap();
//!
//! let body = "Hello there\n\n\
//!     ---------- Forwarded message ---------\n\
//!     From: Jane Doe <jane@example.com>\n\
//!     Date: Tue, 12 Aug 2025 09:00:00 +0000\n\
//!     Subject: Quarterly Report\n\
//!     To: John <john@example.com>\n\n\
//!     Please find the report attached.\n";
//!
//! let result = parser.read(body, Some("Fwd: Quarterly Report"));
//! assert!(result.forwarded);
//!
//! let email = result.email.unwrap();
//! assert_eq!(email.from.unwrap().address.as_deref(), Some("jane@example.com"));
//! assert_eq!(email.subject.as_deref(), Some("Quarterly Report"));
//! assert_eq!(email.body, "Please find the report attached.");
//! ```

mod catalog;
mod error;
mod mailbox;
mod matcher;
mod parser;
mod types;

pub use catalog::PatternCatalog;
pub use error::{CatalogError, Result};
pub use parser::Parser;
pub use types::{ForwardBody, Mailbox, OriginalEmail, ParsedForward};
