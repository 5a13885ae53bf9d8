//! Extraction orchestrator
//!
//! For each semantic field the orchestrator tries a fixed, ordered list of
//! extraction methods, stricter first, and keeps the first non-empty result.
//! Absence of a field is a normal outcome, never an error.

use crate::catalog::{CompiledPattern, PatternCatalog};
use crate::error::Result;
use crate::mailbox::{extract_mailboxes, prepare_mailbox, tokenize};
use crate::matcher::{first_match, reconcile_split, split_match, strip_matches};
use crate::types::{ForwardBody, Mailbox, OriginalEmail, ParsedForward};
use tracing::debug;

/// Forwarded-email parser.
///
/// Compiles the pattern catalog once; afterwards every call is a pure
/// function of its inputs and the parser can be shared freely across
/// threads.
#[derive(Debug, Clone)]
pub struct Parser {
    catalog: PatternCatalog,
}

impl Parser {
    /// Build a parser with the built-in pattern catalog.
    pub fn new() -> Result<Self> {
        Ok(Self {
            catalog: PatternCatalog::compile()?,
        })
    }

    /// Build a parser around an already compiled catalog.
    #[must_use]
    pub const fn with_catalog(catalog: PatternCatalog) -> Self {
        Self { catalog }
    }

    /// Read a potentially forwarded email from its body text and optional
    /// raw subject line.
    ///
    /// The subject is used for forward detection only: the riskier
    /// From-header body split is attempted solely when the subject carries a
    /// forward prefix.
    #[must_use]
    pub fn read(&self, body: &str, subject: Option<&str>) -> ParsedForward {
        let parsed_subject = subject.and_then(|s| self.parse_subject(s));
        let normalized = self.normalize_body(body);

        let Some(forward) = self.split_forward_body(&normalized, parsed_subject.is_some()) else {
            return ParsedForward::default();
        };

        let mut email = self.parse_original_segment(&forward.email, &normalized);
        if email.subject.is_none() {
            // Some clients repeat no Subject line inside the embedded
            // message; fall back to the outer subject
            email.subject = parsed_subject.filter(|s| !s.is_empty());
        }

        ParsedForward {
            forwarded: true,
            message: if forward.message.is_empty() {
                None
            } else {
                Some(forward.message)
            },
            email: Some(email),
        }
    }

    /// Parse the subject part of the email.
    ///
    /// Returns the subject with its forward prefix stripped, `Some("")` when
    /// the forwarded subject is empty ("Fwd: "), or `None` when the subject
    /// carries no recognized forward prefix. Only the first matching prefix
    /// is stripped: re-parsing the returned value strips nothing further.
    #[must_use]
    pub fn parse_subject(&self, subject: &str) -> Option<String> {
        let outcome = first_match(&self.catalog.subject, subject);
        let slots = outcome.slots()?;

        slots
            .get(1)
            .map(|slot| slot.as_deref().unwrap_or("").trim().to_owned())
    }

    /// Parse the body part of the email into the user-authored message and
    /// the embedded original message.
    ///
    /// `forwarded` tells the parser that the email was already identified as
    /// a forward (from its subject); only then is the less certain
    /// From-header split attempted when no separator line is found.
    #[must_use]
    pub fn parse_body(&self, body: &str, forwarded: bool) -> Option<ForwardBody> {
        let normalized = self.normalize_body(body);
        self.split_forward_body(&normalized, forwarded)
    }

    /// Parse the original forwarded email out of its body segment.
    ///
    /// `text` is the embedded message segment (the `email` half of
    /// [`parse_body`](Self::parse_body)); `body` is the full email body,
    /// needed because some clients carry the author and date on the
    /// separator line itself rather than in the embedded segment.
    #[must_use]
    pub fn parse_original_email(&self, text: &str, body: &str) -> OriginalEmail {
        let normalized = self.normalize_body(body);
        self.parse_original_segment(text, &normalized)
    }

    /// Tokenize a single recipient line into its mailbox entries.
    #[must_use]
    pub fn parse_mailboxes(&self, line: &str) -> Vec<Mailbox> {
        tokenize(&self.catalog, line)
    }

    /// Unify line endings and strip the invisible characters some clients
    /// leave behind, before the first matching attempt.
    fn normalize_body(&self, body: &str) -> String {
        let text = self.catalog.carriage_return.replace_all(body, "\n");
        let text = self.catalog.byte_order_mark.replace_all(&text, "");
        let text = self
            .catalog
            .trailing_non_breaking_space
            .replace_all(&text, "");
        self.catalog
            .non_breaking_space
            .replace_all(&text, " ")
            .into_owned()
    }

    /// Split an already normalized body at the forwarding boundary.
    fn split_forward_body(&self, text: &str, forwarded: bool) -> Option<ForwardBody> {
        // First method: split at the separator line (Apple Mail, Gmail,
        // Outlook Live / 365, MailMate). The delimiter line itself is
        // dropped, also for nested occurrences.
        let parts = split_match(&self.catalog.separator, text);
        if let Some((message, email)) = reconcile_split(&parts, 3, &[2], |_| false) {
            debug!("body split at separator line");
            return Some(ForwardBody {
                message: message.trim().to_owned(),
                email: email.trim().to_owned(),
            });
        }

        // Second method: split at the original From header line (New
        // Outlook 2019, Outlook Live / 365). Less certain, so only
        // attempted once the subject confirmed the forward. The header line
        // stays attached to the embedded message; only the From value slot
        // is dropped.
        if forwarded {
            let parts = split_match(&self.catalog.original_from, text);
            if let Some((message, email)) = reconcile_split(&parts, 4, &[1, 3], |slot| slot == 2) {
                debug!("body split at From header line");
                return Some(ForwardBody {
                    message: message.trim().to_owned(),
                    email: email.trim().to_owned(),
                });
            }
        }

        None
    }

    fn parse_original_segment(&self, text: &str, body: &str) -> OriginalEmail {
        let text = self.strip_quote_markers(text);

        OriginalEmail {
            body: self.parse_original_body(&text),
            from: self.parse_original_from(&text, body),
            to: self.parse_original_to(&text),
            cc: self.parse_original_cc(&text),
            subject: self.parse_original_subject(&text),
            date: self.parse_original_date(&text, body),
        }
    }

    /// Remove quote markers (">") and four-space indents that clients add
    /// in front of the embedded message, keeping line breaks.
    fn strip_quote_markers(&self, text: &str) -> String {
        let text = self.catalog.byte_order_mark.replace_all(text, "");
        let text = self.catalog.quote_line_break.replace_all(&text, "");
        let text = self.catalog.quote.replace_all(&text, "");
        self.catalog.four_spaces.replace_all(&text, "").into_owned()
    }

    fn parse_original_body(&self, text: &str) -> String {
        // First method: everything after the Subject (Outlook Live / 365),
        // Cc, To, Reply-To (Apple Mail, Gmail) or Date (MailMate) line. A
        // blank line must separate the header block from the body.
        let ordered: [&[CompiledPattern]; 5] = [
            &self.catalog.original_subject,
            &self.catalog.original_cc,
            &self.catalog.original_to,
            &self.catalog.original_reply_to,
            &self.catalog.original_date,
        ];

        for alternatives in ordered {
            let parts = split_match(alternatives, text);
            if parts.len() >= 4 && parts[3].starts_with("\n\n") {
                if let Some((_, body)) = reconcile_split(&parts, 4, &[3], |slot| slot == 2) {
                    return body.trim().to_owned();
                }
            }
        }

        // Second method: everything after the Subject line without
        // requiring the blank line (New Outlook 2019, Yahoo Mail)
        let subject_alternatives: Vec<CompiledPattern> = self
            .catalog
            .original_subject
            .iter()
            .chain(&self.catalog.original_subject_lax)
            .cloned()
            .collect();

        let parts = split_match(&subject_alternatives, text);
        if let Some((_, body)) = reconcile_split(&parts, 4, &[3], |slot| slot == 2) {
            return body.trim().to_owned();
        }

        // Third method: no structural markers at all (Outlook 2019); the
        // whole segment is the body
        text.to_owned()
    }

    fn parse_original_from(&self, text: &str, body: &str) -> Option<Mailbox> {
        // First method: the From header line (Apple Mail, Gmail, Outlook
        // Live / 365, New Outlook 2019, Thunderbird)
        let author = extract_mailboxes(&self.catalog, &self.catalog.original_from, text)
            .into_iter()
            .next();
        if let Some(author) = author {
            if !author.is_empty() {
                return Some(author);
            }
        }

        // Second method: the narrative separator line (Outlook 2019)
        let outcome = first_match(&self.catalog.separator_with_information, body);
        if outcome.named("from_address").is_some() || outcome.named("from_name").is_some() {
            let mailbox = prepare_mailbox(
                &self.catalog,
                outcome.named("from_address"),
                outcome.named("from_name"),
            );
            if !mailbox.is_empty() {
                return Some(mailbox);
            }
        }

        // Third method: lax From patterns (Yahoo Mail); name and address
        // are the last two capture slots
        let outcome = first_match(&self.catalog.original_from_lax, text);
        if let Some(slots) = outcome.slots() {
            if slots.len() > 1 {
                let address = slots[slots.len() - 1].as_deref();
                let name = if slots.len() >= 3 {
                    slots[slots.len() - 2].as_deref()
                } else {
                    None
                };
                let mailbox = prepare_mailbox(&self.catalog, address, name);
                if !mailbox.is_empty() {
                    return Some(mailbox);
                }
            }
        }

        None
    }

    fn parse_original_to(&self, text: &str) -> Vec<Mailbox> {
        // First method: the To header line (Apple Mail, Gmail, Outlook
        // Live / 365, New Outlook 2019, Thunderbird)
        let recipients = extract_mailboxes(&self.catalog, &self.catalog.original_to, text);
        if !recipients.is_empty() {
            return recipients;
        }

        // Second method: Yahoo Mail prints the Subject, Date and Cc parts
        // stuck to the To part without line breaks; strip them before the
        // lax retry
        let cleaned = strip_matches(&self.catalog.original_subject_lax, text);
        let cleaned = strip_matches(&self.catalog.original_date_lax, &cleaned);
        let cleaned = strip_matches(&self.catalog.original_cc_lax, &cleaned);

        extract_mailboxes(&self.catalog, &self.catalog.original_to_lax, &cleaned)
    }

    fn parse_original_cc(&self, text: &str) -> Vec<Mailbox> {
        // First method: the Cc header line
        let recipients = extract_mailboxes(&self.catalog, &self.catalog.original_cc, text);
        if !recipients.is_empty() {
            return recipients;
        }

        // Second method: strip adjacent Subject and Date fragments, then
        // retry lax (Yahoo Mail)
        let cleaned = strip_matches(&self.catalog.original_subject_lax, text);
        let cleaned = strip_matches(&self.catalog.original_date_lax, &cleaned);

        extract_mailboxes(&self.catalog, &self.catalog.original_cc_lax, &cleaned)
    }

    fn parse_original_subject(&self, text: &str) -> Option<String> {
        let outcome = first_match(&self.catalog.original_subject, text);
        if let Some(slots) = outcome.slots() {
            return slots.get(1).map(|s| s.as_deref().unwrap_or("").trim().to_owned());
        }

        let outcome = first_match(&self.catalog.original_subject_lax, text);
        let slots = outcome.slots()?;
        slots
            .get(1)
            .map(|s| s.as_deref().unwrap_or("").trim().to_owned())
    }

    fn parse_original_date(&self, text: &str, body: &str) -> Option<String> {
        // First method: the Date header line
        let outcome = first_match(&self.catalog.original_date, text);
        if let Some(slots) = outcome.slots() {
            if let Some(Some(value)) = slots.get(1) {
                return Some(value.trim().to_owned());
            }
        }

        // Second method: the narrative separator line (Outlook 2019)
        let outcome = first_match(&self.catalog.separator_with_information, body);
        if let Some(date) = outcome.named("date") {
            return Some(date.trim().to_owned());
        }

        // Third method: strip the Subject fragment stuck to the Date part,
        // then retry lax (Yahoo Mail)
        let cleaned = strip_matches(&self.catalog.original_subject_lax, text);
        let outcome = first_match(&self.catalog.original_date_lax, &cleaned);
        let slots = outcome.slots()?;
        match slots.get(1) {
            Some(Some(value)) => Some(value.trim().to_owned()),
            _ => None,
        }
    }
}
