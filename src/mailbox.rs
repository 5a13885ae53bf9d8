//! Mailbox tokenizer
//!
//! Consumes a single header line that may hold several
//! `"Display Name" <address>`-style entries, in any of the shapes the
//! mailbox catalog field knows, separated by locale-specific punctuation.

use crate::catalog::{CompiledPattern, PatternCatalog};
use crate::matcher::first_match;
use crate::types::Mailbox;

/// Punctuation accepted between two mailbox entries on one line.
/// Comma: Apple Mail, Gmail, New Outlook 2019, Thunderbird.
/// Semicolon: Outlook Live / 365, Yahoo Mail.
const MAILBOX_SEPARATORS: [char; 2] = [',', ';'];

/// Match a header field against `text`, then tokenize the matched value
/// (the last capture slot) into its mailbox entries.
pub(crate) fn extract_mailboxes(
    catalog: &PatternCatalog,
    alternatives: &[CompiledPattern],
    text: &str,
) -> Vec<Mailbox> {
    let outcome = first_match(alternatives, text);
    let Some(slots) = outcome.slots() else {
        return Vec::new();
    };
    let Some(line) = slots.last().and_then(Option::as_deref) else {
        return Vec::new();
    };

    tokenize(catalog, line)
}

/// Tokenize one recipient line into mailbox entries.
///
/// Each iteration either consumes a non-empty matched prefix or emits the
/// whole remainder and stops, so the line strictly shrinks and the loop
/// terminates within the line's length.
pub(crate) fn tokenize(catalog: &PatternCatalog, line: &str) -> Vec<Mailbox> {
    let mut mailboxes = Vec::new();
    let mut remaining = line.trim().to_owned();

    while !remaining.is_empty() {
        let outcome = first_match(&catalog.mailbox, &remaining);

        let consumed = match outcome.slots() {
            Some(slots) => {
                let whole = slots.first().and_then(Option::as_deref).unwrap_or("");
                if whole.is_empty() {
                    0
                } else {
                    let (address, name) = if slots.len() >= 3 {
                        (slots[2].as_deref(), slots[1].as_deref())
                    } else {
                        (slots[1].as_deref(), None)
                    };
                    mailboxes.push(prepare_mailbox(catalog, address, name));
                    whole.len()
                }
            }
            None => 0,
        };

        if consumed == 0 {
            // No recognized shape left: the remainder is a bare name or
            // address
            mailboxes.push(prepare_mailbox(catalog, Some(remaining.as_str()), None));
            break;
        }

        remaining = remaining[consumed..].trim().to_owned();

        // ", Nicholas <nicholas@globex.corp>"
        if let Some(rest) = remaining
            .strip_prefix(MAILBOX_SEPARATORS)
            .map(|rest| rest.trim().to_owned())
        {
            remaining = rest;
        }
    }

    mailboxes
}

/// Build a [`Mailbox`] from raw captured tokens.
///
/// A token captured as an address but failing address-shape validation is
/// reclassified as a display name — some clients only print the name. A name
/// identical to the address is dropped ("bessie.berry@acme.com
/// <bessie.berry@acme.com>").
pub(crate) fn prepare_mailbox(
    catalog: &PatternCatalog,
    address: Option<&str>,
    name: Option<&str>,
) -> Mailbox {
    let mut address = address.map_or_else(String::new, |a| a.trim().to_owned());
    let mut name = name.map_or_else(String::new, |n| n.trim().to_owned());

    let shape_ok =
        !address.is_empty() && first_match(&catalog.mailbox_address, &address).slots().is_some();
    if !shape_ok {
        name = address;
        address = String::new();
    }

    let address = if address.is_empty() {
        None
    } else {
        Some(address)
    };
    let name = if name.is_empty() || address.as_deref() == Some(name.as_str()) {
        None
    } else {
        Some(name)
    };

    Mailbox { address, name }
}
