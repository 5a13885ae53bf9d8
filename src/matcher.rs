//! Ordered-alternative matching engine and split reconciliation
//!
//! Alternatives are tried strictly in declared order and the first match
//! wins, even when a later alternative would match more text. All matching
//! goes through the `regex` crate's finite-automaton engine, so worst-case
//! time stays linear in the input length no matter how adversarial the text
//! is — email bodies are untrusted input.

use crate::catalog::CompiledPattern;
use std::collections::HashMap;

/// Outcome of running an ordered alternative list against a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MatchOutcome {
    /// No alternative matched; a normal branch, never an error
    NoMatch,

    /// Positional capture slots, index 0 being the whole match
    Captures(Vec<Option<String>>),

    /// Positional slots plus the named slots the alternative declares
    Named(Vec<Option<String>>, HashMap<String, String>),
}

impl MatchOutcome {
    /// Positional slots when a match happened
    pub(crate) fn slots(&self) -> Option<&[Option<String>]> {
        match self {
            Self::NoMatch => None,
            Self::Captures(slots) | Self::Named(slots, _) => Some(slots),
        }
    }

    /// A named capture slot, populated only when the matched alternative
    /// declares it
    pub(crate) fn named(&self, name: &str) -> Option<&str> {
        match self {
            Self::Named(_, names) => names.get(name).map(String::as_str),
            _ => None,
        }
    }
}

/// Return the first alternative's captures, in declared order.
pub(crate) fn first_match(alternatives: &[CompiledPattern], text: &str) -> MatchOutcome {
    for alternative in alternatives {
        let regex = alternative.inner();

        if let Some(caps) = regex.captures(text) {
            let slots: Vec<Option<String>> = (0..caps.len())
                .map(|index| caps.get(index).map(|m| m.as_str().to_owned()))
                .collect();

            let mut names = HashMap::new();
            for name in regex.capture_names().flatten() {
                if let Some(value) = caps.name(name) {
                    names.insert(name.to_owned(), value.as_str().to_owned());
                }
            }

            return if names.is_empty() {
                MatchOutcome::Captures(slots)
            } else {
                MatchOutcome::Named(slots, names)
            };
        }
    }

    MatchOutcome::NoMatch
}

/// Partition `text` around every occurrence of the first matching
/// alternative, using the line-capturing pattern form.
///
/// Each occurrence contributes one fixed-arity repetition of slots:
/// `[before, line, captures…, after]`, where `before` is empty for every
/// repetition after the first and `after` holds the text up to the next
/// occurrence (or the end). Nested (multiply-forwarded) messages therefore
/// yield `n` repetitions and a result length of `n * k`. An empty result
/// means no alternative matched.
///
/// Termination: every accepted match is non-empty, so the unmatched
/// remainder strictly shrinks.
pub(crate) fn split_match(alternatives: &[CompiledPattern], text: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    let mut rest = text;

    loop {
        let Some(caps) = alternatives
            .iter()
            .find_map(|alternative| alternative.split_regex().captures(rest))
        else {
            break;
        };

        let Some(whole) = caps.get(0) else { break };
        if whole.as_str().is_empty() {
            // A zero-width match cannot partition anything
            break;
        }

        if parts.is_empty() {
            parts.push(rest[..whole.start()].to_owned());
        } else if let Some(tail) = parts.last_mut() {
            // Text since the previous occurrence belongs to its `after`
            // slot; this repetition starts with an empty `before` slot
            tail.push_str(&rest[..whole.start()]);
            parts.push(String::new());
        }

        for index in 1..caps.len() {
            parts.push(
                caps.get(index)
                    .map_or_else(String::new, |m| m.as_str().to_owned()),
            );
        }

        parts.push(String::new());
        rest = &rest[whole.end()..];
    }

    if let Some(tail) = parts.last_mut() {
        tail.push_str(rest);
    }

    parts
}

/// Remove every occurrence of every alternative from `text`.
pub(crate) fn strip_matches(alternatives: &[CompiledPattern], text: &str) -> String {
    let mut out = text.to_owned();

    for alternative in alternatives {
        if alternative.inner().is_match(&out) {
            out = alternative.inner().replace_all(&out, "").into_owned();
        }
    }

    out
}

/// Normalize a split result into its canonical `(head, tail)` form.
///
/// `head` is slot 0 — the text before the first delimiter, never repeated.
/// `tail` concatenates, across all repetitions, the default slots that the
/// exclusion predicate does not reject, re-assembling the text that was
/// never removed from the source minus the delimiter content itself.
///
/// Returns `None` when the result length is not a positive multiple of
/// `arity`; the caller must treat that as "no match".
pub(crate) fn reconcile_split<F>(
    parts: &[String],
    arity: usize,
    defaults: &[usize],
    exclude: F,
) -> Option<(String, String)>
where
    F: Fn(usize) -> bool,
{
    if arity == 0 || parts.is_empty() || !parts.len().is_multiple_of(arity) {
        return None;
    }

    let head = parts[0].clone();

    let mut tail = String::new();
    for repetition in parts.chunks(arity) {
        for &slot in defaults {
            if slot < repetition.len() && !exclude(slot) {
                tail.push_str(&repetition[slot]);
            }
        }
    }

    Some((head, tail))
}
