//! Pattern catalog and compiler
//!
//! The catalog is a static table mapping each semantic field to an ordered
//! list of pattern alternatives. Order is a correctness invariant: the first
//! matching alternative wins, so alternatives go from most to least specific
//! and encode client / locale priority. The compiler turns every alternative
//! into its executable form once, at startup; the resulting
//! [`PatternCatalog`] is immutable and safe to share across threads.

use crate::error::{CatalogError, Result};
use regex::{Regex, RegexBuilder};

/// Declarative source form of a single catalog alternative.
#[derive(Debug, Clone, Copy)]
struct PatternDef {
    source: &'static str,
    multi_line: bool,
    case_insensitive: bool,
}

impl PatternDef {
    /// Compile this definition, optionally wrapped in one outer capturing
    /// group (the line-capturing variant). Wrapping shifts inner group
    /// indices by one but does not alter the pattern's semantics or flags.
    fn build(self, field: &'static str, wrap_line: bool) -> Result<Regex> {
        let source = if wrap_line {
            format!("({})", self.source)
        } else {
            self.source.to_owned()
        };

        RegexBuilder::new(&source)
            .multi_line(self.multi_line)
            .case_insensitive(self.case_insensitive)
            .build()
            .map_err(|e| CatalogError::Compile {
                field,
                details: e.to_string(),
            })
    }
}

/// Multiline alternative
const fn m(source: &'static str) -> PatternDef {
    PatternDef {
        source,
        multi_line: true,
        case_insensitive: false,
    }
}

/// Multiline, case-insensitive alternative
const fn im(source: &'static str) -> PatternDef {
    PatternDef {
        source,
        multi_line: true,
        case_insensitive: true,
    }
}

/// Case-insensitive alternative, no line anchoring
const fn i(source: &'static str) -> PatternDef {
    PatternDef {
        source,
        multi_line: false,
        case_insensitive: true,
    }
}

/// Plain alternative, no flags
const fn plain(source: &'static str) -> PatternDef {
    PatternDef {
        source,
        multi_line: false,
        case_insensitive: false,
    }
}

const SUBJECT: &[PatternDef] = &[
    m(r"^Fw:(.*)"),  // Outlook Live / 365 (cs, en, hr, hu, sk), Yahoo Mail (all locales)
    m(r"^FW:(.*)"),  // Outlook Live / 365 (nl, pt), New Outlook 2019 (cs, en, hu, nl, pt, ru, sk), Outlook 2019 (all locales)
    m(r"^Fwd:(.*)"), // Gmail (all locales), Thunderbird (all locales), Missive (en), MailMate (en)
];

const SEPARATOR: &[PatternDef] = &[
    m(r"^>?\s*Begin forwarded message\s?:"), // Apple Mail (en)
    m(r"^\s*-{8,10}\s*Forwarded message\s*-{8,10}\s*"), // Gmail (all locales), Missive (en), HubSpot (en)
    m(r"^\s*_{32}\s*$"),                                // Outlook Live / 365 (all locales)
    m(r"^\s?Forwarded message:"),                       // MailMate
    m(r"^>?\s*-{6,10} Original Message -{6,10}\s*"),
];

// Outlook 2019 prints no header block, only a narrative line carrying the
// date, author name and address. Part order changes per locale, hence the
// named groups.
const SEPARATOR_WITH_INFORMATION: &[PatternDef] = &[
    m(r"^\s?Dne\s?(?<date>.+),\s?(?<from_name>.+)\s*[\[<](?<from_address>.+)[\]>]\s?napsal\(a\)\s?:"), // Outlook 2019 (cz)
    m(r#"^\s?D.\s?(?<date>.+)\s?skrev\s?"(?<from_name>.+)"\s*[\[<](?<from_address>.+)[\]>]\s?:"#), // Outlook 2019 (da)
    m(r#"^\s?Am\s?(?<date>.+)\s?schrieb\s?"(?<from_name>.+)"\s*[\[<](?<from_address>.+)[\]>]\s?:"#), // Outlook 2019 (de)
    m(r#"^\s?On\s?(?<date>.+),\s?"(?<from_name>.+)"\s*[\[<](?<from_address>.+)[\]>]\s?wrote\s?:"#), // Outlook 2019 (en)
    m(r#"^\s?El\s?(?<date>.+),\s?"(?<from_name>.+)"\s*[\[<](?<from_address>.+)[\]>]\s?escribió\s?:"#), // Outlook 2019 (es)
    m(r"^\s?Le\s?(?<date>.+),\s?«(?<from_name>.+)»\s*[\[<](?<from_address>.+)[\]>]\s?a écrit\s?:"), // Outlook 2019 (fr)
    m(r"^\s?(?<from_name>.+)\s*[\[<](?<from_address>.+)[\]>]\s?kirjoitti\s?(?<date>.+)\s?:"), // Outlook 2019 (fi)
    m(r"^\s?(?<date>.+)\s?időpontban\s?(?<from_name>.+)\s*[\[<(](?<from_address>.+)[\]>)]\s?ezt írta\s?:"), // Outlook 2019 (hu)
    m(r#"^\s?Il giorno\s?(?<date>.+)\s?"(?<from_name>.+)"\s*[\[<](?<from_address>.+)[\]>]\s?ha scritto\s?:"#), // Outlook 2019 (it)
    m(r"^\s?Op\s?(?<date>.+)\s?heeft\s?(?<from_name>.+)\s*[\[<](?<from_address>.+)[\]>]\s?geschreven\s?:"), // Outlook 2019 (nl)
    m(r"^\s?(?<from_name>.+)\s*[\[<](?<from_address>.+)[\]>]\s?skrev følgende den\s?(?<date>.+)\s?:"), // Outlook 2019 (no)
    m(r"^\s?Dnia\s?(?<date>.+)\s?„(?<from_name>.+)”\s*[\[<](?<from_address>.+)[\]>]\s?napisał\s?:"), // Outlook 2019 (pl)
    m(r#"^\s?Em\s?(?<date>.+),\s?"(?<from_name>.+)"\s*[\[<](?<from_address>.+)[\]>]\s?escreveu\s?:"#), // Outlook 2019 (pt)
    m(r#"^\s?(?<date>.+)\s?пользователь\s?"(?<from_name>.+)"\s*[\[<](?<from_address>.+)[\]>]\s?написал\s?:"#), // Outlook 2019 (ru)
    m(r"^\s?(?<date>.+)\s?používateľ\s?(?<from_name>.+)\s*\([\[<](?<from_address>.+)[\]>]\)\s?napísal\s?:"), // Outlook 2019 (sk)
    m(r#"^\s?Den\s?(?<date>.+)\s?skrev\s?"(?<from_name>.+)"\s*[\[<](?<from_address>.+)[\]>]\s?följande\s?:"#), // Outlook 2019 (sv)
    m(r#"^\s?"(?<from_name>.+)"\s*[\[<](?<from_address>.+)[\]>],\s?(?<date>.+)\s?tarihinde şunu yazdı\s?:"#), // Outlook 2019 (tr)
];

const ORIGINAL_SUBJECT: &[PatternDef] = &[
    im(r"^\*?Subject\s?:\*?(.+)"), // Apple Mail (en), Gmail (all locales), Outlook Live / 365 (all locales), New Outlook 2019 (en), Thunderbird (da, en), Missive (en), HubSpot (en)
];

const ORIGINAL_SUBJECT_LAX: &[PatternDef] = &[
    i(r"Subject\s?:(.+)"), // Yahoo Mail (en)
];

const ORIGINAL_FROM: &[PatternDef] = &[
    m(r"^\*?\s*From\s?:\*?(.+)$"), // Apple Mail (en), Outlook Live / 365 (all locales), New Outlook 2019 (en), Thunderbird (da, en), Missive (en), HubSpot (en)
    m(r#"^From:\s*(".+"\s*<.+>)$"#),
];

const ORIGINAL_FROM_LAX: &[PatternDef] = &[
    plain(r"(\s*From\s?:(.+?)\s?\n?\s*[\[<](.+?)[\]>])"), // Yahoo Mail (en)
    m(r#"^From:\s*"(.+)"\s*<(.+)>$"#),
];

const ORIGINAL_TO: &[PatternDef] = &[
    m(r"^\*?\s*To\s?:\*?(.+)$"), // Apple Mail (en), Gmail (all locales), Outlook Live / 365 (all locales), Thunderbird (da, en), Missive (en), HubSpot (en)
    m(r"^To:\s*<(.+)>$"),        // Thunderbird (en)
];

const ORIGINAL_TO_LAX: &[PatternDef] = &[
    m(r"\s*To\s?:(.+)$"), // Yahoo Mail (en)
    m(r"^To:\s*<(.+)>$"),
];

const ORIGINAL_REPLY_TO: &[PatternDef] = &[
    m(r"^\s*Reply-To\s?:(.+)$"), // Apple Mail (en)
];

const ORIGINAL_CC: &[PatternDef] = &[
    m(r"^\*?\s*Cc\s?:\*?(.+)$"), // Apple Mail (en, da, es, fr, hr, it, pt, pt-br, ro, sk), Gmail (all locales), Outlook Live / 365 (all locales), New Outlook 2019 (da, de, en, fr, it, pt-br), Missive (en), HubSpot (de, en, es, it, nl, pt-br)
    m(r"^\s*CC\s?:(.+)$"),       // New Outlook 2019 (es, nl, pt), Thunderbird (da, en, es, fi, hr, hu, it, nl, no, pt, pt-br, ro, tr, uk)
    m(r"^\s*CC：(.+)$"),         // HubSpot (ja)
];

const ORIGINAL_CC_LAX: &[PatternDef] = &[
    m(r"\s*Cc\s?:(.+)$"), // Yahoo Mail (da, en, it, nl, pt, pt-br, ro, tr)
    m(r"\s*CC\s?:(.+)$"), // Yahoo Mail (de, es)
];

const ORIGINAL_DATE: &[PatternDef] = &[
    m(r"^\s*Date\s?:(.+)$"), // Apple Mail (en, fr), Gmail (all locales), New Outlook 2019 (en, fr), Thunderbird (da, en, fr), Missive (en), HubSpot (en, fr)
    m(r"^Date:\s*(.+)$"),    // Thunderbird (en)
];

const ORIGINAL_DATE_LAX: &[PatternDef] = &[
    m(r"\s*Datum\s?:(.+)$"), // Yahoo Mail (cs)
    m(r"^Date:\s*(.+)$"),
];

// Mailbox shapes, most specific first. The tokenizer anchors every attempt
// at the start of the remaining line and consumes the matched prefix.
const MAILBOX: &[PatternDef] = &[
    plain(r"^\s?\n?\s*<.+?<mailto:(.+?)>>"), // "<walter.sheltan@acme.com<mailto:walter.sheltan@acme.com>>"
    plain(r"^(.+?)\s?\n?\s*<.+?<mailto:(.+?)>>"), // "Walter Sheltan <walter.sheltan@acme.com<mailto:walter.sheltan@acme.com>>"
    plain(r"^(.+?)\s?\n?\s*[\[<]mailto:(.+?)[\]>]"), // "Walter Sheltan <mailto:walter.sheltan@acme.com>"
    plain(r"^'(.+?)'\s?\n?\s*[\[<](.+?)[\]>]"),      // "'Walter Sheltan' <walter.sheltan@acme.com>"
    plain(r#"^"'(.+?)'"\s?\n?\s*[\[<](.+?)[\]>]"#),  // ""'Walter Sheltan'" <walter.sheltan@acme.com>"
    plain(r#"^"(.+?)"\s?\n?\s*[\[<](.+?)[\]>]"#),    // ""Walter Sheltan" <walter.sheltan@acme.com>"
    plain(r"^([^,;]+?)\s?\n?\s*[\[<](.+?)[\]>]"),    // "Walter Sheltan <walter.sheltan@acme.com>"
    plain(r"^(.?)\s?\n?\s*[\[<](.+?)[\]>]"),         // "<walter.sheltan@acme.com>"
    plain(r"^([^\s@]+@[^\s@]+\.[^\s@,]+)"),          // "walter.sheltan@acme.com"
    plain(r"^([^;].+?)\s?\n?\s*[\[<](.+?)[\]>]"),    // "Walter, Sheltan <walter.sheltan@acme.com>"
];

const MAILBOX_ADDRESS: &[PatternDef] = &[plain(r"^(([^\s@]+)@([^\s@]+)\.([^\s@]+))$")];

/// The executable forms of one catalog alternative.
///
/// The line-capturing variant exists only for fields used in split mode,
/// where the matched boilerplate line itself is needed to rebuild nested
/// messages.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    inner: Regex,
    line: Option<Regex>,
}

impl CompiledPattern {
    /// Inner-capture form
    pub(crate) const fn inner(&self) -> &Regex {
        &self.inner
    }

    /// Line-capturing form when the field declares one, inner form otherwise
    pub(crate) fn split_regex(&self) -> &Regex {
        self.line.as_ref().unwrap_or(&self.inner)
    }
}

fn compile_field(
    field: &'static str,
    defs: &[PatternDef],
    with_line: bool,
) -> Result<Vec<CompiledPattern>> {
    defs.iter()
        .map(|def| {
            Ok(CompiledPattern {
                inner: def.build(field, false)?,
                line: if with_line {
                    Some(def.build(field, true)?)
                } else {
                    None
                },
            })
        })
        .collect()
}

/// The compiled, immutable pattern table shared by all extraction calls.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    pub(crate) subject: Vec<CompiledPattern>,
    pub(crate) separator: Vec<CompiledPattern>,
    pub(crate) separator_with_information: Vec<CompiledPattern>,
    pub(crate) original_subject: Vec<CompiledPattern>,
    pub(crate) original_subject_lax: Vec<CompiledPattern>,
    pub(crate) original_from: Vec<CompiledPattern>,
    pub(crate) original_from_lax: Vec<CompiledPattern>,
    pub(crate) original_to: Vec<CompiledPattern>,
    pub(crate) original_to_lax: Vec<CompiledPattern>,
    pub(crate) original_reply_to: Vec<CompiledPattern>,
    pub(crate) original_cc: Vec<CompiledPattern>,
    pub(crate) original_cc_lax: Vec<CompiledPattern>,
    pub(crate) original_date: Vec<CompiledPattern>,
    pub(crate) original_date_lax: Vec<CompiledPattern>,
    pub(crate) mailbox: Vec<CompiledPattern>,
    pub(crate) mailbox_address: Vec<CompiledPattern>,

    // Normalization patterns applied before any matching attempt
    pub(crate) carriage_return: Regex,         // Outlook 2019
    pub(crate) byte_order_mark: Regex,         // Outlook 2019
    pub(crate) trailing_non_breaking_space: Regex, // IONOS by 1&1
    pub(crate) non_breaking_space: Regex,      // HubSpot
    pub(crate) quote_line_break: Regex,        // Apple Mail, Missive
    pub(crate) quote: Regex,                   // Apple Mail
    pub(crate) four_spaces: Regex,             // Outlook 2019
}

impl PatternCatalog {
    /// Compile the full catalog.
    ///
    /// A failure here is a configuration defect: the parser must not service
    /// any extraction call with a partially compiled catalog.
    pub fn compile() -> Result<Self> {
        Ok(Self {
            subject: compile_field("subject", SUBJECT, false)?,
            separator: compile_field("separator", SEPARATOR, true)?,
            separator_with_information: compile_field(
                "separator_with_information",
                SEPARATOR_WITH_INFORMATION,
                false,
            )?,
            original_subject: compile_field("original_subject", ORIGINAL_SUBJECT, true)?,
            original_subject_lax: compile_field(
                "original_subject_lax",
                ORIGINAL_SUBJECT_LAX,
                true,
            )?,
            original_from: compile_field("original_from", ORIGINAL_FROM, true)?,
            original_from_lax: compile_field("original_from_lax", ORIGINAL_FROM_LAX, false)?,
            original_to: compile_field("original_to", ORIGINAL_TO, true)?,
            original_to_lax: compile_field("original_to_lax", ORIGINAL_TO_LAX, false)?,
            original_reply_to: compile_field("original_reply_to", ORIGINAL_REPLY_TO, true)?,
            original_cc: compile_field("original_cc", ORIGINAL_CC, true)?,
            original_cc_lax: compile_field("original_cc_lax", ORIGINAL_CC_LAX, false)?,
            original_date: compile_field("original_date", ORIGINAL_DATE, true)?,
            original_date_lax: compile_field("original_date_lax", ORIGINAL_DATE_LAX, false)?,
            mailbox: compile_field("mailbox", MAILBOX, false)?,
            mailbox_address: compile_field("mailbox_address", MAILBOX_ADDRESS, false)?,

            carriage_return: plain(r"\r\n").build("carriage_return", false)?,
            byte_order_mark: plain(r"\u{FEFF}").build("byte_order_mark", false)?,
            trailing_non_breaking_space: m(r"\u{A0}$")
                .build("trailing_non_breaking_space", false)?,
            non_breaking_space: plain(r"\u{A0}").build("non_breaking_space", false)?,
            quote_line_break: m(r"^(>+)\s?$").build("quote_line_break", false)?,
            quote: m(r"^(>+)\s?").build("quote", false)?,
            four_spaces: m(r"^[ ]{4}\s?").build("four_spaces", false)?,
        })
    }
}
