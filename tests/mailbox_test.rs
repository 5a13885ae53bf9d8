use forward_extract::Parser;

fn parser() -> Parser {
    Parser::new().unwrap()
}

#[test]
fn test_name_and_bracketed_address() {
    let parser = parser();
    let mailboxes = parser.parse_mailboxes("Walter Sheltan <walter.sheltan@acme.com>");

    assert_eq!(mailboxes.len(), 1);
    assert_eq!(mailboxes[0].name.as_deref(), Some("Walter Sheltan"));
    assert_eq!(
        mailboxes[0].address.as_deref(),
        Some("walter.sheltan@acme.com")
    );
}

#[test]
fn test_bare_address() {
    let parser = parser();
    let mailboxes = parser.parse_mailboxes("walter.sheltan@acme.com");

    assert_eq!(mailboxes.len(), 1);
    assert_eq!(
        mailboxes[0].address.as_deref(),
        Some("walter.sheltan@acme.com")
    );
    assert!(mailboxes[0].name.is_none());
}

#[test]
fn test_bracketed_address_without_name() {
    let parser = parser();
    let mailboxes = parser.parse_mailboxes("<walter.sheltan@acme.com>");

    assert_eq!(mailboxes.len(), 1);
    assert_eq!(
        mailboxes[0].address.as_deref(),
        Some("walter.sheltan@acme.com")
    );
    assert!(mailboxes[0].name.is_none());
}

#[test]
fn test_quoted_name() {
    let parser = parser();
    let mailboxes = parser.parse_mailboxes("\"Walter Sheltan\" <walter.sheltan@acme.com>");

    assert_eq!(mailboxes.len(), 1);
    assert_eq!(mailboxes[0].name.as_deref(), Some("Walter Sheltan"));
}

#[test]
fn test_single_quoted_name() {
    let parser = parser();
    let mailboxes = parser.parse_mailboxes("'Walter Sheltan' <walter.sheltan@acme.com>");

    assert_eq!(mailboxes.len(), 1);
    assert_eq!(mailboxes[0].name.as_deref(), Some("Walter Sheltan"));
    assert_eq!(
        mailboxes[0].address.as_deref(),
        Some("walter.sheltan@acme.com")
    );
}

#[test]
fn test_mailto_link() {
    let parser = parser();
    let mailboxes = parser.parse_mailboxes("Walter Sheltan <mailto:walter.sheltan@acme.com>");

    assert_eq!(mailboxes.len(), 1);
    assert_eq!(mailboxes[0].name.as_deref(), Some("Walter Sheltan"));
    assert_eq!(
        mailboxes[0].address.as_deref(),
        Some("walter.sheltan@acme.com")
    );
}

#[test]
fn test_doubled_mailto_link() {
    let parser = parser();
    let mailboxes =
        parser.parse_mailboxes("<walter.sheltan@acme.com<mailto:walter.sheltan@acme.com>>");

    assert_eq!(mailboxes.len(), 1);
    assert_eq!(
        mailboxes[0].address.as_deref(),
        Some("walter.sheltan@acme.com")
    );
    assert!(mailboxes[0].name.is_none());
}

#[test]
fn test_name_filled_with_address_collapses() {
    let parser = parser();
    let mailboxes = parser.parse_mailboxes("bessie.berry@acme.com <bessie.berry@acme.com>");

    assert_eq!(mailboxes.len(), 1);
    assert_eq!(
        mailboxes[0].address.as_deref(),
        Some("bessie.berry@acme.com")
    );
    assert!(mailboxes[0].name.is_none());
}

#[test]
fn test_multiple_entries_comma_separated() {
    let parser = parser();
    let mailboxes = parser.parse_mailboxes("Alice <alice@x.com>, Bob <bob@x.com>");

    assert_eq!(mailboxes.len(), 2);
    assert_eq!(mailboxes[0].name.as_deref(), Some("Alice"));
    assert_eq!(mailboxes[0].address.as_deref(), Some("alice@x.com"));
    assert_eq!(mailboxes[1].name.as_deref(), Some("Bob"));
    assert_eq!(mailboxes[1].address.as_deref(), Some("bob@x.com"));
}

#[test]
fn test_multiple_entries_semicolon_separated() {
    let parser = parser();
    let mailboxes = parser.parse_mailboxes("Alice <alice@x.com>; bob@x.com");

    assert_eq!(mailboxes.len(), 2);
    assert_eq!(mailboxes[0].address.as_deref(), Some("alice@x.com"));
    assert_eq!(mailboxes[1].address.as_deref(), Some("bob@x.com"));
}

#[test]
fn test_bare_name_without_address() {
    let parser = parser();
    let mailboxes = parser.parse_mailboxes("bare name without address");

    assert_eq!(mailboxes.len(), 1);
    assert!(mailboxes[0].address.is_none());
    assert_eq!(mailboxes[0].name.as_deref(), Some("bare name without address"));
}

#[test]
fn test_empty_line() {
    let parser = parser();
    assert!(parser.parse_mailboxes("").is_empty());
    assert!(parser.parse_mailboxes("   ").is_empty());
}

#[test]
fn test_invalid_address_becomes_name() {
    let parser = parser();
    // No dot in the domain: not a valid address shape
    let mailboxes = parser.parse_mailboxes("Walter <walter@localhost>");

    assert_eq!(mailboxes.len(), 1);
    assert!(mailboxes[0].address.is_none());
    assert_eq!(mailboxes[0].name.as_deref(), Some("walter@localhost"));
}
