use forward_extract::{Mailbox, OriginalEmail, ParsedForward};

#[test]
fn test_mailbox_is_empty() {
    assert!(Mailbox::default().is_empty());

    let named = Mailbox {
        address: None,
        name: Some("Walter Sheltan".to_owned()),
    };
    assert!(!named.is_empty());

    let addressed = Mailbox {
        address: Some("walter.sheltan@acme.com".to_owned()),
        name: None,
    };
    assert!(!addressed.is_empty());
}

#[test]
fn test_mailbox_display() {
    let full = Mailbox {
        address: Some("walter.sheltan@acme.com".to_owned()),
        name: Some("Walter Sheltan".to_owned()),
    };
    assert_eq!(full.to_string(), "Walter Sheltan <walter.sheltan@acme.com>");

    let name_only = Mailbox {
        address: None,
        name: Some("Walter Sheltan".to_owned()),
    };
    assert_eq!(name_only.to_string(), "Walter Sheltan");

    let address_only = Mailbox {
        address: Some("walter.sheltan@acme.com".to_owned()),
        name: None,
    };
    assert_eq!(address_only.to_string(), "walter.sheltan@acme.com");

    assert_eq!(Mailbox::default().to_string(), "");
}

#[test]
fn test_mailbox_serializes_absent_fields_as_null() {
    let mailbox = Mailbox {
        address: Some("jane@example.com".to_owned()),
        name: None,
    };

    let json = serde_json::to_value(&mailbox).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "address": "jane@example.com", "name": null })
    );
}

#[test]
fn test_parsed_forward_round_trips_through_json() {
    let parsed = ParsedForward {
        forwarded: true,
        message: Some("FYI".to_owned()),
        email: Some(OriginalEmail {
            body: "Hello".to_owned(),
            from: Some(Mailbox {
                address: Some("jane@example.com".to_owned()),
                name: Some("Jane Doe".to_owned()),
            }),
            to: vec![Mailbox {
                address: Some("john@example.com".to_owned()),
                name: None,
            }],
            cc: Vec::new(),
            subject: Some("Hi".to_owned()),
            date: Some("Tue, 12 Aug 2025 09:00:00 +0000".to_owned()),
        }),
    };

    let json = serde_json::to_string(&parsed).unwrap();
    let back: ParsedForward = serde_json::from_str(&json).unwrap();
    assert_eq!(back, parsed);
}

#[test]
fn test_parsed_date_rfc2822() {
    let email = OriginalEmail {
        date: Some("Tue, 12 Aug 2025 09:00:00 +0000".to_owned()),
        ..OriginalEmail::default()
    };

    let parsed = email.parsed_date().unwrap();
    assert_eq!(parsed.timestamp(), 1_754_989_200);
}

#[test]
fn test_parsed_date_localized_text_yields_none() {
    let email = OriginalEmail {
        date: Some("4. 8. 2025 10:00".to_owned()),
        ..OriginalEmail::default()
    };
    assert!(email.parsed_date().is_none());

    assert!(OriginalEmail::default().parsed_date().is_none());
}

#[test]
fn test_defaults_are_absent() {
    let parsed = ParsedForward::default();
    assert!(!parsed.forwarded);
    assert!(parsed.message.is_none());
    assert!(parsed.email.is_none());

    let email = OriginalEmail::default();
    assert!(email.body.is_empty());
    assert!(email.from.is_none());
    assert!(email.to.is_empty());
    assert!(email.cc.is_empty());
    assert!(email.subject.is_none());
    assert!(email.date.is_none());
}
