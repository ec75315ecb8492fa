use super::*;

// =============================================================================
// RecordKind
// =============================================================================

#[test]
fn kind_parses_canonical_names() {
    assert_eq!(RecordKind::from_str("innovation"), Some(RecordKind::Innovation));
    assert_eq!(RecordKind::from_str("event"), Some(RecordKind::Event));
    assert_eq!(RecordKind::from_str("project"), Some(RecordKind::Project));
}

#[test]
fn kind_parses_legacy_aliases() {
    assert_eq!(RecordKind::from_str("events"), Some(RecordKind::Event));
    assert_eq!(RecordKind::from_str("projects"), Some(RecordKind::Project));
    assert_eq!(RecordKind::from_str("sponsored_projects"), Some(RecordKind::Project));
}

#[test]
fn kind_rejects_unknown() {
    assert_eq!(RecordKind::from_str("publication"), None);
    assert_eq!(RecordKind::from_str(""), None);
}

#[test]
fn kind_round_trips_as_str() {
    for kind in [RecordKind::Innovation, RecordKind::Event, RecordKind::Project] {
        assert_eq!(RecordKind::from_str(kind.as_str()), Some(kind));
    }
}

#[test]
fn kind_serializes_lowercase() {
    let json = serde_json::to_string(&RecordKind::Innovation).unwrap();
    assert_eq!(json, "\"innovation\"");
}

// =============================================================================
// RecordStatus
// =============================================================================

#[test]
fn status_round_trips_as_str() {
    for status in [RecordStatus::Ongoing, RecordStatus::Completed, RecordStatus::Terminated] {
        assert_eq!(RecordStatus::from_str(status.as_str()), Some(status));
    }
}

#[test]
fn status_rejects_unknown() {
    assert_eq!(RecordStatus::from_str("ongoing"), None);
    assert_eq!(RecordStatus::from_str("Paused"), None);
}

// =============================================================================
// AttachmentField::normalize
// =============================================================================

#[test]
fn normalize_parsed_list_passes_through() {
    let field = AttachmentField::Parsed(vec![Attachment {
        url: "https://example.com/a.pdf".into(),
        caption: "Flyer".into(),
    }]);
    let list = field.normalize();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].url, "https://example.com/a.pdf");
    assert_eq!(list[0].caption, "Flyer");
}

#[test]
fn normalize_raw_valid_json() {
    let field = AttachmentField::Raw(
        r#"[{"url":"https://example.com/1","caption":"one"},{"url":"https://example.com/2","caption":"two"}]"#
            .into(),
    );
    let list = field.normalize();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].url, "https://example.com/1");
    assert_eq!(list[1].url, "https://example.com/2");
}

#[test]
fn normalize_malformed_json_is_empty() {
    let field = AttachmentField::Raw("not json at all {{".into());
    assert!(field.normalize().is_empty());
}

#[test]
fn normalize_non_array_json_is_empty() {
    let field = AttachmentField::Raw(r#"{"url":"https://example.com"}"#.into());
    assert!(field.normalize().is_empty());
}

#[test]
fn normalize_skips_non_object_entries() {
    let field = AttachmentField::Raw(r#"[42, "x", {"url":"https://example.com","caption":"ok"}]"#.into());
    let list = field.normalize();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].caption, "ok");
}

#[test]
fn normalize_defaults_missing_fields() {
    let field = AttachmentField::Raw(r#"[{"caption":"no url"},{"url":"https://example.com"}]"#.into());
    let list = field.normalize();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].url, "");
    assert_eq!(list[0].caption, "no url");
    assert_eq!(list[1].caption, "");
}

#[test]
fn normalize_empty_string_is_empty() {
    assert!(AttachmentField::Raw(String::new()).normalize().is_empty());
}

#[test]
fn attachment_field_deserializes_both_shapes() {
    let parsed: AttachmentField = serde_json::from_str(r#"[{"url":"u","caption":"c"}]"#).unwrap();
    assert_eq!(parsed.normalize().len(), 1);

    let raw: AttachmentField = serde_json::from_str(r#""[{\"url\":\"u\",\"caption\":\"c\"}]""#).unwrap();
    assert_eq!(raw.normalize().len(), 1);
}

// =============================================================================
// Record serde
// =============================================================================

#[test]
fn record_serde_round_trip() {
    let record = Record {
        id: "1700000000000".into(),
        kind: RecordKind::Project,
        title: "Smart irrigation".into(),
        description: "Low-cost soil sensing".into(),
        email: "pi@example.edu".into(),
        updated_by: None,
        timestamp: 1_700_000_000_000,
        status: Some(RecordStatus::Ongoing),
        attachments: vec![Attachment { url: "https://example.com/r.pdf".into(), caption: "Report".into() }],
        props: serde_json::json!({"funding_agency": "DST", "period_months": 24}),
    };
    let json = serde_json::to_string(&record).unwrap();
    let restored: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.id, record.id);
    assert_eq!(restored.kind, RecordKind::Project);
    assert_eq!(restored.status, Some(RecordStatus::Ongoing));
    assert_eq!(restored.attachments.len(), 1);
    assert_eq!(restored.props["funding_agency"], "DST");
}

#[test]
fn record_deserialize_defaults_optional_fields() {
    let json = r#"{"id":"1","kind":"event","title":"Tech fest","email":"a@b.edu","timestamp":0}"#;
    let record: Record = serde_json::from_str(json).unwrap();
    assert_eq!(record.description, "");
    assert!(record.updated_by.is_none());
    assert!(record.status.is_none());
    assert!(record.attachments.is_empty());
    assert!(record.props.is_null());
}

#[test]
fn now_ms_is_positive() {
    assert!(now_ms() > 0);
}
