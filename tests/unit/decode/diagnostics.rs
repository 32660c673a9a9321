use super::*;

#[test]
fn records_in_insertion_order() {
    let mut d = Diagnostics::new();
    let root = FieldPath::root().field("Scene");
    d.record(&root.field("b"), IssueKind::Malformed, "second");
    d.record(&root.field("a"), IssueKind::Defaulted, "first");
    let msgs: Vec<_> = d.issues().iter().map(|i| i.message.as_str()).collect();
    assert_eq!(msgs, ["second", "first"]);
    assert_eq!(d.len(), 2);
    assert!(!d.is_empty());
}

#[test]
fn filters_by_kind() {
    let mut d = Diagnostics::new();
    let p = FieldPath::root();
    d.record(&p, IssueKind::Ignored, "x");
    d.record(&p, IssueKind::Defaulted, "y");
    d.record(&p, IssueKind::Ignored, "z");
    assert_eq!(d.of_kind(IssueKind::Ignored).count(), 2);
    assert_eq!(d.of_kind(IssueKind::Malformed).count(), 0);
}

#[test]
fn display_includes_path_and_kind() {
    let mut d = Diagnostics::new();
    d.record(
        &FieldPath::root().field("Scene").field("MaxRecursionDepth"),
        IssueKind::Malformed,
        "not an integer",
    );
    assert_eq!(
        d.issues()[0].to_string(),
        "[$.Scene.MaxRecursionDepth] malformed: not an integer"
    );
}
