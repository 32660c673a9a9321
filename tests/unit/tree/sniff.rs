use super::*;

#[test]
fn angle_bracket_is_xml() {
    assert_eq!(sniff(b"<Scene></Scene>"), Dialect::Xml);
    assert_eq!(sniff(b"  \n\t<?xml version=\"1.0\"?><Scene/>"), Dialect::Xml);
}

#[test]
fn brace_and_everything_else_is_json() {
    assert_eq!(sniff(b"{\"Scene\":{}}"), Dialect::Json);
    assert_eq!(sniff(b"[1,2]"), Dialect::Json);
    assert_eq!(sniff(b"garbage"), Dialect::Json);
}

#[test]
fn empty_and_blank_buffers_are_json() {
    assert_eq!(sniff(b""), Dialect::Json);
    assert_eq!(sniff(b" \r\n\t "), Dialect::Json);
}

#[test]
fn byte_order_mark_is_skipped() {
    assert_eq!(sniff(b"\xEF\xBB\xBF <Scene/>"), Dialect::Xml);
    assert_eq!(sniff(b"\xEF\xBB\xBF{}"), Dialect::Json);
}

#[test]
fn explicit_hint_overrides_sniffing() {
    assert_eq!(FormatHint::Json.resolve(b"<Scene/>"), Dialect::Json);
    assert_eq!(FormatHint::Xml.resolve(b"{}"), Dialect::Xml);
    assert_eq!(FormatHint::Auto.resolve(b"<Scene/>"), Dialect::Xml);
}

#[test]
fn hint_from_extension_and_string() {
    assert_eq!(
        FormatHint::from_path(Path::new("a/scene.XML")),
        FormatHint::Xml
    );
    assert_eq!(
        FormatHint::from_path(Path::new("scene.json")),
        FormatHint::Json
    );
    assert_eq!(FormatHint::from_path(Path::new("scene.txt")), FormatHint::Auto);
    assert_eq!("Auto".parse::<FormatHint>().unwrap(), FormatHint::Auto);
    assert_eq!("xml".parse::<FormatHint>().unwrap(), FormatHint::Xml);
    assert!("yaml".parse::<FormatHint>().is_err());
}
