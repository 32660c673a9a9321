use super::*;
use crate::decode::diagnostics::IssueKind;
use crate::scene::objects::SceneObject;

const MINIMAL_JSON: &str = r#"{"Scene": {"MaxRecursionDepth": "3"}}"#;

fn bytes(data: &str) -> Source<'_> {
    Source::Bytes {
        data: data.as_bytes(),
        format: FormatHint::Auto,
    }
}

/// In-memory [`ByteSource`] keyed by path.
struct MapSource(Vec<(PathBuf, &'static str)>);

impl ByteSource for MapSource {
    fn read(&self, path: &Path) -> anyhow::Result<Vec<u8>> {
        self.0
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, body)| body.as_bytes().to_vec())
            .ok_or_else(|| anyhow::anyhow!("no such document"))
    }
}

#[test]
fn root_keyed_and_bare_documents_agree() {
    let keyed: Scene = decode(MINIMAL_JSON.as_bytes(), Dialect::Json, &DecodeOptions::default())
        .unwrap();
    let bare: Scene = decode(
        br#"{"MaxRecursionDepth": 3}"#,
        Dialect::Json,
        &DecodeOptions::default(),
    )
    .unwrap();
    assert_eq!(keyed.max_recursion_depth, 3);
    assert_eq!(keyed, bare);
}

#[test]
fn present_root_key_error_is_final() {
    let err = decode::<Scene>(br#"{"Scene": "oops"}"#, Dialect::Json, &DecodeOptions::default())
        .unwrap_err();
    assert_eq!(err.path().unwrap().to_string(), "$.Scene");
}

#[test]
fn custom_root_key() {
    let options = DecodeOptions {
        root_key: "World".to_owned(),
        ..DecodeOptions::default()
    };
    let scene: Scene = decode(
        br#"{"World": {"ShadowRayEpsilon": 0.5}}"#,
        Dialect::Json,
        &options,
    )
    .unwrap();
    assert_eq!(scene.shadow_ray_epsilon, 0.5);
}

#[test]
fn malformed_json_is_decoding_failed() {
    let err = load(bytes("{\"Scene\": ")).unwrap_err();
    assert!(matches!(err, SceneError::DecodingFailed(_)));

    let err = load(bytes("   ")).unwrap_err();
    assert!(matches!(err, SceneError::DecodingFailed(_)));
}

#[test]
fn xml_without_root_element_is_decoding_failed() {
    for doc in ["", "<?xml version=\"1.0\"?>", "<!-- only a comment -->"] {
        let err = decode::<Scene>(doc.as_bytes(), Dialect::Xml, &DecodeOptions::default())
            .unwrap_err();
        assert!(matches!(err, SceneError::DecodingFailed(_)), "{doc:?}");
    }
}

#[test]
fn xml_and_json_converge() {
    let json = r#"{"Scene": {"BackgroundColor": "1 2 3", "Objects": {"Sphere": {"_id": "1", "Center": "0 0 0", "Radius": 2}}}}"#;
    let xml = r#"<Scene>
        <BackgroundColor>1 2 3</BackgroundColor>
        <Objects><Sphere id="1"><Center>0 0 0</Center><Radius>2</Radius></Sphere></Objects>
    </Scene>"#;
    let a = load(bytes(json)).unwrap();
    let b = load(bytes(xml)).unwrap();
    assert_eq!(a, b);
    assert!(matches!(a.objects[0], SceneObject::Sphere(_)));
}

#[test]
fn diagnostics_are_collected_per_call() {
    let loader = SceneLoader::new(LoadOptions::default());
    let mut diags = Diagnostics::new();
    loader
        .load_with_diagnostics(bytes(MINIMAL_JSON), &mut diags)
        .unwrap();
    assert_eq!(diags.of_kind(IssueKind::Defaulted).count(), 4);
    assert!(diags.of_kind(IssueKind::Malformed).next().is_none());
}

#[test]
fn non_finite_needs_opt_in() {
    let doc = br#"{"Scene": {"ShadowRayEpsilon": "inf"}}"#;
    let strict: Scene = decode(doc, Dialect::Json, &DecodeOptions::default()).unwrap();
    assert_eq!(strict.shadow_ray_epsilon, 1e-3);

    let lenient = DecodeOptions {
        allow_non_finite: true,
        ..DecodeOptions::default()
    };
    let scene: Scene = decode(doc, Dialect::Json, &lenient).unwrap();
    assert!(scene.shadow_ray_epsilon.is_infinite());
}

#[test]
fn unreadable_source_names_the_path() {
    let loader = SceneLoader::with_source(MapSource(vec![]), LoadOptions::default());
    let err = loader.load(Source::Path(Path::new("missing.json"))).unwrap_err();
    match err {
        SceneError::UnreadableSource { source_name, .. } => assert_eq!(source_name, "missing.json"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn extension_hint_beats_sniffing_and_forced_format_beats_both() {
    let docs = MapSource(vec![(PathBuf::from("scene.xml"), "  <Scene/>")]);
    let loader = SceneLoader::with_source(docs, LoadOptions::default());
    assert!(loader.load(Source::Path(Path::new("scene.xml"))).is_ok());

    let docs = MapSource(vec![(PathBuf::from("scene.xml"), "<Scene/>")]);
    let forced = LoadOptions {
        format: FormatHint::Json,
        ..LoadOptions::default()
    };
    let loader = SceneLoader::with_source(docs, forced);
    let err = loader.load(Source::Path(Path::new("scene.xml"))).unwrap_err();
    assert!(matches!(err, SceneError::DecodingFailed(_)));
}

#[test]
fn load_all_keeps_input_order_and_isolates_failures() {
    let docs = MapSource(vec![
        (PathBuf::from("a.json"), r#"{"Scene": {"MaxRecursionDepth": 1}}"#),
        (PathBuf::from("b.xml"), "<Scene><MaxRecursionDepth>2</MaxRecursionDepth></Scene>"),
        (PathBuf::from("c.json"), "{ not json"),
    ]);
    let loader = SceneLoader::with_source(
        docs,
        LoadOptions {
            threads: Some(2),
            ..LoadOptions::default()
        },
    );
    let paths: Vec<PathBuf> = ["a.json", "b.xml", "c.json", "d.json"]
        .into_iter()
        .map(PathBuf::from)
        .collect();
    let reports = loader.load_all(&paths).unwrap();

    assert_eq!(reports.len(), 4);
    for (report, path) in reports.iter().zip(&paths) {
        assert_eq!(&report.path, path);
    }
    assert_eq!(reports[0].result.as_ref().unwrap().max_recursion_depth, 1);
    assert_eq!(reports[1].result.as_ref().unwrap().max_recursion_depth, 2);
    assert!(matches!(reports[2].result, Err(SceneError::DecodingFailed(_))));
    assert!(matches!(reports[3].result, Err(SceneError::UnreadableSource { .. })));
    assert!(!reports[0].diagnostics.is_empty());
}

#[test]
fn zero_threads_is_rejected() {
    let loader = SceneLoader::with_source(
        MapSource(vec![]),
        LoadOptions {
            threads: Some(0),
            ..LoadOptions::default()
        },
    );
    assert!(loader.load_all(&[]).is_err());
}

#[test]
fn tree_view_wraps_xml_under_root_key() {
    let loader = SceneLoader::new(LoadOptions::default());
    let tree = loader
        .load_tree(bytes("<MaxRecursionDepth>2</MaxRecursionDepth>"))
        .unwrap();
    assert_eq!(
        tree.get("Scene").and_then(|s| s.get("MaxRecursionDepth")),
        Some(&Node::from("2"))
    );
}
