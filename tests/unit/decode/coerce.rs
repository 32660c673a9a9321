use super::*;

fn json(s: &str) -> Node {
    serde_json::from_str(s).unwrap()
}

#[test]
fn scalar_number_string_and_padded_string_agree() {
    assert_eq!(scalar(&json("3.5"), false), Some(3.5));
    assert_eq!(scalar(&json("\"3.5\""), false), Some(3.5));
    assert_eq!(scalar(&json("\"  3.5  \""), false), Some(3.5));
    assert_eq!(scalar(&json("\"abc\""), false), None);
    assert_eq!(scalar(&json("[3.5]"), false), None);
}

#[test]
fn scalar_rejects_non_finite_unless_allowed() {
    assert_eq!(scalar(&Node::from("inf"), false), None);
    assert_eq!(scalar(&Node::from("NaN"), false), None);
    assert_eq!(scalar(&Node::from("inf"), true), Some(f64::INFINITY));
}

#[test]
fn integer_requires_integral_values() {
    assert_eq!(integer(&json("6")), Some(6));
    assert_eq!(integer(&json("\" 6 \"")), Some(6));
    assert_eq!(integer(&json("\"6.0\"")), Some(6));
    assert_eq!(integer(&json("6.5")), None);
    assert_eq!(integer(&json("\"six\"")), None);
}

#[test]
fn string_accepts_numbers() {
    assert_eq!(string(&json("\"out.png\"")), Some("out.png".to_owned()));
    assert_eq!(string(&json("7")), Some("7".to_owned()));
    assert_eq!(string(&json("0.25")), Some("0.25".to_owned()));
    assert_eq!(string(&json("{}")), None);
}

#[test]
fn vector_shapes_agree() {
    let expected = Some(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(vec3(&json("[1,2,3]"), false), expected);
    assert_eq!(vec3(&json("\"1 2 3\""), false), expected);
    assert_eq!(vec3(&json(r#"{"x":1,"y":2,"z":3}"#), false), expected);
    assert_eq!(vec3(&json(r#"["1", "2", 3]"#), false), expected);
    assert_eq!(vec3(&Node::from("1\t2\n3 4"), false), expected);
}

#[test]
fn vector_rejects_commas_short_input_and_bare_numbers() {
    assert_eq!(vec3(&json("\"1,2,3\""), false), None);
    assert_eq!(vec3(&json("\"1 2\""), false), None);
    assert_eq!(vec3(&json("[1,2]"), false), None);
    assert_eq!(vec3(&json("5"), false), None);
    assert_eq!(vec3(&json("\"5\""), false), None);
    assert_eq!(vec3(&json(r#"{"x":1,"y":2}"#), false), None);
}

#[test]
fn text_bearing_maps_are_looked_through() {
    let n = json(r#"{"_id": "1", "_data": "0.5 0.5 0.5"}"#);
    assert_eq!(vec3(&n, false), Some(Vec3::splat(0.5)));
}

#[test]
fn scalar_lists_split_on_whitespace_runs_and_flatten_rows() {
    assert_eq!(
        scalar_list(&json("\"0 0 0\\n1  0\\t0\""), false),
        Some(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0])
    );
    assert_eq!(
        scalar_list(&json("[[0, 1, 2], [\"3\", 4, 5]]"), false),
        Some(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
    );
    assert_eq!(scalar_list(&json("\"\""), false), Some(vec![]));
    assert_eq!(scalar_list(&json("\"1 x 2\""), false), None);
    assert_eq!(scalar_list(&json("3"), false), None);
}

#[test]
fn integer_lists() {
    assert_eq!(integer_list(&json("\"1 2 3\"")), Some(vec![1, 2, 3]));
    assert_eq!(integer_list(&json("[1, \"2\", 3]")), Some(vec![1, 2, 3]));
    assert_eq!(integer_list(&json("\"1 2.5\"")), None);
}

#[test]
fn vertex_ref_prefers_index_for_integers() {
    assert_eq!(vertex_ref(&json("6"), false), Some(VertexRef::Index(6)));
    assert_eq!(vertex_ref(&json("\" 6 \""), false), Some(VertexRef::Index(6)));
    assert_eq!(
        vertex_ref(&json("\"0 1 0\""), false),
        Some(VertexRef::Inline(Vec3::Y))
    );
    assert_eq!(vertex_ref(&json("6.5"), false), None);
    assert_eq!(
        vertex_ref(&json("\"99999999999999999999\""), false),
        Some(VertexRef::Index(i64::MAX))
    );
    assert_eq!(
        vertex_ref(&json("-1e20"), false),
        Some(VertexRef::Index(i64::MIN))
    );
}
