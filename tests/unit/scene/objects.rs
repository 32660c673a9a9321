use super::*;
use crate::decode::diagnostics::Diagnostics;

fn json(s: &str) -> Node {
    serde_json::from_str(s).unwrap()
}

fn store() -> VertexData {
    VertexData::new(
        None,
        vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)],
    )
}

fn root() -> FieldPath {
    FieldPath::root().field("Objects")
}

#[test]
fn triangle_resolves_one_based_indices() {
    let mut ctx = DecodeContext::new(false, None);
    let node = json(r#"{"_id": "1", "Material": 2, "Indices": "1 2 3"}"#);
    let tri = Triangle::decode(&node, &root(), &mut ctx, &store()).unwrap();

    assert_eq!(tri.common.id.as_deref(), Some("1"));
    assert_eq!(tri.common.material.as_deref(), Some("2"));
    assert_eq!(tri.indices, [0, 1, 2]);
    assert_eq!(tri.vertices, [Vec3::ZERO, Vec3::X, Vec3::Y]);
}

#[test]
fn triangle_index_out_of_range_is_fatal() {
    let mut ctx = DecodeContext::new(false, None);
    for indices in ["0 1 2", "1 2 5"] {
        let node = json(&format!(r#"{{"Indices": "{indices}"}}"#));
        let err = Triangle::decode(&node, &root(), &mut ctx, &store()).unwrap_err();
        assert!(matches!(err, SceneError::InvalidVertexData { .. }), "{indices}");
    }
}

#[test]
fn triangle_needs_three_indices() {
    let mut ctx = DecodeContext::new(false, None);
    let err = Triangle::decode(&json(r#"{"Indices": "1 2"}"#), &root(), &mut ctx, &store())
        .unwrap_err();
    assert!(matches!(err, SceneError::ExpectedValue { .. }));

    let err = Triangle::decode(&json("{}"), &root(), &mut ctx, &store()).unwrap_err();
    assert_eq!(err.path().unwrap().to_string(), "$.Objects.Indices");
}

#[test]
fn triangle_surplus_indices_are_reported() {
    let mut diags = Diagnostics::new();
    let mut ctx = DecodeContext::new(false, Some(&mut diags));
    let tri = Triangle::decode(&json("{\"Indices\": [1, 2, 3, 4]}"), &root(), &mut ctx, &store())
        .unwrap();
    assert_eq!(tri.indices, [0, 1, 2]);
    drop(ctx);
    assert_eq!(diags.of_kind(IssueKind::Ignored).count(), 1);
}

#[test]
fn prepare_caches_edges_and_normal_once() {
    let tri = Triangle::new(
        ObjectCommon::default(),
        [0, 1, 2],
        [Vec3::ZERO, Vec3::X, Vec3::Y],
    );
    assert!(tri.geometry().is_none());

    let first = *tri.prepare();
    assert_eq!(first.e1, Vec3::X);
    assert_eq!(first.e2, Vec3::Y);
    assert_eq!(first.normal, Vec3::Z);

    let again: *const TriangleGeometry = tri.prepare();
    assert!(std::ptr::eq(again, tri.geometry().unwrap()));
}

#[test]
fn mesh_groups_faces_and_inherits_common_fields() {
    let mut ctx = DecodeContext::new(false, None);
    let node = json(r#"{"_id": "7", "Material": "1", "Faces": {"_data": "1 2 3 2 4 3"}}"#);
    let mesh = Mesh::decode(&node, &root(), &mut ctx, &store()).unwrap();

    assert_eq!(mesh.triangles.len(), 2);
    assert_eq!(mesh.triangles[1].indices, [1, 3, 2]);
    assert!(
        mesh.triangles
            .iter()
            .all(|t| t.common.id.as_deref() == Some("7") && t.common.material.as_deref() == Some("1"))
    );
}

#[test]
fn mesh_faces_must_be_whole_triangles() {
    let mut ctx = DecodeContext::new(false, None);
    let err = Mesh::decode(&json(r#"{"Faces": "1 2 3 4"}"#), &root(), &mut ctx, &store())
        .unwrap_err();
    assert!(matches!(err, SceneError::ExpectedValue { .. }));

    let err = Mesh::decode(&json(r#"{"Faces": "1 2 3 4 5 6"}"#), &root(), &mut ctx, &store())
        .unwrap_err();
    assert!(matches!(err, SceneError::InvalidVertexData { .. }));
    assert_eq!(err.path().unwrap().to_string(), "$.Objects.Faces[1]");
}

#[test]
fn sphere_center_by_index_or_inline() {
    let mut ctx = DecodeContext::new(false, None);

    let by_index = Sphere::decode(
        &json(r#"{"Center": "2", "Radius": "0.5"}"#),
        &root(),
        &mut ctx,
        &store(),
    )
    .unwrap();
    assert_eq!(by_index.center_ref, VertexRef::Index(2));
    assert_eq!(by_index.center, Vec3::X);
    assert_eq!(by_index.radius, 0.5);

    let inline = Sphere::decode(&json(r#"{"Center": "0 0 -3"}"#), &root(), &mut ctx, &store())
        .unwrap();
    assert_eq!(inline.center_ref, VertexRef::Inline(Vec3::new(0.0, 0.0, -3.0)));
    assert_eq!(inline.radius, 1.0);
}

#[test]
fn sphere_center_is_required() {
    let mut ctx = DecodeContext::new(false, None);
    let err = Sphere::decode(&json("{}"), &root(), &mut ctx, &store()).unwrap_err();
    assert!(matches!(err, SceneError::ExpectedValue { .. }));

    let err = Sphere::decode(&json(r#"{"Center": "a b"}"#), &root(), &mut ctx, &store())
        .unwrap_err();
    assert!(matches!(err, SceneError::ExpectedVector { .. }));
}

#[test]
fn sphere_center_index_beyond_i64_is_out_of_range() {
    let mut ctx = DecodeContext::new(false, None);
    let node = json(r#"{"Center": "99999999999999999999"}"#);
    let err = Sphere::decode(&node, &root(), &mut ctx, &store()).unwrap_err();
    assert!(matches!(err, SceneError::InvalidVertexData { .. }));
    assert_eq!(err.path().unwrap().to_string(), "$.Objects.Center");
}

#[test]
fn plane_defaults_normal_to_z() {
    let mut ctx = DecodeContext::new(false, None);
    let plane = Plane::decode(&json(r#"{"Point": 4}"#), &root(), &mut ctx, &store()).unwrap();
    assert_eq!(plane.point, Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(plane.normal, Vec3::Z);
}

#[test]
fn scene_object_accessors_and_serialization() {
    let obj = SceneObject::Triangle(Triangle::new(
        ObjectCommon {
            id: Some("t".to_owned()),
            material: None,
        },
        [0, 1, 2],
        [Vec3::ZERO, Vec3::X, Vec3::Y],
    ));
    assert_eq!(obj.tag(), "Triangle");
    assert_eq!(obj.common().id.as_deref(), Some("t"));

    let value = serde_json::to_value(&obj).unwrap();
    assert_eq!(value["kind"], "Triangle");
    assert_eq!(value["id"], "t");
    assert_eq!(value["indices"], serde_json::json!([0, 1, 2]));
}
