use super::*;
use crate::scene::style::MaxExtent;

const DASH: &str = r#"
{
  "type": "box",
  "id": "root",
  "direction": "vertical",
  "padding": 8,
  "spacing": 4,
  "align": "center",
  "background": [240, 240, 240],
  "children": [
    { "type": "text", "id": "title", "content": "Status", "font_size": 20, "weight": "bold",
      "color": [20, 20, 20, 0.9] },
    { "type": "box", "id": "bar", "width": 120, "height": 6, "max_width": "unbounded",
      "corner_radius": 3, "background": [0, 128, 255] }
  ]
}
"#;

#[test]
fn parses_nested_boxes_and_text() {
    let desc = SceneDesc::from_json(DASH).unwrap();
    desc.validate().unwrap();
    let SceneDesc::Box(root) = &desc else {
        panic!("expected box");
    };
    assert_eq!(root.direction, LayoutMode::Vertical);
    assert_eq!(root.children.len(), 2);
    let SceneDesc::Box(bar) = &root.children[1] else {
        panic!("expected box");
    };
    assert_eq!(bar.frame.width, Some(120.0));
    assert_eq!(bar.frame.max_width, MaxExtent::Unbounded);
}

#[test]
fn build_applies_style_and_names() {
    let desc = SceneDesc::from_json(DASH).unwrap();
    let mut tree = SceneTree::new();
    let built = desc.build_named(&mut tree);

    assert_eq!(built.names.len(), 3);
    assert_eq!(built.names["root"], built.root);
    let root = tree.node(built.root).unwrap();
    assert_eq!(root.style().align_x, Align::Center);
    assert_eq!(root.style().padding, 8.0);
    assert_eq!(root.children().len(), 2);

    let title = tree.node(built.names["title"]).unwrap().text().unwrap();
    assert_eq!(title.font_size, 20.0);
    assert_eq!(title.weight, 700);
    assert!((title.color.a - 0.9).abs() < 1e-6);

    let bar = tree.node(built.names["bar"]).unwrap();
    assert_eq!(bar.style().corner_radius, 3.0);
    assert!(bar.style().max_width.is_unbounded());
    assert_eq!(bar.parent(), Some(built.root));
}

#[test]
fn unknown_style_words_fall_back_softly() {
    let desc = SceneDesc::from_json(
        r#"{ "type": "box", "direction": "spiral", "justify": "wobbly", "align_y": "??" }"#,
    )
    .unwrap();
    let mut tree = SceneTree::new();
    let id = desc.build(&mut tree);
    let s = tree.node(id).unwrap().style();
    assert_eq!(s.mode, LayoutMode::Stack);
    assert_eq!(s.justify, Justify::Start);
    assert_eq!(s.align_y, Align::Start);
}

#[test]
fn colors_clamp_out_of_range_channels() {
    assert_eq!(ColorDesc::Rgb([300.0, -5.0, 127.6]).to_rgba().to_rgba8(), [255, 0, 128, 255]);
    assert_eq!(ColorDesc::Rgba([0.0, 0.0, 0.0, 0.5]).to_rgba().a, 0.5);
}

#[test]
fn duplicate_ids_fail_validation() {
    let desc = SceneDesc::from_json(
        r#"{ "type": "box", "id": "a", "children": [ { "type": "box", "id": "a" } ] }"#,
    )
    .unwrap();
    let err = desc.validate().unwrap_err();
    assert!(matches!(err, StrataError::Validation(_)));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SceneDesc::from_json(r#"{ "type": "circle" }"#).unwrap_err();
    assert!(matches!(err, StrataError::Serde(_)));
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = SceneDesc::from_path("definitely/missing/scene.json").unwrap_err();
    assert!(err.to_string().contains("definitely/missing/scene.json"));
}

#[test]
fn descriptions_survive_a_json_round_trip() {
    let desc = SceneDesc::from_json(DASH).unwrap();
    let again = SceneDesc::from_json(&desc.to_json_pretty().unwrap()).unwrap();
    let mut a = SceneTree::new();
    let mut b = SceneTree::new();
    let ra = desc.build(&mut a);
    let rb = again.build(&mut b);
    assert_eq!(a.node(ra).unwrap().style(), b.node(rb).unwrap().style());
}
