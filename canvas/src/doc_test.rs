#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn quad() -> Quad {
    [Point::new(10.0, 10.0), Point::new(110.0, 10.0), Point::new(110.0, 60.0), Point::new(10.0, 60.0)]
}

// =============================================================
// BlockKind serde
// =============================================================

#[test]
fn kind_serde_all_variants() {
    let cases = [
        (BlockKind::Grid, "\"grid\""),
        (BlockKind::Q, "\"q\""),
        (BlockKind::Digits, "\"digits\""),
        (BlockKind::Id, "\"id\""),
        (BlockKind::Phone, "\"phone\""),
        (BlockKind::Code, "\"code\""),
        (BlockKind::Name, "\"name\""),
    ];
    for (kind, expected) in cases {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
        let back: BlockKind = serde_json::from_str(expected).unwrap();
        assert_eq!(back, kind);
    }
}

#[test]
fn kind_deserialize_invalid_rejects() {
    assert!(serde_json::from_str::<BlockKind>("\"hexagon\"").is_err());
}

#[test]
fn kind_classification() {
    assert!(BlockKind::Grid.is_choice());
    assert!(BlockKind::Q.is_choice());
    assert!(!BlockKind::Digits.is_choice());
    for k in [BlockKind::Digits, BlockKind::Id, BlockKind::Phone, BlockKind::Code] {
        assert!(k.is_digit_like());
    }
    assert!(!BlockKind::Name.is_digit_like());
    assert!(!BlockKind::Name.is_choice());
}

// =============================================================
// Block serde
// =============================================================

#[test]
fn block_reads_camel_case_fields() {
    let value = json!({
        "type": "grid",
        "quad": [[10, 10], [110, 10], [110, 60], [10, 60]],
        "rows": 5,
        "cols": 4,
        "questionStart": 21,
        "questionCount": 5,
        "questionPrefix": "Q",
        "bubble": { "radius_px": 7 },
        "name": "Q21-25"
    });
    let block: Block = serde_json::from_value(value).unwrap();
    assert_eq!(block.kind, BlockKind::Grid);
    assert_eq!(block.quad, quad());
    assert_eq!(block.question_start, 21);
    assert_eq!(block.question_count, 5);
    assert_eq!(block.bubble, Some(BubbleOverride { radius_px: 7.0 }));
    assert_eq!(block.name.as_deref(), Some("Q21-25"));
    assert!(block.choices.is_none());
}

#[test]
fn block_applies_defaults() {
    let value = json!({ "type": "digits", "quad": [[0, 0], [1, 0], [1, 1], [0, 1]] });
    let block: Block = serde_json::from_value(value).unwrap();
    assert_eq!(block.rows, 1);
    assert_eq!(block.cols, 1);
    assert_eq!(block.question_start, 1);
    assert_eq!(block.question_count, 0);
    assert_eq!(block.question_prefix, "Q");
}

#[test]
fn block_rejects_quad_without_four_points() {
    let value = json!({ "type": "grid", "quad": [[0, 0], [1, 0], [1, 1]] });
    assert!(serde_json::from_value::<Block>(value).is_err());
}

#[test]
fn block_serializes_type_key_and_skips_absent_options() {
    let block = Block::new(BlockKind::Id, quad(), 10, 8);
    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(value["type"], "id");
    assert_eq!(value["questionStart"], 1);
    assert!(value.get("choices").is_none());
    assert!(value.get("bubble").is_none());
    assert!(value.get("name").is_none());
}

#[test]
fn block_cells_honour_radius_override() {
    let mut block = Block::new(BlockKind::Grid, quad(), 2, 5);
    assert_eq!(block.cells(0.5).radius, 13.0);
    block.bubble = Some(BubbleOverride { radius_px: 4.0 });
    assert_eq!(block.cells(0.5).radius, 4.0);
}

#[test]
fn block_translate_moves_all_corners() {
    let mut block = Block::new(BlockKind::Grid, quad(), 2, 5);
    block.translate(Point::new(-10.0, 5.0));
    assert_eq!(block.quad[0], Point::new(0.0, 15.0));
    assert_eq!(block.quad[2], Point::new(100.0, 65.0));
}

// =============================================================
// default_choices / normalize_choices
// =============================================================

#[test]
fn default_choices_for_grid_counts_columns() {
    assert_eq!(default_choices(BlockKind::Grid, 5), vec!["1", "2", "3", "4", "5"]);
    assert_eq!(default_choices(BlockKind::Q, 4), vec!["1", "2", "3", "4"]);
}

#[test]
fn default_choices_for_digit_like_is_zero_to_nine() {
    let expected: Vec<String> = (0..=9).map(|d| d.to_string()).collect();
    assert_eq!(default_choices(BlockKind::Phone, 11), expected);
    assert_eq!(default_choices(BlockKind::Digits, 3), expected);
}

#[test]
fn default_choices_for_name_is_empty() {
    assert!(default_choices(BlockKind::Name, 4).is_empty());
}

#[test]
fn normalize_fills_missing_and_keeps_explicit() {
    let mut layout = Layout::new(1000.0, 1400.0);
    let mut explicit = Block::new(BlockKind::Grid, quad(), 5, 5);
    explicit.choices = Some(vec!["A".into(), "B".into()]);
    layout.blocks.push(explicit);
    layout.blocks.push(Block::new(BlockKind::Grid, quad(), 5, 3));

    assert!(layout.normalize_choices());
    assert_eq!(layout.blocks[0].choices.as_deref(), Some(&["A".to_owned(), "B".to_owned()][..]));
    assert_eq!(layout.blocks[1].choices.as_ref().map(Vec::len), Some(3));
    assert!(!layout.normalize_choices());
}

// =============================================================
// Layout
// =============================================================

#[test]
fn layout_from_json_normalizes() {
    let json = r#"{
        "dpi": 300,
        "canvas": { "width": 2480, "height": 3508 },
        "cell_radius_ratio": 0.3,
        "blocks": [
            { "type": "grid", "quad": [[0,0],[100,0],[100,100],[0,100]], "rows": 5, "cols": 5 }
        ]
    }"#;
    let layout = Layout::from_json(json).unwrap();
    assert_eq!(layout.dpi, 300.0);
    assert_eq!(layout.canvas, CanvasSize { width: 2480.0, height: 3508.0 });
    assert_eq!(layout.cell_radius_ratio, 0.3);
    assert_eq!(layout.blocks[0].choices.as_ref().map(Vec::len), Some(5));
}

#[test]
fn layout_defaults_when_fields_absent() {
    let layout = Layout::from_json(r#"{ "canvas": { "width": 10, "height": 20 } }"#).unwrap();
    assert_eq!(layout.dpi, DEFAULT_DPI);
    assert_eq!(layout.cell_radius_ratio, DEFAULT_CELL_RADIUS_RATIO);
    assert!(layout.blocks.is_empty());
}

#[test]
fn layout_json_round_trip() {
    let mut layout = Layout::new(800.0, 600.0);
    layout.blocks.push(Block::new(BlockKind::Code, quad(), 10, 4));
    layout.normalize_choices();
    let json = layout.to_json_pretty().unwrap();
    assert_eq!(Layout::from_json(&json).unwrap(), layout);
}

#[test]
fn fit_canvas_to_image_overwrites_mismatch() {
    let mut layout = Layout::new(800.0, 600.0);
    assert!(!layout.fit_canvas_to_image(800.0, 600.0));
    assert!(layout.fit_canvas_to_image(1600.0, 1200.0));
    assert_eq!(layout.canvas, CanvasSize { width: 1600.0, height: 1200.0 });
}
