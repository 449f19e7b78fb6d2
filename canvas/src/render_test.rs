use super::*;
use crate::geom::{Point, Quad};

fn quad() -> Quad {
    [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0), Point::new(0.0, 100.0)]
}

#[test]
fn choice_block_labels_by_column() {
    let block = Block::new(BlockKind::Grid, quad(), 3, 5);
    assert_eq!(cell_label(&block, 0, 0), "1");
    assert_eq!(cell_label(&block, 2, 4), "5");
}

#[test]
fn choice_block_uses_custom_choices() {
    let mut block = Block::new(BlockKind::Q, quad(), 1, 3);
    block.choices = Some(vec!["A".into(), "B".into(), "C".into()]);
    assert_eq!(cell_label(&block, 0, 1), "B");
    // Past the end of the list falls back to the column number.
    assert_eq!(cell_label(&block, 0, 5), "6");
}

#[test]
fn digit_block_labels_by_row() {
    let block = Block::new(BlockKind::Digits, quad(), 10, 3);
    assert_eq!(cell_label(&block, 0, 2), "0");
    assert_eq!(cell_label(&block, 7, 0), "7");
}

#[test]
fn digit_block_without_choices_wraps_rows() {
    let block = Block::new(BlockKind::Phone, quad(), 12, 1);
    assert_eq!(cell_label(&block, 11, 0), "1");
}

#[test]
fn name_block_labels_with_jamo() {
    let block = Block::new(BlockKind::Name, quad(), 40, 3);
    assert_eq!(cell_label(&block, 0, 0), "ㄱ");
    assert_eq!(cell_label(&block, 18, 1), "ㅎ");
    assert_eq!(cell_label(&block, 19, 2), "ㅏ");
    assert_eq!(cell_label(&block, 39, 0), "ㅣ");
    assert_eq!(cell_label(&block, 40, 0), "ㄱ");
}

#[test]
fn jamo_table_has_consonants_then_vowels() {
    assert_eq!(NAME_JAMO.len(), 40);
    assert_eq!(NAME_JAMO[0], "ㄱ");
    assert_eq!(NAME_JAMO[19], "ㅏ");
}
