use super::*;

#[test]
fn width_scales_with_chars_and_size() {
    let mut o = MonospaceOracle::default();
    let m = o.measure_text(&TextRequest::new("hello", 10.0)).unwrap();
    assert_eq!(m.width, 30.0);
    assert_eq!(m.height, 12.0);
}

#[test]
fn multiline_uses_widest_line() {
    let mut o = MonospaceOracle::new(0.5, 1.0);
    let m = o.measure_text(&TextRequest::new("ab\nabcd\n", 10.0)).unwrap();
    assert_eq!(m.width, 20.0);
    assert_eq!(m.height, 30.0);
}

#[test]
fn shaped_size_includes_padding() {
    let mut o = MonospaceOracle::default();
    let s = o
        .shape_to_texture(&TextRequest::new("hello", 10.0), Rgba::BLACK, 2.0)
        .unwrap();
    assert_eq!(s.width, 38.0);
    assert_eq!(s.height, 20.0);
    assert_eq!(o.shape_calls(), 1);
}

#[test]
fn invalid_font_size_is_a_text_error() {
    let mut o = MonospaceOracle::default();
    let err = o.measure_text(&TextRequest::new("x", 0.0)).unwrap_err();
    assert!(matches!(err, StrataError::Text(_)));
}
