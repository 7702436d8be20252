use super::*;

#[test]
fn measuring_without_fonts_is_a_text_error() {
    let mut oracle = ParleyTextOracle::new();
    let err = oracle
        .measure_text(&TextRequest::new("hello", 16.0))
        .unwrap_err();
    assert!(matches!(err, StrataError::Text(_)));
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let mut oracle = ParleyTextOracle::new();
    assert!(oracle.register_font(b"definitely not a font").is_err());
    assert!(oracle.families().is_empty());
}

#[test]
fn missing_font_file_reports_path() {
    let err = ParleyTextOracle::from_font_file("no/such/font.ttf")
        .err()
        .unwrap();
    assert!(err.to_string().contains("no/such/font.ttf"));
}

#[test]
fn unknown_handles_resolve_to_nothing() {
    let oracle = ParleyTextOracle::new();
    assert!(oracle.texture(TextureHandle(42)).is_none());
}

#[test]
fn brush_quantizes_color() {
    let b = TextBrush::from(Rgba::new(1.0, 0.0, 0.5, 1.0));
    assert_eq!((b.r, b.g, b.b, b.a), (255, 0, 128, 255));
}

const FONT: &str = "tests/data/DejaVuSansMono.ttf";

fn loaded() -> ParleyTextOracle {
    ParleyTextOracle::from_font_file(FONT).unwrap()
}

#[test]
fn font_file_registers_its_family() {
    let oracle = loaded();
    assert_eq!(oracle.families(), ["DejaVu Sans Mono".to_string()]);

    let mut again = ParleyTextOracle::new();
    let bytes = std::fs::read(FONT).unwrap();
    assert_eq!(again.register_font(&bytes).unwrap(), "DejaVu Sans Mono");
    // Registering the same family twice keeps a single entry.
    again.register_font(&bytes).unwrap();
    assert_eq!(again.families().len(), 1);
}

#[test]
fn real_glyphs_measure_positive_and_grow_with_content() {
    let mut oracle = loaded();
    let short = oracle.measure_text(&TextRequest::new("ab", 16.0)).unwrap();
    let long = oracle.measure_text(&TextRequest::new("abcdef", 16.0)).unwrap();
    assert!(short.width > 0.0);
    assert!(short.height > 0.0);
    assert!(long.width > short.width);
    assert_eq!(long.height, short.height);

    let bigger = oracle.measure_text(&TextRequest::new("ab", 32.0)).unwrap();
    assert!(bigger.width > short.width);
}

#[test]
fn shaped_size_is_metrics_plus_padding() {
    let mut oracle = loaded();
    let req = TextRequest::new("hello", 16.0);
    let m = oracle.measure_text(&req).unwrap();
    let shaped = oracle.shape_to_texture(&req, Rgba::BLACK, 1.0).unwrap();
    assert_eq!(shaped.width, m.width + TEXT_PADDING * 2.0);
    assert_eq!(shaped.height, m.height + TEXT_PADDING * 2.0);

    let layout = oracle.texture(shaped.texture).unwrap();
    assert_eq!(layout.dpr, 1.0);
}

#[test]
fn family_lists_match_case_insensitively_or_fall_back() {
    let mut oracle = loaded();
    let mut req = TextRequest::new("x", 16.0);
    req.family = "\"Nope Sans\", dejavu sans mono".to_string();
    assert_eq!(oracle.resolve_family(&req.family).unwrap(), "DejaVu Sans Mono");

    req.family = "Nope Sans".to_string();
    assert_eq!(oracle.resolve_family(&req.family).unwrap(), "DejaVu Sans Mono");
    assert!(oracle.measure_text(&req).is_ok());
}

#[test]
fn handles_stay_unique_across_releases() {
    let mut oracle = loaded();
    let a = oracle
        .shape_to_texture(&TextRequest::new("alpha", 16.0), Rgba::BLACK, 1.0)
        .unwrap();
    oracle.release_textures();
    let b = oracle
        .shape_to_texture(&TextRequest::new("completely different", 16.0), Rgba::BLACK, 2.0)
        .unwrap();

    assert_ne!(a.texture, b.texture);
    assert!(oracle.texture(a.texture).is_none());
    assert_eq!(oracle.texture(b.texture).unwrap().dpr, 2.0);
}
