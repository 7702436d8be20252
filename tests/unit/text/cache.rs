use super::*;
use crate::text::monospace::MonospaceOracle;

#[test]
fn measure_is_memoized_per_key() {
    let mut cache = TextCache::new();
    let mut oracle = MonospaceOracle::default();
    let req = TextRequest::new("abcd", 10.0);

    let a = cache.measure(&mut oracle, &req).unwrap();
    let b = cache.measure(&mut oracle, &req).unwrap();
    assert_eq!(a, b);
    assert_eq!(oracle.measure_calls(), 1);
    assert_eq!(cache.stats().measure_hits, 1);
    assert_eq!(cache.stats().measure_misses, 1);

    let mut heavier = req.clone();
    heavier.weight = 700;
    cache.measure(&mut oracle, &heavier).unwrap();
    assert_eq!(oracle.measure_calls(), 2);
}

#[test]
fn textures_are_keyed_by_color() {
    let mut cache = TextCache::new();
    let mut oracle = MonospaceOracle::default();
    let req = TextRequest::new("x", 12.0);

    let black = cache.texture(&mut oracle, &req, Rgba::BLACK, 1.0).unwrap();
    let again = cache.texture(&mut oracle, &req, Rgba::BLACK, 1.0).unwrap();
    let white = cache.texture(&mut oracle, &req, Rgba::WHITE, 1.0).unwrap();
    assert_eq!(black, again);
    assert_ne!(black.texture, white.texture);
    assert_eq!(oracle.shape_calls(), 2);
}

#[test]
fn clear_starts_a_new_epoch() {
    let mut cache = TextCache::new();
    let mut oracle = MonospaceOracle::default();
    let req = TextRequest::new("x", 12.0);
    cache.measure(&mut oracle, &req).unwrap();
    assert!(!cache.is_empty());

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.epoch(), 1);
    cache.measure(&mut oracle, &req).unwrap();
    assert_eq!(oracle.measure_calls(), 2);
}
