use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"strata");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_u8(b's');
    b.write_bytes(b"trata");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn str_writes_are_delimited() {
    let mut a = Fnv1a64::new_default();
    a.write_str("ab");
    a.write_str("c");
    let mut b = Fnv1a64::new_default();
    b.write_str("a");
    b.write_str("bc");
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn non_negative_clamps_bad_lengths() {
    assert_eq!(non_negative(-3.0), 0.0);
    assert_eq!(non_negative(f64::NAN), 0.0);
    assert_eq!(non_negative(12.5), 12.5);
    assert_eq!(non_negative(f64::INFINITY), f64::INFINITY);
}

#[test]
fn positive_or_falls_back() {
    assert_eq!(positive_or(0.0, 16.0), 16.0);
    assert_eq!(positive_or(f32::NAN, 16.0), 16.0);
    assert_eq!(positive_or(9.0, 16.0), 9.0);
}
