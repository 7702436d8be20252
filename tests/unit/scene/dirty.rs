use super::*;

#[test]
fn escalation_keeps_the_strongest_bit() {
    assert_eq!(Dirty::MEASURE.escalation(), Dirty::MEASURE);
    assert_eq!((Dirty::MEASURE | Dirty::PAINT).escalation(), Dirty::MEASURE);
    assert_eq!(Dirty::LAYOUT.escalation(), Dirty::LAYOUT);
    assert_eq!(Dirty::PAINT.escalation(), Dirty::PAINT);
}

#[test]
fn new_nodes_start_fully_dirty() {
    assert_eq!(Dirty::default(), Dirty::MEASURE | Dirty::LAYOUT | Dirty::PAINT);
}
