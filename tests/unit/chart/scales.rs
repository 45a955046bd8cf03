use super::*;

#[test]
fn linear_maps_domain_ends_to_range_ends() {
    let x = LinearScale::new([0.0, 200.0], [0.0, 800.0]);
    assert_eq!(x.apply(0.0), 0.0);
    assert_eq!(x.apply(100.0), 400.0);
    assert_eq!(x.apply(200.0), 800.0);
}

#[test]
fn degenerate_domain_does_not_divide_by_zero() {
    let x = LinearScale::for_population(0.0, 500.0);
    assert_eq!(x.apply(0.0), 0.0);
    assert!(x.apply(1.0).is_finite());
}

#[test]
fn bands_are_centered_in_their_steps() {
    let y = BandScale::new(&["A", "B", "C", "D"], [0.0, 400.0], 0.25);
    assert_eq!(y.step(), 100.0);
    assert_eq!(y.bandwidth(), 75.0);
    assert_eq!(y.position("A"), 12.5);
    assert_eq!(y.position("D"), 312.5);
    assert_eq!(y.position("missing"), 12.5);
}

#[test]
fn empty_band_domain_is_safe() {
    let y = BandScale::new::<&str>(&[], [0.0, 100.0], 0.2);
    assert_eq!(y.step(), 100.0);
    assert!(y.position("A").is_finite());
}
