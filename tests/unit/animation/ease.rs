use super::*;

const ALL: [Ease; 3] = [Ease::Linear, Ease::OutCubic, Ease::InOutCubic];

#[test]
fn endpoints_are_exact() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.5), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn in_out_cubic_matches_closed_form() {
    assert_eq!(ease_in_out_cubic(0.25), 4.0 * 0.25 * 0.25 * 0.25);
    assert_eq!(ease_in_out_cubic(0.5), 0.5);
    assert_eq!(ease_in_out_cubic(0.75), 1.0 - 0.5_f64.powi(3) / 2.0);
    assert!((ease_in_out_cubic(0.3) + ease_in_out_cubic(0.7) - 1.0).abs() < 1e-12);
}
