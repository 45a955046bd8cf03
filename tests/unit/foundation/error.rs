use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BarRaceError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BarRaceError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        BarRaceError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk gone");
    let err = BarRaceError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk gone"));
}
