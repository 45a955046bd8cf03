use super::*;
use crate::animation::ease::ease_in_out_cubic;

fn rows(entries: &[(&str, f64)]) -> Vec<CountryRow> {
    entries.iter().map(|(n, p)| CountryRow::new(*n, *p)).collect()
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn endpoints_equal_ranked_snapshots_exactly() {
    let prev = rows(&[("A", 10.4), ("B", 30.2)]);
    let next = rows(&[("C", 7.7), ("A", 40.1)]);
    let t = Tween::new(&prev, &next, 5, ms(1000));
    assert_eq!(t.frame_at_progress(0.0), rows(&[("B", 30.2), ("A", 10.4)]));
    assert_eq!(t.frame_at_progress(1.0), rows(&[("A", 40.1), ("C", 7.7)]));
    assert_eq!(t.frame_at(ms(1000)), t.final_frame());
    assert_eq!(t.frame_at(ms(5000)), t.final_frame());
}

#[test]
fn midpoint_follows_eased_lerp() {
    let t = Tween::new(&rows(&[("A", 10.0)]), &rows(&[("A", 50.0)]), 1, ms(1000));
    let expected = (10.0 + (50.0 - 10.0) * ease_in_out_cubic(0.5)).round();
    assert_eq!(t.frame_at(ms(500)), rows(&[("A", expected)]));
    assert_eq!(expected, 30.0);
}

#[test]
fn departing_country_shrinks_instead_of_vanishing() {
    let t = Tween::new(
        &rows(&[("A", 10_000.0), ("B", 8_000.0)]),
        &rows(&[("A", 12_000.0)]),
        2,
        ms(1000),
    );
    for step in 1..10 {
        let frame = t.frame_at(ms(step * 100));
        let b = frame.iter().find(|r| r.name == "B").unwrap();
        assert!(b.pop > 0.0 && b.pop < 8_000.0, "step {step}: {}", b.pop);
    }
    assert_eq!(t.frame_at(ms(1000)), rows(&[("A", 12_000.0)]));
}

#[test]
fn arriving_country_grows_in_and_reorders() {
    let t = Tween::new(
        &rows(&[("A", 50.0), ("B", 40.0)]),
        &rows(&[("A", 50.0), ("B", 40.0), ("C", 100.0)]),
        2,
        ms(1000),
    );
    let early = t.frame_at(ms(100));
    assert_eq!(early[0].name, "A");
    assert!(early.iter().all(|r| r.name != "C"));
    let late = t.frame_at(ms(900));
    assert_eq!(late[0].name, "C");
}

#[test]
fn frames_stay_ranked() {
    let t = Tween::new(
        &rows(&[("A", 10.0), ("B", 20.0), ("C", 30.0)]),
        &rows(&[("A", 30.0), ("B", 20.0), ("C", 10.0)]),
        3,
        ms(900),
    );
    for frame in t.sample_frames(60) {
        for pair in frame.windows(2) {
            assert!(
                pair[0].pop > pair[1].pop
                    || (pair[0].pop == pair[1].pop && pair[0].name < pair[1].name)
            );
        }
    }
}

#[test]
fn zero_duration_is_immediately_complete() {
    let t = Tween::new(&rows(&[("A", 1.0)]), &rows(&[("A", 9.0)]), 1, Duration::ZERO);
    assert_eq!(t.progress(Duration::ZERO), 1.0);
    assert_eq!(t.sample_frames(60), vec![rows(&[("A", 9.0)])]);
}

#[test]
fn sampled_frames_end_on_final_frame() {
    let t = Tween::new(&rows(&[("A", 0.0)]), &rows(&[("A", 1000.0)]), 1, ms(100));
    let frames = t.sample_frames(50);
    // 0, 20, 40, 60, 80, 100 ms
    assert_eq!(frames.len(), 6);
    assert_eq!(frames.first().unwrap(), &rows(&[("A", 0.0)]));
    assert_eq!(frames.last().unwrap(), &t.final_frame());
}

#[test]
fn linear_ease_is_selectable() {
    let t = Tween::new(&rows(&[("A", 0.0)]), &rows(&[("A", 100.0)]), 1, ms(1000))
        .with_ease(Ease::Linear);
    assert_eq!(t.frame_at(ms(250)), rows(&[("A", 25.0)]));
}

#[test]
fn sampling_terminates_at_extreme_rates() {
    assert_eq!(frame_interval(u32::MAX), Duration::ZERO);
    assert_eq!(frame_count(ms(900), u32::MAX), 3_865_470_566);
    assert_eq!(frame_count(ms(1), u32::MAX), 4_294_968);

    let t = Tween::new(&rows(&[("A", 0.0)]), &rows(&[("A", 900.0)]), 1, ms(900));
    let frames = t.sample_frames(1000);
    assert_eq!(frames.len(), 901);
    assert_eq!(frames.last().unwrap(), &t.final_frame());
}

#[test]
fn sample_count_follows_duration_and_rate() {
    let t = Tween::new(&rows(&[("A", 0.0)]), &rows(&[("A", 10.0)]), 1, ms(900));
    assert_eq!(t.sample_frames(60).len(), 55);
    assert_eq!(t.sample_frames(1).len(), 2);
    assert_eq!(t.sample_frames(0).len(), 2);
}
