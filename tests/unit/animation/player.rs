use super::*;

fn rows(entries: &[(&str, f64)]) -> Vec<CountryRow> {
    entries.iter().map(|(n, p)| CountryRow::new(*n, *p)).collect()
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn token_advances_monotonically() {
    let token = GenerationToken::new();
    assert_eq!(token.current(), 0);
    let a = token.advance();
    let b = token.clone().advance();
    assert_eq!((a, b), (1, 2));
    assert!(!token.is_current(a));
    assert!(token.is_current(b));
}

#[test]
fn player_interpolates_then_settles_on_final_frame() {
    let t0 = Instant::now();
    let mut player = TweenPlayer::new(rows(&[("A", 10.0)]), ms(1000));
    player.start(&rows(&[("A", 50.0)]), 1, t0);
    assert!(player.is_animating());

    assert_eq!(player.sample(t0 + ms(500)), rows(&[("A", 30.0)]).as_slice());
    assert!(player.is_animating());

    assert_eq!(player.sample(t0 + ms(1200)), rows(&[("A", 50.0)]).as_slice());
    assert!(!player.is_animating());
}

#[test]
fn restart_begins_from_displayed_frame() {
    let t0 = Instant::now();
    let mut player = TweenPlayer::new(rows(&[("A", 0.0)]), ms(1000));
    player.start(&rows(&[("A", 1000.0)]), 1, t0);
    let shown = player.sample(t0 + ms(500))[0].pop;
    assert_eq!(shown, 500.0);

    // Scrub onward before the first transition finishes.
    let (generation, tween) = player.start(&rows(&[("A", 2000.0)]), 1, t0 + ms(500));
    assert_eq!(generation, 2);
    assert_eq!(tween.first_frame(), rows(&[("A", 500.0)]));
    let next = player.sample(t0 + ms(510))[0].pop;
    assert!(next >= shown, "went backwards: {next} < {shown}");
}

#[test]
fn reduced_motion_jumps_to_final_frame() {
    let t0 = Instant::now();
    let mut player = TweenPlayer::new(rows(&[("A", 1.0), ("B", 2.0)]), ms(1000));
    player.set_reduced_motion(true);
    player.start(&rows(&[("A", 9.0), ("B", 3.0), ("C", 1.0)]), 2, t0);
    assert!(!player.is_animating());
    assert_eq!(player.displayed(), rows(&[("A", 9.0), ("B", 3.0)]).as_slice());
    assert_eq!(player.sample(t0), rows(&[("A", 9.0), ("B", 3.0)]).as_slice());
}

#[test]
fn run_transition_pushes_frames_until_final() {
    let tween = Tween::new(&rows(&[("A", 0.0)]), &rows(&[("A", 100.0)]), 1, ms(40));
    let token = GenerationToken::new();
    let generation = token.advance();
    let mut sink = InMemorySink::new();

    let outcome = run_transition(&tween, generation, &token, 250, &mut sink).unwrap();

    let TickOutcome::Completed(n) = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    assert_eq!(n as usize, sink.frames().len());
    assert!(sink.ended());
    assert_eq!(sink.generation(), Some(generation));
    assert_eq!(sink.frames().last().unwrap().1, rows(&[("A", 100.0)]));
    for (i, (idx, _)) in sink.frames().iter().enumerate() {
        assert_eq!(*idx, i as u64);
    }
}

#[test]
fn stale_generation_never_touches_sink() {
    let tween = Tween::new(&rows(&[("A", 0.0)]), &rows(&[("A", 1.0)]), 1, ms(10));
    let token = GenerationToken::new();
    let stale = token.advance();
    token.advance();
    let mut sink = InMemorySink::new();

    let outcome = run_transition(&tween, stale, &token, 60, &mut sink).unwrap();
    assert_eq!(outcome, TickOutcome::Superseded(0));
    assert!(sink.frames().is_empty());
    assert_eq!(sink.generation(), None);
}

#[test]
fn spawned_loop_stops_when_superseded() {
    let tween = Tween::new(
        &rows(&[("A", 0.0)]),
        &rows(&[("A", 1_000_000.0)]),
        1,
        Duration::from_secs(30),
    );
    let token = GenerationToken::new();
    let generation = token.advance();
    let (handle, rx) = spawn_transition(tween, generation, token.clone(), 100, 4);

    assert_eq!(rx.recv().unwrap(), TickEvent::Begin(generation));
    assert!(matches!(rx.recv().unwrap(), TickEvent::Frame(0, _)));
    token.advance();

    let events: Vec<_> = rx.iter().collect();
    assert!(!events.contains(&TickEvent::End));

    let outcome = handle.join().unwrap().unwrap();
    assert!(matches!(outcome, TickOutcome::Superseded(n) if n >= 1));
}
