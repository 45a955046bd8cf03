use crate::animation::tween::{Tween, frame_interval};
use crate::foundation::core::{CountryRow, ranked_prefix};
use crate::foundation::error::{BarRaceError, BarRaceResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Monotonic transition counter shared between a view and its tick loops.
///
/// Starting a transition advances the counter; a loop that captured an older value must stop.
#[derive(Clone, Debug, Default)]
pub struct GenerationToken(Arc<AtomicU64>);

impl GenerationToken {
    /// Fresh token at generation 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation.
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Supersede every in-flight loop and return the new generation.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Whether `generation` is still the latest.
    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// Consumer of tween frames, typically the rendering layer.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices between `begin` and
/// `end`. A superseded loop stops without calling `end`.
pub trait FrameSink: Send {
    /// Called once before the first frame of a transition.
    fn begin(&mut self, generation: u64) -> BarRaceResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: u64, rows: &[CountryRow]) -> BarRaceResult<()>;
    /// Called once after the final frame.
    fn end(&mut self) -> BarRaceResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    generation: Option<u64>,
    ended: bool,
    frames: Vec<(u64, Vec<CountryRow>)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation passed to the last `begin`.
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    /// Whether `end` was called for the current transition.
    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(u64, Vec<CountryRow>)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, generation: u64) -> BarRaceResult<()> {
        self.generation = Some(generation);
        self.ended = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, rows: &[CountryRow]) -> BarRaceResult<()> {
        self.frames.push((idx, rows.to_vec()));
        Ok(())
    }

    fn end(&mut self) -> BarRaceResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Message sent by a [`ChannelSink`].
#[derive(Clone, Debug, PartialEq)]
pub enum TickEvent {
    /// A transition started.
    Begin(u64),
    /// One frame.
    Frame(u64, Vec<CountryRow>),
    /// The transition reached its final frame.
    End,
}

/// Sink that forwards frames over a bounded channel to another thread.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::SyncSender<TickEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its channel.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<TickEvent>) {
        let (tx, rx) = mpsc::sync_channel(capacity.max(1));
        (Self { tx }, rx)
    }

    fn send(&self, ev: TickEvent) -> BarRaceResult<()> {
        self.tx
            .send(ev)
            .map_err(|_| BarRaceError::animation("frame receiver disconnected"))
    }
}

impl FrameSink for ChannelSink {
    fn begin(&mut self, generation: u64) -> BarRaceResult<()> {
        self.send(TickEvent::Begin(generation))
    }

    fn push_frame(&mut self, idx: u64, rows: &[CountryRow]) -> BarRaceResult<()> {
        self.send(TickEvent::Frame(idx, rows.to_vec()))
    }

    fn end(&mut self) -> BarRaceResult<()> {
        self.send(TickEvent::End)
    }
}

/// How a tick loop finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Reached the final frame after pushing this many frames.
    Completed(u64),
    /// A newer transition took over after this many frames.
    Superseded(u64),
}

/// Drive `tween` on the calling thread at `fps`, pushing frames into `sink`.
///
/// Before every tick the loop compares `generation` with `token` and returns silently once a newer
/// transition has started.
#[tracing::instrument(skip(tween, token, sink))]
pub fn run_transition(
    tween: &Tween,
    generation: u64,
    token: &GenerationToken,
    fps: u32,
    sink: &mut dyn FrameSink,
) -> BarRaceResult<TickOutcome> {
    let interval = frame_interval(fps);
    let started = Instant::now();
    let mut pushed: u64 = 0;

    if !token.is_current(generation) {
        return Ok(TickOutcome::Superseded(0));
    }
    sink.begin(generation)?;

    loop {
        if !token.is_current(generation) {
            tracing::debug!(pushed, "transition superseded");
            return Ok(TickOutcome::Superseded(pushed));
        }

        let elapsed = started.elapsed();
        let frame = tween.frame_at(elapsed);
        sink.push_frame(pushed, &frame)?;
        pushed += 1;

        if tween.is_complete(elapsed) {
            sink.end()?;
            return Ok(TickOutcome::Completed(pushed));
        }

        let due = started + interval.saturating_mul(u32::try_from(pushed).unwrap_or(u32::MAX));
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
    }
}

/// Run [`run_transition`] on a dedicated thread, streaming frames over a bounded channel.
pub fn spawn_transition(
    tween: Tween,
    generation: u64,
    token: GenerationToken,
    fps: u32,
    capacity: usize,
) -> (
    thread::JoinHandle<BarRaceResult<TickOutcome>>,
    mpsc::Receiver<TickEvent>,
) {
    let (mut sink, rx) = ChannelSink::new(capacity);
    let handle =
        thread::spawn(move || run_transition(&tween, generation, &token, fps, &mut sink));
    (handle, rx)
}

struct Active {
    tween: Tween,
    started: Instant,
}

/// Per-view animation state: what is on screen and the transition in flight.
///
/// New transitions always start from the frame currently displayed, so rapid consecutive
/// selections never jump back to an older snapshot.
pub struct TweenPlayer {
    token: GenerationToken,
    displayed: Vec<CountryRow>,
    active: Option<Active>,
    duration: Duration,
    reduced_motion: bool,
}

impl TweenPlayer {
    /// Player showing `initial` with transitions lasting `duration`.
    pub fn new(initial: Vec<CountryRow>, duration: Duration) -> Self {
        Self {
            token: GenerationToken::new(),
            displayed: initial,
            active: None,
            duration,
            reduced_motion: false,
        }
    }

    /// Skip interpolation and jump straight to each transition's final frame.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Whether reduced motion is on.
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Token shared with external tick loops.
    pub fn token(&self) -> &GenerationToken {
        &self.token
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.token.current()
    }

    /// Last frame handed out.
    pub fn displayed(&self) -> &[CountryRow] {
        &self.displayed
    }

    /// Whether a transition is still in flight.
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Begin a transition towards `next`, cancelling any in-flight one.
    ///
    /// Returns the new generation together with the tween, so callers can also drive it with
    /// [`run_transition`]. Under reduced motion the final frame is shown at once.
    pub fn start(&mut self, next: &[CountryRow], target: usize, now: Instant) -> (u64, Tween) {
        let generation = self.token.advance();
        let duration = if self.reduced_motion {
            Duration::ZERO
        } else {
            self.duration
        };
        let tween = Tween::new(&self.displayed, next, target, duration);
        if self.reduced_motion {
            self.displayed = ranked_prefix(next, target);
            self.active = None;
        } else {
            self.active = Some(Active {
                tween: tween.clone(),
                started: now,
            });
        }
        (generation, tween)
    }

    /// Advance to `now` and return the frame to display.
    pub fn sample(&mut self, now: Instant) -> &[CountryRow] {
        if let Some(active) = &self.active {
            let elapsed = now.saturating_duration_since(active.started);
            self.displayed = active.tween.frame_at(elapsed);
            if active.tween.is_complete(elapsed) {
                self.active = None;
            }
        }
        &self.displayed
    }
}

impl std::fmt::Debug for TweenPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenPlayer")
            .field("generation", &self.generation())
            .field("displayed", &self.displayed.len())
            .field("animating", &self.is_animating())
            .field("reduced_motion", &self.reduced_motion)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/player.rs"]
mod tests;
