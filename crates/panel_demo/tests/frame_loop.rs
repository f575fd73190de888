use std::{
    sync::{Arc, Barrier},
    thread,
    time::{Duration, Instant},
};

use panel_demo::{
    State,
    frame_loop::{FrameLoop, FrameSurface, Phase},
    shutdown::{ShutdownHandle, ShutdownSignal},
    ticker::Ticker,
};
use parking_lot::Mutex;

const PERIOD: Duration = Duration::from_millis(33);

/// What the frame loop asked of a [`RecordingSurface`]. Outlives the surface.
#[derive(Default)]
struct Record {
    polls: usize,
    frames: usize,
    teardowns: usize,
    drops: usize,

    /// Background seen by the first frame.
    first_background: Option<[u8; 4]>,

    /// Whether shutdown had been acknowledged when the surface was dropped.
    done_at_drop: Option<bool>,
}

struct RecordingSurface {
    record: Arc<Mutex<Record>>,
    signal: Arc<ShutdownSignal>,

    /// Request close when polled for the n:th time.
    close_on_poll: Option<usize>,
    close_requested: bool,
}

impl RecordingSurface {
    fn new(signal: &Arc<ShutdownSignal>) -> (Option<Self>, Arc<Mutex<Record>>) {
        let record = Arc::new(Mutex::new(Record::default()));
        let surface = Self {
            record: Arc::clone(&record),
            signal: Arc::clone(signal),
            close_on_poll: None,
            close_requested: false,
        };
        (Some(surface), record)
    }
}

impl FrameSurface for RecordingSurface {
    fn poll_events(&mut self) {
        let mut record = self.record.lock();
        record.polls += 1;
        if self.close_on_poll == Some(record.polls) {
            self.close_requested = true;
        }
    }

    fn close_requested(&self) -> bool {
        self.close_requested
    }

    fn run_frame(&mut self, state: &mut State) {
        let mut record = self.record.lock();
        assert_eq!(record.teardowns, 0, "frame after teardown");
        record.first_background.get_or_insert(state.background());
        record.frames += 1;
    }

    fn teardown(&mut self) {
        let mut record = self.record.lock();
        assert!(!self.signal.is_done(), "acknowledged before teardown");
        record.teardowns += 1;
    }
}

impl Drop for RecordingSurface {
    fn drop(&mut self) {
        let mut record = self.record.lock();
        record.drops += 1;
        record.done_at_drop = Some(self.signal.is_done());
    }
}

fn frame_loop(start: Instant) -> (FrameLoop, Arc<ShutdownSignal>) {
    let signal = ShutdownSignal::new();
    let frame_loop = FrameLoop::new(
        State::default(),
        Ticker::new(PERIOD, start),
        Arc::clone(&signal),
    );
    (frame_loop, signal)
}

#[test]
fn ticks_run_frames_at_the_ticker_rate() {
    let start = Instant::now();
    let (mut frame_loop, signal) = frame_loop(start);
    let (mut surface, record) = RecordingSurface::new(&signal);

    frame_loop.on_tick(start, &mut surface);
    assert_eq!(record.lock().frames, 0, "first tick is one period in");

    for i in 1..=5 {
        assert_eq!(frame_loop.on_tick(start + PERIOD * i, &mut surface), Phase::Running);
    }
    assert_eq!(record.lock().frames, 5);
    assert_eq!(record.lock().polls, 5);
    assert_eq!(frame_loop.frame_nr(), 5);
}

#[test]
fn first_frame_sees_the_startup_background() {
    let (mut frame_loop, signal) = frame_loop(Instant::now());
    let (mut surface, record) = RecordingSurface::new(&signal);
    frame_loop.step(&mut surface);
    assert_eq!(record.lock().first_background, Some([28, 48, 62, 255]));
}

#[test]
fn close_request_stops_frames_and_tears_down() {
    let (mut frame_loop, signal) = frame_loop(Instant::now());
    let (mut surface, record) = RecordingSurface::new(&signal);
    if let Some(surface) = &mut surface {
        surface.close_on_poll = Some(3);
    }

    assert_eq!(frame_loop.step(&mut surface), Phase::Running);
    assert_eq!(frame_loop.step(&mut surface), Phase::Running);
    assert_eq!(frame_loop.step(&mut surface), Phase::Terminated);
    assert!(surface.is_none(), "the window is gone after shutdown");
    assert_eq!(record.lock().frames, 2, "no frame on the tick that saw the close request");

    for _ in 0..10 {
        assert_eq!(frame_loop.step(&mut surface), Phase::Terminated);
    }
    let record = record.lock();
    assert_eq!(record.frames, 2);
    assert_eq!(record.polls, 3);
    assert_eq!(record.teardowns, 1);
    assert_eq!(record.drops, 1);
    assert!(signal.is_done());
    assert_eq!(frame_loop.next_deadline(), None);
}

#[test]
fn shutdown_request_is_seen_at_the_next_tick() {
    let (mut frame_loop, signal) = frame_loop(Instant::now());
    let (mut surface, record) = RecordingSurface::new(&signal);

    frame_loop.step(&mut surface);
    assert!(signal.request());
    assert_eq!(frame_loop.step(&mut surface), Phase::Terminated);

    let record = record.lock();
    assert_eq!(record.frames, 1);
    assert_eq!(record.polls, 1, "input is not polled once shutdown is requested");
    assert_eq!(record.teardowns, 1);
}

#[test]
fn window_is_dropped_before_shutdown_is_acknowledged() {
    let (mut frame_loop, signal) = frame_loop(Instant::now());
    let (mut surface, record) = RecordingSurface::new(&signal);

    frame_loop.step(&mut surface);
    assert_eq!(frame_loop.shut_down(&mut surface), Phase::Terminated);

    assert_eq!(record.lock().done_at_drop, Some(false));
    assert!(signal.is_done());
}

#[test]
fn shutdown_without_a_surface_still_acknowledges() {
    let (mut frame_loop, signal) = frame_loop(Instant::now());
    let mut surface: Option<RecordingSurface> = None;

    assert!(signal.request());
    assert_eq!(frame_loop.step(&mut surface), Phase::Terminated);
    assert!(signal.is_done());
}

#[test]
fn abandon_releases_waiters_without_teardown() {
    let (mut frame_loop, signal) = frame_loop(Instant::now());
    frame_loop.abandon();
    assert_eq!(frame_loop.phase(), Phase::Terminated);
    ShutdownHandle::new(signal, || {}).shutdown_and_wait();
}

#[test]
fn concurrent_shutdown_tears_down_exactly_once() {
    const CONTROLLERS: usize = 8;

    let (mut frame_loop, signal) = frame_loop(Instant::now());
    let handle = ShutdownHandle::new(Arc::clone(&signal), || {});
    let (mut surface, record) = RecordingSurface::new(&signal);

    let frame_thread = thread::spawn(move || {
        while frame_loop.step(&mut surface) == Phase::Running {
            thread::sleep(Duration::from_millis(1));
        }
        // More ticks after termination must not do anything.
        frame_loop.step(&mut surface);
        frame_loop.shut_down(&mut surface);
    });

    let barrier = Arc::new(Barrier::new(CONTROLLERS));
    let controllers: Vec<_> = (0..CONTROLLERS)
        .map(|_| {
            let handle = handle.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                handle.shutdown_and_wait();
                assert!(handle.is_done());
            })
        })
        .collect();

    for controller in controllers {
        controller.join().unwrap();
    }
    frame_thread.join().unwrap();

    let record = record.lock();
    assert_eq!(record.teardowns, 1);
    assert_eq!(record.drops, 1);
    assert_eq!(record.done_at_drop, Some(false));
    assert!(signal.is_done());
}
