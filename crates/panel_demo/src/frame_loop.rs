use std::{sync::Arc, time::Instant};

use crate::{shutdown::ShutdownSignal, state::State, ticker::Ticker};

/// What the frame loop drives once per tick.
///
/// Implemented by the real window and by test doubles.
pub trait FrameSurface {
    /// Feed all input that arrived since the last tick into the GUI.
    fn poll_events(&mut self);

    /// Has the user asked to close the window?
    fn close_requested(&self) -> bool;

    /// Build the UI for one frame and render it.
    fn run_frame(&mut self, state: &mut State);

    /// Release the GPU resources that must go while the context is still current.
    ///
    /// Called at most once, right before the surface is dropped.
    fn teardown(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,

    /// Teardown in progress.
    ShuttingDown,

    /// Teardown is complete; nothing more will happen.
    Terminated,
}

/// Single owner of [`State`]. Decides, tick by tick, whether to render or to shut down.
pub struct FrameLoop {
    phase: Phase,
    state: State,
    ticker: Ticker,
    signal: Arc<ShutdownSignal>,
    frame_nr: u64,
}

impl FrameLoop {
    pub fn new(state: State, ticker: Ticker, signal: Arc<ShutdownSignal>) -> Self {
        Self {
            phase: Phase::Running,
            state,
            ticker,
            signal,
            frame_nr: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// How many frames have been run.
    #[inline]
    pub fn frame_nr(&self) -> u64 {
        self.frame_nr
    }

    /// When to wake up for the next tick, if ever.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Running => self.ticker.deadline(),
            Phase::ShuttingDown | Phase::Terminated => None,
        }
    }

    /// Run a tick if one is due at `now`.
    pub fn on_tick<S: FrameSurface>(&mut self, now: Instant, surface: &mut Option<S>) -> Phase {
        if self.phase == Phase::Running && self.ticker.poll(now) {
            self.step(surface)
        } else {
            self.phase
        }
    }

    /// The work of one tick: check for shutdown, poll input, check for close, run a frame.
    ///
    /// Without a surface there is nothing to draw on, so only a shutdown request is acted on.
    pub fn step<S: FrameSurface>(&mut self, surface: &mut Option<S>) -> Phase {
        if self.phase != Phase::Running {
            return self.phase;
        }

        if self.signal.is_requested() {
            return self.shut_down(surface);
        }

        let Some(active) = surface.as_mut() else {
            return self.phase;
        };

        active.poll_events();

        if active.close_requested() {
            log::debug!("Window close requested");
            return self.shut_down(surface);
        }

        active.run_frame(&mut self.state);
        self.frame_nr += 1;
        self.phase
    }

    /// Tear down and drop the surface, then release everyone waiting for shutdown. Idempotent.
    ///
    /// Waiters are only woken once the surface (and with it the window and its context) is gone.
    pub fn shut_down<S: FrameSurface>(&mut self, surface: &mut Option<S>) -> Phase {
        if self.phase != Phase::Running {
            return self.phase;
        }

        log::debug!("Shutting down after {} frame(s)", self.frame_nr);
        self.phase = Phase::ShuttingDown;
        self.ticker.stop();
        if let Some(mut surface) = surface.take() {
            surface.teardown();
            drop(surface);
        }
        self.finish();
        self.phase
    }

    /// There is nothing to tear down (e.g. initialization never finished), but we are done.
    pub fn abandon(&mut self) {
        if self.phase != Phase::Terminated {
            self.ticker.stop();
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Terminated;
        self.signal.acknowledge();
        log::info!("Shutdown complete");
    }
}
