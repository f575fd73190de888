//! The two-step shutdown handshake between an outside controller and the frame loop.
//!
//! A controller calls [`ShutdownHandle::shutdown_and_wait`], which records the request,
//! wakes the event loop and blocks. The frame loop sees the request at its next tick,
//! tears everything down, and calls [`ShutdownSignal::acknowledge`], releasing every waiter.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Status {
    #[default]
    Running,
    Requested,
    Done,
}

/// Shared between the frame loop and every [`ShutdownHandle`].
#[derive(Debug, Default)]
pub struct ShutdownSignal {
    status: Mutex<Status>,
    done: Condvar,
}

impl ShutdownSignal {
    pub fn new() -> Arc<Self> {
        Arc::default()
    }

    /// Ask for a shutdown. Returns `true` only for the first request.
    pub fn request(&self) -> bool {
        let mut status = self.status.lock();
        if *status == Status::Running {
            *status = Status::Requested;
            true
        } else {
            false
        }
    }

    /// Has shutdown been requested (or already completed)?
    pub fn is_requested(&self) -> bool {
        *self.status.lock() != Status::Running
    }

    pub fn is_done(&self) -> bool {
        *self.status.lock() == Status::Done
    }

    /// Teardown has finished. Wakes up everyone in [`Self::wait`].
    pub fn acknowledge(&self) {
        *self.status.lock() = Status::Done;
        self.done.notify_all();
    }

    /// Block until [`Self::acknowledge`] has been called.
    pub fn wait(&self) {
        let mut status = self.status.lock();
        while *status != Status::Done {
            self.done.wait(&mut status);
        }
    }
}

/// The handle an outside controller (e.g. a Ctrl-C handler) uses to stop the demo.
#[derive(Clone)]
pub struct ShutdownHandle {
    signal: Arc<ShutdownSignal>,
    wake: Arc<dyn Fn() + Send + Sync>,
}

impl std::fmt::Debug for ShutdownHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownHandle")
            .field("signal", &self.signal)
            .finish_non_exhaustive()
    }
}

impl ShutdownHandle {
    /// `wake` should make the frame loop run its next tick soon, e.g. by sending it an event.
    pub fn new(signal: Arc<ShutdownSignal>, wake: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            signal,
            wake: Arc::new(wake),
        }
    }

    /// Request shutdown and block until the window and GUI context have been torn down.
    ///
    /// Safe to call any number of times, from any thread.
    /// Returns immediately if teardown already happened.
    pub fn shutdown_and_wait(&self) {
        if self.signal.request() {
            log::debug!("Shutdown requested");
            (self.wake)();
        }
        self.signal.wait();
    }

    pub fn is_done(&self) -> bool {
        self.signal.is_done()
    }
}
