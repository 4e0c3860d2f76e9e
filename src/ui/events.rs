use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use signal_hook::consts::{SIGHUP, SIGTERM};

use crate::capture::OnData;

/// Poll interval of the event thread; bounds shutdown and signal latency.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// A capture buffer committed new bytes or completed.
    Refresh,
    /// OS signal received (SIGTERM, SIGHUP)
    Shutdown,
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: Sender<AppEvent>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let thread = thread::Builder::new()
            .name("events".to_string())
            .spawn(move || event_loop(event_tx, thread_stop))
            .map_err(|err| tracing::error!(error = %err, "failed to spawn event thread"))
            .ok();

        Self {
            rx,
            tx,
            stop,
            thread,
        }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Drain an event without blocking.
    pub fn try_next(&self) -> Option<AppEvent> {
        self.rx.try_recv().ok()
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn event_loop(tx: Sender<AppEvent>, stop: Arc<AtomicBool>) {
    let terminate = Arc::new(AtomicBool::new(false));
    for signal in [SIGTERM, SIGHUP] {
        if let Err(err) = signal_hook::flag::register(signal, Arc::clone(&terminate)) {
            tracing::warn!(signal, error = %err, "failed to register signal handler");
        }
    }

    while !stop.load(Ordering::Relaxed) {
        if terminate.swap(false, Ordering::Relaxed) {
            tracing::info!("termination signal received");
            let _ = tx.send(AppEvent::Shutdown);
        }

        match event::poll(POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(err) => {
                tracing::error!(error = %err, "terminal event poll failed");
                let _ = tx.send(AppEvent::Shutdown);
                break;
            }
        }
        let sent = match event::read() {
            Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
            Ok(Event::Resize(cols, rows)) => tx.send(AppEvent::Resize(cols, rows)),
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::error!(error = %err, "terminal event read failed");
                let _ = tx.send(AppEvent::Shutdown);
                break;
            }
        };
        if sent.is_err() {
            break;
        }
    }
}

/// Coalescing wake-up from capture threads to the UI loop.
///
/// At most one [`AppEvent::Refresh`] is in flight: `on_data` posts only when
/// nothing is pending, and the UI calls `acknowledge` before redrawing.
#[derive(Clone)]
pub struct RefreshTrigger {
    pending: Arc<AtomicBool>,
    tx: Sender<AppEvent>,
}

impl RefreshTrigger {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self {
            pending: Arc::new(AtomicBool::new(false)),
            tx,
        }
    }

    pub fn trigger(&self) {
        if !self.pending.swap(true, Ordering::AcqRel) {
            // Receiver gone means the UI is shutting down.
            let _ = self.tx.send(AppEvent::Refresh);
        }
    }

    /// Clear the pending flag; the next `trigger` posts again.
    pub fn acknowledge(&self) {
        self.pending.store(false, Ordering::Release);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Callback for capture buffers.
    pub fn on_data(&self) -> OnData {
        let trigger = self.clone();
        Arc::new(move || trigger.trigger())
    }
}
