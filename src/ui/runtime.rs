use std::io;
use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use ratatui::layout::Rect;
use tokio::runtime::Handle;

use crate::capture::CaptureBuffer;
use crate::config::Settings;
use crate::pipeline::PipelineController;
use crate::ui::app::{App, SessionEnd};
use crate::ui::events::{AppEvent, EventHandler, RefreshTrigger};
use crate::ui::layout::body_rect;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Upper bound on how long the loop sleeps without any event.
const IDLE_TIMEOUT: Duration = Duration::from_millis(250);

/// Result of an interactive session; the terminal is already restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub end: SessionEnd,
    pub command: String,
}

/// Run the interactive loop over data captured from stdin.
pub fn run(settings: &Settings, shell: PathBuf, runtime: Handle) -> io::Result<SessionOutcome> {
    let (mut terminal, guard) = setup_terminal()?;
    let events = EventHandler::new();
    let refresh = RefreshTrigger::new(events.sender());

    let root = CaptureBuffer::new(settings.capacity).start_capturing(io::stdin(), refresh.on_data());
    let controller =
        PipelineController::new(settings.mode, shell, root, runtime, refresh.on_data());
    let mut app = App::new(controller);
    if let Ok(size) = terminal.size() {
        let body = body_rect(Rect::new(0, 0, size.width, size.height));
        app.on_resize(body.height);
    }
    tracing::info!(mode = ?settings.mode, capacity = settings.capacity, "session started");

    while app.end().is_none() {
        if app.sync_pipeline() {
            tracing::debug!(command = %app.command(), "pipeline restarted");
        }
        refresh.acknowledge();
        terminal.draw(|frame| draw(frame, &app))?;

        let mut event = match events.next(IDLE_TIMEOUT) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                app.request_end(SessionEnd::Terminated);
                None
            }
        };
        // Apply every queued event before the next redraw.
        while let Some(current) = event {
            handle_event(&mut app, current);
            if app.end().is_some() {
                break;
            }
            event = events.try_next();
        }
    }

    app.shutdown();
    drop(events);
    guard.restore();
    drop(terminal);

    let outcome = SessionOutcome {
        end: app.end().unwrap_or(SessionEnd::Terminated),
        command: app.command(),
    };
    tracing::info!(end = ?outcome.end, command = %outcome.command, "session finished");
    Ok(outcome)
}

fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => app.handle_key(key),
        AppEvent::Resize(cols, rows) => {
            let body = body_rect(Rect::new(0, 0, cols, rows));
            app.on_resize(body.height);
        }
        AppEvent::Refresh => {}
        AppEvent::Shutdown => app.request_end(SessionEnd::Terminated),
    }
}
