use crossterm::event::KeyEvent;

use crate::capture::CaptureBuffer;
use crate::mvi::Reducer;
use crate::pipeline::PipelineController;
use crate::ui::editor::{EditorIntent, EditorReducer, EditorState};
use crate::ui::input::{classify_key, InputAction, ScrollAction};
use crate::ui::view::{ViewIntent, ViewReducer, ViewState};

/// Key reference shown on the bottom row until the first handled key.
pub const HINT: &str = concat!(
    "Enter runs  ^X exit (^C nosave)  PgUp/PgDn/Up/Dn/^</^> scroll  ^S pause (^Q end)  ",
    "[Ultimate Plumber v",
    env!("CARGO_PKG_VERSION"),
    "]"
);

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// How the interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Ctrl-C / Ctrl-D.
    Quit,
    /// Ctrl-X.
    SaveScript,
    /// SIGTERM, SIGHUP or a lost terminal.
    Terminated,
}

pub struct App {
    controller: PipelineController,
    /// Command line editor state (MVI pattern).
    editor: EditorState,
    /// Output view scroll state (MVI pattern).
    view: ViewState,
    message: Option<&'static str>,
    body_height: u16,
    end: Option<SessionEnd>,
}

impl App {
    pub fn new(controller: PipelineController) -> Self {
        Self {
            controller,
            editor: EditorState::default(),
            view: ViewState::default(),
            message: Some(HINT),
            body_height: 1,
            end: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match classify_key(key) {
            InputAction::None => {}
            InputAction::Edit(intent) => {
                self.on_edit(intent);
                self.message = None;
            }
            InputAction::Scroll(action) => {
                self.on_scroll(action);
                self.message = None;
            }
            InputAction::Execute => self.controller.request_restart(),
            InputAction::PauseInput => {
                self.controller.pause_input();
            }
            InputAction::ResumeInput => {
                self.controller.resume_input();
            }
            InputAction::Quit => self.request_end(SessionEnd::Quit),
            InputAction::SaveAndQuit => self.request_end(SessionEnd::SaveScript),
        }
    }

    pub fn on_edit(&mut self, intent: EditorIntent) {
        dispatch_mvi!(self, editor, EditorReducer, intent);
    }

    pub fn on_scroll(&mut self, action: ScrollAction) {
        let page = isize::try_from(self.body_height.max(1)).unwrap_or(isize::MAX);
        let line_count = self.controller.displayed().line_count();
        let intent = match action {
            ScrollAction::LineUp => ViewIntent::ScrollBy {
                delta: -1,
                line_count,
            },
            ScrollAction::LineDown => ViewIntent::ScrollBy {
                delta: 1,
                line_count,
            },
            ScrollAction::PageUp => ViewIntent::ScrollBy {
                delta: -page,
                line_count,
            },
            ScrollAction::PageDown => ViewIntent::ScrollBy {
                delta: page,
                line_count,
            },
            ScrollAction::ShiftLeft => ViewIntent::ShiftLeft,
            ScrollAction::ShiftRight => ViewIntent::ShiftRight,
            ScrollAction::ResetX => ViewIntent::ResetX,
        };
        dispatch_mvi!(self, view, ViewReducer, intent);
    }

    pub fn on_resize(&mut self, body_height: u16) {
        self.body_height = body_height.max(1);
    }

    /// Run the pipeline stage if the command line requires it.
    pub fn sync_pipeline(&mut self) -> bool {
        let command = self.command();
        self.controller.evaluate(&command)
    }

    pub fn request_end(&mut self, end: SessionEnd) {
        if self.end.is_none() {
            self.end = Some(end);
        }
    }

    pub fn end(&self) -> Option<SessionEnd> {
        self.end
    }

    /// Kill the running stage; called once the loop has exited.
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }

    pub fn command(&self) -> String {
        self.editor.text()
    }

    /// True while the command line has edits that were not executed yet.
    pub fn is_pending(&self) -> bool {
        self.controller.is_pending(&self.command())
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn displayed(&self) -> &CaptureBuffer {
        self.controller.displayed()
    }

    pub fn root(&self) -> &CaptureBuffer {
        self.controller.root()
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }
}
