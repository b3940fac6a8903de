//! Multi-line capture session.
//!
//! A session owns one [`LineCapture`] per line and routes input to exactly
//! one of them, the active line. Escape, the quit key and window close end
//! the session and save the document once.

use crate::capture::{CaptureOutcome, LineCapture};
use crate::config::{CanvasConfig, ConfigError, Domain, MAX_LINES};
use crate::input::{Key, SessionEvent};
use crate::line::{Line, LineId};
use crate::storage::{FileStorage, PersistedDocument, Storage, StorageResult};

/// Key that saves and exits, matched case-insensitively.
pub const QUIT_KEY: char = 'q';

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Line at this 0-based index receives pointer-downs.
    Active(usize),
    /// Terminal. No further events are processed.
    Closed,
}

/// What the caller should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Ignored,
    Redraw,
    /// The session closed; tear down the window.
    Closed,
}

/// Routes events to the active line and saves on close.
#[derive(Debug)]
pub struct CanvasSession<S: Storage = FileStorage> {
    domain: Domain,
    captures: Vec<LineCapture>,
    state: SessionState,
    saved: bool,
    storage: S,
}

impl CanvasSession<FileStorage> {
    /// Session for a validated configuration, saving to its output path.
    pub fn new(config: &CanvasConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_storage(
            config.domain,
            config.line_count,
            FileStorage::new(config.output.clone()),
        )
    }
}

impl<S: Storage> CanvasSession<S> {
    /// Session with `line_count` empty lines; line 1 starts active.
    pub fn with_storage(domain: Domain, line_count: usize, storage: S) -> Result<Self, ConfigError> {
        if !(1..=MAX_LINES).contains(&line_count) {
            return Err(ConfigError::InvalidLineCount(line_count));
        }

        let mut captures: Vec<_> = (0..line_count)
            .map(|i| LineCapture::new(LineId::from_index(i), domain))
            .collect();
        captures[0].connect();

        log::info!(
            "Capturing {} line(s) on a {} x {} canvas",
            line_count,
            domain.width(),
            domain.height()
        );

        Ok(Self {
            domain,
            captures,
            state: SessionState::Active(0),
            saved: false,
            storage,
        })
    }

    /// Seed lines from a loaded document. Lines absent from the document stay
    /// empty; keys beyond the line count are ignored.
    pub fn seed(&mut self, document: &PersistedDocument) {
        for key in document.keys() {
            let in_range = key
                .strip_prefix("line_")
                .and_then(|n| n.parse::<usize>().ok())
                .is_some_and(|n| (1..=self.captures.len()).contains(&n));
            if !in_range {
                log::warn!(
                    "Ignoring {} (session has {} line(s))",
                    key,
                    self.captures.len()
                );
            }
        }

        for capture in &mut self.captures {
            let Some(record) = document.get(capture.id()) else {
                continue;
            };
            match record.to_line() {
                Some(line) => capture.set_points(line.points().to_vec()),
                None => log::warn!("Skipping line {}: x and y lengths differ", capture.id()),
            }
        }
    }

    /// Process one event.
    ///
    /// Errors only when closing and the document cannot be saved; the
    /// session is closed regardless.
    pub fn handle_event(&mut self, event: SessionEvent) -> StorageResult<Response> {
        let SessionState::Active(active) = self.state else {
            return Ok(Response::Ignored);
        };

        match event {
            SessionEvent::PointerDown { position } => {
                match self.captures[active].handle_pointer_down(position) {
                    CaptureOutcome::Appended => Ok(Response::Redraw),
                    _ => Ok(Response::Ignored),
                }
            }
            SessionEvent::KeyPressed(key) => self.handle_key(&key),
            SessionEvent::CloseRequested => {
                self.close()?;
                Ok(Response::Closed)
            }
            SessionEvent::PointerMove { .. } | SessionEvent::KeyReleased(_) => Ok(Response::Ignored),
        }
    }

    fn handle_key(&mut self, key: &Key) -> StorageResult<Response> {
        if *key == Key::Escape || key.is_char(QUIT_KEY) {
            self.close()?;
            return Ok(Response::Closed);
        }
        match key.digit() {
            Some(digit) if self.select_line(digit as usize) => Ok(Response::Redraw),
            _ => Ok(Response::Ignored),
        }
    }

    /// Make the 1-based line `number` active. Returns false and changes
    /// nothing when the number is out of range or the session is closed.
    pub fn select_line(&mut self, number: usize) -> bool {
        let SessionState::Active(current) = self.state else {
            return false;
        };
        if !(1..=self.captures.len()).contains(&number) {
            log::debug!("No line {} to select", number);
            return false;
        }

        let next = number - 1;
        self.captures[current].disconnect();
        self.captures[next].connect();
        self.state = SessionState::Active(next);
        log::info!("Switched to line {}", number);
        true
    }

    /// Close the session, saving the document if it has not been saved yet.
    ///
    /// The session is closed even when the save fails; `is_saved` then stays false.
    pub fn close(&mut self) -> StorageResult<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        self.state = SessionState::Closed;
        for capture in &mut self.captures {
            capture.disconnect();
        }

        self.save()
    }

    /// Write the document unless it has already been written. A failed
    /// write leaves the lines and the saved flag untouched.
    pub fn save(&mut self) -> StorageResult<()> {
        if self.saved {
            return Ok(());
        }
        self.storage.save(&self.document())?;
        self.saved = true;
        Ok(())
    }

    /// Current lines as a persistable document.
    pub fn document(&self) -> PersistedDocument {
        PersistedDocument::from_lines(self.lines())
    }

    /// Status line for the active line.
    pub fn prompt(&self) -> String {
        match self.state {
            SessionState::Active(i) => format!("Click to add points for line number {}...", i + 1),
            SessionState::Closed => "Session closed".to_string(),
        }
    }

    /// Key binding help shown alongside the prompt.
    pub fn instructions(&self) -> String {
        format!(
            "Press keys 1 to {} to switch lines\nClose the window, press ESC or Q to save and exit",
            self.captures.len()
        )
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn line_count(&self) -> usize {
        self.captures.len()
    }

    pub fn captures(&self) -> &[LineCapture] {
        &self.captures
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.captures.iter().map(LineCapture::line)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 0-based index of the active line, `None` once closed.
    pub fn active_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Active(i) => Some(i),
            SessionState::Closed => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
