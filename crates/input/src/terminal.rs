//! TerminalInput: crossterm-backed [`InputSource`].
//!
//! crossterm reports structured key events; they are re-encoded into the
//! byte protocol the engine consumes (special keys become the extended
//! prefix followed by a follow byte) and handed out one byte per poll.

use std::time::Duration;

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::warn;

use crate::source::InputSource;
use crate::types::{
    BYTE_BACKSPACE, BYTE_CTRL_C, BYTE_ENTER, BYTE_ESCAPE, BYTE_TAB, EXTENDED_KEY_PREFIX,
    KEY_DELETE, KEY_DOWN, KEY_END, KEY_HOME, KEY_INSERT, KEY_LEFT, KEY_PAGE_DOWN, KEY_PAGE_UP,
    KEY_RIGHT, KEY_UP,
};

/// Bytes for one key event: at most a prefix pair.
pub type KeyBytes = ArrayVec<u8, 2>;

pub struct TerminalInput {
    pending: ArrayVec<u8, 8>,
    raw_mode: bool,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            pending: ArrayVec::new(),
            raw_mode: false,
        }
    }

    fn queue_event(&mut self, ev: Event) {
        if let Event::Key(key) = ev {
            for b in encode_key(key) {
                if self.pending.try_push(b).is_err() {
                    warn!(byte = b, "input queue full, dropping byte");
                }
            }
        }
    }

    fn pop(&mut self) -> Option<u8> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalInput {
    fn initialize(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.raw_mode = true;
        self.pending.clear();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.raw_mode {
            terminal::disable_raw_mode()?;
            self.raw_mode = false;
        }
        Ok(())
    }

    fn try_poll(&mut self) -> Option<u8> {
        while self.pending.is_empty() {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(ev) => self.queue_event(ev),
                    Err(e) => {
                        warn!(error = %e, "failed to read terminal event");
                        return None;
                    }
                },
                Ok(false) => return None,
                Err(e) => {
                    warn!(error = %e, "failed to poll terminal events");
                    return None;
                }
            }
        }
        self.pop()
    }

    fn blocking_read(&mut self) -> Option<u8> {
        while self.pending.is_empty() {
            match event::read() {
                Ok(ev) => self.queue_event(ev),
                Err(e) => {
                    warn!(error = %e, "failed to read terminal event");
                    return None;
                }
            }
        }
        self.pop()
    }
}

/// Encode a crossterm key event into protocol bytes.
///
/// Release events and keys with no byte form encode to nothing. The
/// protocol is single-byte ASCII, so non-ASCII characters are dropped:
/// their UTF-8 lead byte could equal the extended prefix.
pub fn encode_key(key: KeyEvent) -> KeyBytes {
    let mut out = KeyBytes::new();
    if key.kind == KeyEventKind::Release {
        return out;
    }

    let extended = |follow: u8| -> KeyBytes {
        let mut v = KeyBytes::new();
        v.push(EXTENDED_KEY_PREFIX);
        v.push(follow);
        v
    };

    match key.code {
        KeyCode::Up => return extended(KEY_UP),
        KeyCode::Down => return extended(KEY_DOWN),
        KeyCode::Left => return extended(KEY_LEFT),
        KeyCode::Right => return extended(KEY_RIGHT),
        KeyCode::Home => return extended(KEY_HOME),
        KeyCode::End => return extended(KEY_END),
        KeyCode::Insert => return extended(KEY_INSERT),
        KeyCode::Delete => return extended(KEY_DELETE),
        KeyCode::PageUp => return extended(KEY_PAGE_UP),
        KeyCode::PageDown => return extended(KEY_PAGE_DOWN),
        KeyCode::Enter => out.push(BYTE_ENTER),
        KeyCode::Tab => out.push(BYTE_TAB),
        KeyCode::Backspace => out.push(BYTE_BACKSPACE),
        KeyCode::Esc => out.push(BYTE_ESCAPE),
        KeyCode::Char('c') | KeyCode::Char('C')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            out.push(BYTE_CTRL_C)
        }
        KeyCode::Char(ch) if ch.is_ascii() => out.push(ch as u8),
        _ => {}
    }
    out
}
