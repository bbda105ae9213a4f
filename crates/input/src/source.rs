//! The input capability and a scripted implementation.

use std::collections::VecDeque;

use anyhow::{bail, Result};

/// Keyboard input capability.
///
/// Polling is byte oriented; special keys arrive as the two-byte extended
/// sequence described in [`crate::types`].
pub trait InputSource {
    fn initialize(&mut self) -> Result<()>;
    fn shutdown(&mut self) -> Result<()>;

    /// Non-blocking poll: `None` when no byte is pending.
    fn try_poll(&mut self) -> Option<u8>;

    /// Wait for the next byte.
    fn blocking_read(&mut self) -> Option<u8>;
}

/// Input fed from a script of polls.
///
/// Each entry answers one `try_poll`: `Some(byte)` or `None` for an empty
/// poll. Once the script is exhausted every poll returns `None`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<Option<u8>>,
    initialized: bool,
    fail_initialize: bool,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes to be returned by consecutive polls.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut input = Self::new();
        input.push_bytes(bytes);
        input
    }

    /// An input whose `initialize` fails.
    pub fn failing() -> Self {
        Self {
            fail_initialize: true,
            ..Self::default()
        }
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.script.extend(bytes.iter().copied().map(Some));
    }

    /// Queue one empty poll.
    pub fn push_idle(&mut self) {
        self.script.push_back(None);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl InputSource for ScriptedInput {
    fn initialize(&mut self) -> Result<()> {
        if self.fail_initialize {
            bail!("scripted input configured to fail initialization");
        }
        self.initialized = true;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.initialized = false;
        Ok(())
    }

    fn try_poll(&mut self) -> Option<u8> {
        self.script.pop_front().flatten()
    }

    fn blocking_read(&mut self) -> Option<u8> {
        while let Some(entry) = self.script.pop_front() {
            if entry.is_some() {
                return entry;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polls_follow_the_script() {
        let mut input = ScriptedInput::from_bytes(b"ab");
        input.push_idle();
        input.push_bytes(b"c");

        assert_eq!(input.try_poll(), Some(b'a'));
        assert_eq!(input.try_poll(), Some(b'b'));
        assert_eq!(input.try_poll(), None);
        assert_eq!(input.try_poll(), Some(b'c'));
        assert_eq!(input.try_poll(), None);
    }

    #[test]
    fn blocking_read_skips_idle_polls() {
        let mut input = ScriptedInput::new();
        input.push_idle();
        input.push_idle();
        input.push_bytes(b"z");
        assert_eq!(input.blocking_read(), Some(b'z'));
        assert_eq!(input.blocking_read(), None);
    }

    #[test]
    fn failing_input_reports_error() {
        let mut input = ScriptedInput::failing();
        assert!(input.initialize().is_err());
        assert!(!input.is_initialized());
    }
}
