//! Byte-level key decoding.
//!
//! Keys arrive one byte per poll. [`EXTENDED_KEY_PREFIX`] is latched instead
//! of dispatched, and the next byte is read in the context of that latch.

use crate::types::{
    Key, BYTE_BACKSPACE, BYTE_CTRL_C, BYTE_DELETE, BYTE_ENTER, BYTE_ESCAPE, BYTE_LINE_FEED,
    BYTE_TAB, EXTENDED_KEY_PREFIX, KEY_DELETE, KEY_DOWN, KEY_END, KEY_HOME, KEY_INSERT, KEY_LEFT,
    KEY_PAGE_DOWN, KEY_PAGE_UP, KEY_RIGHT, KEY_UP,
};

/// What to do with a key whose raw bytes equal the previous key's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatPolicy {
    /// Mark it as a repeat so callers can skip redundant display updates.
    #[default]
    Suppress,
    /// Treat every key as new.
    Allow,
}

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    /// Raw bytes of this key, e.g. `[0xE0, 0x48]` or `[b'q', 0]`.
    pub raw: [u8; 2],
    /// Same raw bytes as the previous key and the policy suppresses repeats.
    pub repeat: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Latch {
    None,
    Extended,
}

/// Two-stage extended key state machine.
#[derive(Debug, Clone)]
pub struct KeyDecoder {
    latch: Latch,
    last_raw: Option<[u8; 2]>,
    policy: RepeatPolicy,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::with_policy(RepeatPolicy::default())
    }

    pub fn with_policy(policy: RepeatPolicy) -> Self {
        Self {
            latch: Latch::None,
            last_raw: None,
            policy,
        }
    }

    pub fn policy(&self) -> RepeatPolicy {
        self.policy
    }

    /// True while the extended prefix is latched.
    pub fn is_latched(&self) -> bool {
        self.latch == Latch::Extended
    }

    /// Feed one polled byte. Returns `None` while a prefix is latched.
    pub fn feed(&mut self, byte: u8) -> Option<KeyPress> {
        let (key, raw) = match self.latch {
            Latch::None => {
                if byte == EXTENDED_KEY_PREFIX {
                    self.latch = Latch::Extended;
                    return None;
                }
                (map_direct(byte), [byte, 0])
            }
            Latch::Extended => {
                self.latch = Latch::None;
                (map_extended(byte), [EXTENDED_KEY_PREFIX, byte])
            }
        };

        let repeat = self.policy == RepeatPolicy::Suppress && self.last_raw == Some(raw);
        self.last_raw = Some(raw);
        Some(KeyPress { key, raw, repeat })
    }

    /// Drop any latched prefix and repeat history.
    pub fn reset(&mut self) {
        self.latch = Latch::None;
        self.last_raw = None;
    }
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a byte received with no modifier latched.
pub fn map_direct(byte: u8) -> Key {
    match byte {
        BYTE_ENTER | BYTE_LINE_FEED => Key::Enter,
        BYTE_TAB => Key::Tab,
        BYTE_BACKSPACE => Key::Backspace,
        BYTE_ESCAPE => Key::Escape,
        BYTE_DELETE => Key::Delete,
        BYTE_CTRL_C => Key::CtrlC,
        0x20..=0x7E => Key::Char(byte as char),
        _ => Key::Unmapped(byte),
    }
}

/// Map the byte that follows the extended prefix.
pub fn map_extended(byte: u8) -> Key {
    match byte {
        KEY_UP => Key::Up,
        KEY_DOWN => Key::Down,
        KEY_LEFT => Key::Left,
        KEY_RIGHT => Key::Right,
        KEY_HOME => Key::Home,
        KEY_END => Key::End,
        KEY_INSERT => Key::Insert,
        KEY_DELETE => Key::Delete,
        KEY_PAGE_UP => Key::PageUp,
        KEY_PAGE_DOWN => Key::PageDown,
        _ => Key::UnmappedExtended(byte),
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: Key) -> bool {
    matches!(
        key,
        Key::Char('q') | Key::Char('Q') | Key::Escape | Key::CtrlC
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_latched_not_dispatched() {
        let mut dec = KeyDecoder::new();
        assert_eq!(dec.feed(EXTENDED_KEY_PREFIX), None);
        assert!(dec.is_latched());

        let press = dec.feed(KEY_UP).unwrap();
        assert_eq!(press.key, Key::Up);
        assert_eq!(press.raw, [EXTENDED_KEY_PREFIX, KEY_UP]);
        assert!(!dec.is_latched());
    }

    #[test]
    fn follow_byte_without_prefix_is_a_plain_char() {
        let mut dec = KeyDecoder::new();
        // 0x48 is 'H' when nothing is latched.
        assert_eq!(dec.feed(KEY_UP).unwrap().key, Key::Char('H'));
    }

    #[test]
    fn extended_keys_map() {
        assert_eq!(map_extended(KEY_DOWN), Key::Down);
        assert_eq!(map_extended(KEY_LEFT), Key::Left);
        assert_eq!(map_extended(KEY_RIGHT), Key::Right);
        assert_eq!(map_extended(KEY_HOME), Key::Home);
        assert_eq!(map_extended(KEY_END), Key::End);
        assert_eq!(map_extended(KEY_INSERT), Key::Insert);
        assert_eq!(map_extended(KEY_DELETE), Key::Delete);
        assert_eq!(map_extended(KEY_PAGE_UP), Key::PageUp);
        assert_eq!(map_extended(KEY_PAGE_DOWN), Key::PageDown);
        assert_eq!(map_extended(0x01), Key::UnmappedExtended(0x01));
    }

    #[test]
    fn direct_keys_map() {
        assert_eq!(map_direct(BYTE_ENTER), Key::Enter);
        assert_eq!(map_direct(BYTE_LINE_FEED), Key::Enter);
        assert_eq!(map_direct(BYTE_TAB), Key::Tab);
        assert_eq!(map_direct(BYTE_DELETE), Key::Delete);
        assert_eq!(map_direct(b'x'), Key::Char('x'));
        assert_eq!(map_direct(0x01), Key::Unmapped(0x01));
        assert_eq!(map_direct(0xFF), Key::Unmapped(0xFF));
    }

    #[test]
    fn identical_consecutive_keys_are_flagged_as_repeats() {
        let mut dec = KeyDecoder::new();
        assert!(!dec.feed(b'a').unwrap().repeat);
        assert!(dec.feed(b'a').unwrap().repeat);
        assert!(!dec.feed(b'b').unwrap().repeat);

        dec.feed(EXTENDED_KEY_PREFIX);
        assert!(!dec.feed(KEY_LEFT).unwrap().repeat);
        dec.feed(EXTENDED_KEY_PREFIX);
        assert!(dec.feed(KEY_LEFT).unwrap().repeat);
    }

    #[test]
    fn allow_policy_never_flags_repeats() {
        let mut dec = KeyDecoder::with_policy(RepeatPolicy::Allow);
        assert!(!dec.feed(b'a').unwrap().repeat);
        assert!(!dec.feed(b'a').unwrap().repeat);
    }

    #[test]
    fn prefix_then_same_byte_is_not_a_repeat_of_the_plain_byte() {
        let mut dec = KeyDecoder::new();
        dec.feed(b'K');
        dec.feed(EXTENDED_KEY_PREFIX);
        let press = dec.feed(b'K').unwrap();
        assert_eq!(press.key, Key::Left);
        assert!(!press.repeat);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(Key::Char('q')));
        assert!(should_quit(Key::Char('Q')));
        assert!(should_quit(Key::Escape));
        assert!(should_quit(Key::CtrlC));
        assert!(!should_quit(Key::Char('x')));
        assert!(!should_quit(Key::Up));
    }
}
