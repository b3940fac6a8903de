//! Backend-independent input events delivered to a capture session.

use kurbo::Point;

/// A logical key, already decoded by the windowing backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A printable key, as the text it produces.
    Character(String),
    Escape,
    /// Any named key the session has no binding for.
    Other,
}

impl Key {
    /// Create a character key.
    pub fn character(c: char) -> Self {
        Key::Character(c.to_string())
    }

    /// The numeric value of a single-digit key, if this is one.
    pub fn digit(&self) -> Option<u32> {
        let Key::Character(text) = self else {
            return None;
        };
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_digit(10),
            _ => None,
        }
    }

    /// Whether this key is the given character, ignoring ASCII case.
    pub fn is_char(&self, expected: char) -> bool {
        match self {
            Key::Character(text) => {
                let mut chars = text.chars();
                matches!(
                    (chars.next(), chars.next()),
                    (Some(c), None) if c.eq_ignore_ascii_case(&expected)
                )
            }
            _ => false,
        }
    }
}

/// Event routed to a [`CanvasSession`](crate::CanvasSession).
///
/// Pointer positions are in domain coordinates; `None` means the pointer is
/// outside the data region (window chrome, margins, toolbars).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PointerDown { position: Option<Point> },
    PointerMove { position: Option<Point> },
    KeyPressed(Key),
    KeyReleased(Key),
    /// The window is being closed by the user or the platform.
    CloseRequested,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_keys() {
        assert_eq!(Key::character('1').digit(), Some(1));
        assert_eq!(Key::character('9').digit(), Some(9));
        assert_eq!(Key::character('0').digit(), Some(0));
        assert_eq!(Key::character('a').digit(), None);
        assert_eq!(Key::Character("12".to_string()).digit(), None);
        assert_eq!(Key::Character(String::new()).digit(), None);
        assert_eq!(Key::Escape.digit(), None);
    }

    #[test]
    fn test_is_char_ignores_case() {
        assert!(Key::character('q').is_char('q'));
        assert!(Key::character('Q').is_char('q'));
        assert!(!Key::character('w').is_char('q'));
        assert!(!Key::Escape.is_char('q'));
    }
}
