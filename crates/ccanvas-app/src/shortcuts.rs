//! Keyboard shortcut registry and documentation.

use ccanvas_core::QUIT_KEY;

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: String,
    pub description: &'static str,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, description: &'static str) -> Self {
        Self {
            key: key.into(),
            description,
        }
    }
}

/// Registry of the key bindings for a session.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all shortcuts for a session with `line_count` lines.
    pub fn all(line_count: usize) -> Vec<Shortcut> {
        let select = if line_count > 1 {
            format!("1-{}", line_count)
        } else {
            "1".to_string()
        };
        vec![
            Shortcut::new(select, "Switch to line"),
            Shortcut::new("Click", "Add a point to the active line"),
            Shortcut::new("Escape", "Save and exit"),
            Shortcut::new(QUIT_KEY.to_ascii_uppercase().to_string(), "Save and exit"),
            Shortcut::new("Close window", "Save and exit"),
        ]
    }

    /// Log all shortcuts at info level.
    pub fn log_all(line_count: usize) {
        log::info!("Key bindings:");
        for shortcut in Self::all(line_count) {
            log::info!("  {:14} {}", shortcut.key, shortcut.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_range_follows_count() {
        assert_eq!(ShortcutRegistry::all(4)[0].key, "1-4");
        assert_eq!(ShortcutRegistry::all(1)[0].key, "1");
    }

    #[test]
    fn test_quit_bindings_listed() {
        let keys: Vec<_> = ShortcutRegistry::all(3).into_iter().map(|s| s.key).collect();
        assert!(keys.contains(&"Escape".to_string()));
        assert!(keys.contains(&"Q".to_string()));
    }
}
