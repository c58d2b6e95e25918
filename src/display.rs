/// Layout mode derived from the window width
///
/// Compact layouts hide the header behind a menu button and skip the
/// category fade.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Desktop,
    Compact,
}

impl DisplayMode {
    /// Classify a window width against the compact breakpoint
    pub fn from_width(width: f32, compact_breakpoint: f32) -> Self {
        if width < compact_breakpoint {
            DisplayMode::Compact
        } else {
            DisplayMode::Desktop
        }
    }

    pub fn is_compact(self) -> bool {
        self == DisplayMode::Compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_exclusive() {
        assert_eq!(DisplayMode::from_width(899.0, 900.0), DisplayMode::Compact);
        assert_eq!(DisplayMode::from_width(900.0, 900.0), DisplayMode::Desktop);
        assert!(DisplayMode::from_width(320.0, 900.0).is_compact());
    }
}
