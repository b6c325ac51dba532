//! Core types for spark-stopwatch.
//!
//! These types are shared by the template engine, the timer and the widget.
//! They are deliberately small and `Copy` where possible.

use std::fmt;

// =============================================================================
// Timer Status
// =============================================================================

/// Whether the stopwatch is accumulating time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum TimerStatus {
    /// Stopped. Elapsed time is frozen.
    #[default]
    Idle,
    /// Ticking. Elapsed time grows with every sample.
    Running,
}

impl TimerStatus {
    /// The status a start/stop toggle moves to.
    pub fn toggled(self) -> Self {
        match self {
            Self::Idle => Self::Running,
            Self::Running => Self::Idle,
        }
    }

    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Running => f.write_str("running"),
        }
    }
}

// =============================================================================
// Binding Id
// =============================================================================

/// Opaque identifier correlating a compiled element with its handler entries.
///
/// Rendered into markup as a decimal attribute value and parsed back at
/// dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub u64);

impl BindingId {
    /// Parse the rendered attribute value back into an id.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse().ok().map(Self)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Modifiers (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Modifier keys held while an event was produced.
    ///
    /// Combine with bitwise OR: `Modifiers::CTRL | Modifiers::SHIFT`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggle() {
        assert_eq!(TimerStatus::Idle.toggled(), TimerStatus::Running);
        assert_eq!(TimerStatus::Running.toggled(), TimerStatus::Idle);
        assert_eq!(TimerStatus::default(), TimerStatus::Idle);
    }

    #[test]
    fn test_binding_id_parse() {
        assert_eq!(BindingId::parse("42"), Some(BindingId(42)));
        assert_eq!(BindingId::parse(" 7 "), Some(BindingId(7)));
        assert_eq!(BindingId::parse("abc"), None);
        assert_eq!(BindingId::parse(""), None);
        assert_eq!(BindingId(3).to_string(), "3");
    }

    #[test]
    fn test_modifiers_combine() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!mods.contains(Modifiers::ALT));
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
