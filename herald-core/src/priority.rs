//! Listener priorities.

use std::fmt;

/// Execution order for listeners registered under one topic.
///
/// Higher values run first. The scale spans [`Priority::LOWEST`] to
/// [`Priority::HIGHEST`]; out-of-range values are clamped at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(i32);

impl Priority {
    /// Runs after everything else.
    pub const LOWEST: Priority = Priority(0);
    /// Below the default.
    pub const LOW: Priority = Priority(25);
    /// The default priority.
    pub const NORMAL: Priority = Priority(50);
    /// Above the default.
    pub const HIGH: Priority = Priority(75);
    /// Runs before everything else.
    pub const HIGHEST: Priority = Priority(100);

    /// Creates a priority from a raw value, without clamping.
    pub const fn new(value: i32) -> Self {
        Priority(value)
    }

    /// The raw value.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Reports whether the value lies within `[LOWEST, HIGHEST]`.
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::LOWEST.0 && self.0 <= Self::HIGHEST.0
    }

    /// Clamps the value into `[LOWEST, HIGHEST]`.
    pub const fn clamped(self) -> Self {
        if self.0 < Self::LOWEST.0 {
            Self::LOWEST
        } else if self.0 > Self::HIGHEST.0 {
            Self::HIGHEST
        } else {
            self
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Priority(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::LOWEST => write!(f, "lowest"),
            Self::LOW => write!(f, "low"),
            Self::NORMAL => write!(f, "normal"),
            Self::HIGH => write!(f, "high"),
            Self::HIGHEST => write!(f, "highest"),
            Priority(v) => write!(f, "{v}"),
        }
    }
}
