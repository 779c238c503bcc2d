//! Shared game data: directions, cells, difficulty modes and their speed curves.

use serde::{Deserialize, Serialize};

/// Movement direction. `None` is the resting state before the first key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Returns the opposite direction. `None` is its own opposite.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }

    /// Returns the (dx, dy) delta for this direction, in cells.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::None => (0, 0),
        }
    }
}

/// A cell on the grid, in column/row units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Difficulty modes selectable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyMode {
    Relaxed,
    Balanced,
    Extreme,
}

impl DifficultyMode {
    pub const ALL: [DifficultyMode; 3] = [
        DifficultyMode::Relaxed,
        DifficultyMode::Balanced,
        DifficultyMode::Extreme,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(DifficultyMode::Balanced)
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Relaxed => 0,
            Self::Balanced => 1,
            Self::Extreme => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Relaxed => "Relaxed",
            Self::Balanced => "Balanced",
            Self::Extreme => "Extreme",
        }
    }

    /// Parse a mode from its display name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Speed curve bound to this mode.
    pub fn profile(&self) -> SpeedProfile {
        match self {
            Self::Relaxed => SpeedProfile {
                initial_speed: 8.0,
                increment: 0.5,
                threshold: 10,
            },
            Self::Balanced => SpeedProfile {
                initial_speed: 13.0,
                increment: 0.5,
                threshold: 5,
            },
            Self::Extreme => SpeedProfile {
                initial_speed: 20.0,
                increment: 1.0,
                threshold: 5,
            },
        }
    }
}

/// Parameters of a speed curve: ticks per second start at `initial_speed` and
/// rise by `increment` for every `threshold` points of score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedProfile {
    pub initial_speed: f64,
    pub increment: f64,
    pub threshold: u32,
}

impl SpeedProfile {
    /// Curve used when no known difficulty is active.
    pub const FALLBACK: SpeedProfile = SpeedProfile {
        initial_speed: 5.0,
        increment: 0.05,
        threshold: 10,
    };
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self::FALLBACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::None.opposite(), Direction::None);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
        assert_eq!(Direction::None.delta(), (0, 0));
    }

    #[test]
    fn test_difficulty_from_index() {
        assert_eq!(DifficultyMode::from_index(0), DifficultyMode::Relaxed);
        assert_eq!(DifficultyMode::from_index(1), DifficultyMode::Balanced);
        assert_eq!(DifficultyMode::from_index(2), DifficultyMode::Extreme);
        assert_eq!(DifficultyMode::from_index(99), DifficultyMode::Balanced);
        for mode in DifficultyMode::ALL {
            assert_eq!(DifficultyMode::from_index(mode.index()), mode);
        }
    }

    #[test]
    fn test_difficulty_from_name() {
        assert_eq!(
            DifficultyMode::from_name("relaxed"),
            Some(DifficultyMode::Relaxed)
        );
        assert_eq!(
            DifficultyMode::from_name(" Extreme "),
            Some(DifficultyMode::Extreme)
        );
        assert_eq!(DifficultyMode::from_name("Nightmare"), None);
    }

    #[test]
    fn test_difficulty_profiles() {
        let relaxed = DifficultyMode::Relaxed.profile();
        assert_eq!(relaxed.initial_speed, 8.0);
        assert_eq!(relaxed.increment, 0.5);
        assert_eq!(relaxed.threshold, 10);

        let balanced = DifficultyMode::Balanced.profile();
        assert_eq!(balanced.initial_speed, 13.0);
        assert_eq!(balanced.increment, 0.5);
        assert_eq!(balanced.threshold, 5);

        let extreme = DifficultyMode::Extreme.profile();
        assert_eq!(extreme.initial_speed, 20.0);
        assert_eq!(extreme.increment, 1.0);
        assert_eq!(extreme.threshold, 5);
    }

    #[test]
    fn test_default_profile_is_fallback() {
        assert_eq!(SpeedProfile::default(), SpeedProfile::FALLBACK);
        assert_eq!(SpeedProfile::FALLBACK.initial_speed, 5.0);
        assert_eq!(SpeedProfile::FALLBACK.threshold, 10);
    }

    #[test]
    fn test_difficulty_serializes_as_name() {
        let json = serde_json::to_string(&DifficultyMode::Extreme).unwrap();
        assert_eq!(json, "\"Extreme\"");
    }
}
