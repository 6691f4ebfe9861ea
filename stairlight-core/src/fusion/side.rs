//! Stair sides and travel direction

/// End of the staircase a sensor sits at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Bottom,
    Top,
}

impl Side {
    /// Direction of travel implied by a detection on this side
    pub const fn direction(self) -> Direction {
        match self {
            Side::Bottom => Direction::Up,
            Side::Top => Direction::Down,
        }
    }

    /// Short name used in topics
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Bottom => "bot",
            Side::Top => "top",
        }
    }
}

/// Travel direction, and with it the wipe direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward the top, wipe starts at the bottom end of the strip
    Up,
    /// Toward the bottom, wipe starts at the top end of the strip
    Down,
}

impl Direction {
    /// Segment reverse flag for a wipe in this direction
    pub const fn is_reversed(self) -> bool {
        matches!(self, Direction::Down)
    }
}
