//! Sides and positions.
//!
//! Every participant has a stable [`AbsoluteSide`] (`host` or `guest`). The
//! [`LocalSide`] label (`player` / `opponent`) is a view: the same absolute
//! side is `player` for its owner and `opponent` for the other process.
//! Anything that crosses the wire carries the absolute side only.
//!
//! ```
//! use duel_engine::core::{AbsoluteSide, LocalSide};
//!
//! // A message about the guest's hero, rendered on each process.
//! let subject = AbsoluteSide::Guest;
//! assert_eq!(LocalSide::from_absolute(subject, AbsoluteSide::Host), LocalSide::Opponent);
//! assert_eq!(LocalSide::from_absolute(subject, AbsoluteSide::Guest), LocalSide::Player);
//! ```

use serde::{Deserialize, Serialize};

/// Viewpoint-independent identity of a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsoluteSide {
    Host,
    Guest,
}

impl AbsoluteSide {
    /// Both sides, host first.
    pub const ALL: [AbsoluteSide; 2] = [AbsoluteSide::Host, AbsoluteSide::Guest];

    /// The other participant.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            AbsoluteSide::Host => AbsoluteSide::Guest,
            AbsoluteSide::Guest => AbsoluteSide::Host,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            AbsoluteSide::Host => 0,
            AbsoluteSide::Guest => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AbsoluteSide::Host => "host",
            AbsoluteSide::Guest => "guest",
        }
    }
}

impl std::fmt::Display for AbsoluteSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewpoint-relative label of a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalSide {
    Player,
    Opponent,
}

impl LocalSide {
    /// Label `absolute` as seen from the process that owns `me`.
    #[must_use]
    pub const fn from_absolute(absolute: AbsoluteSide, me: AbsoluteSide) -> Self {
        if absolute.index() == me.index() {
            LocalSide::Player
        } else {
            LocalSide::Opponent
        }
    }

    /// Inverse of [`LocalSide::from_absolute`].
    #[must_use]
    pub const fn to_absolute(self, me: AbsoluteSide) -> AbsoluteSide {
        match self {
            LocalSide::Player => me,
            LocalSide::Opponent => me.opposite(),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            LocalSide::Player => LocalSide::Opponent,
            LocalSide::Opponent => LocalSide::Player,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LocalSide::Player => "player",
            LocalSide::Opponent => "opponent",
        }
    }
}

impl std::fmt::Display for LocalSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hero slot on a side of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Center,
    Right,
}

impl Position {
    /// Canonical order used for targeting, turn order and animation stagger.
    pub const ALL: [Position; 3] = [Position::Left, Position::Center, Position::Right];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Position::Left => 0,
            Position::Center => 1,
            Position::Right => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Center => "center",
            Position::Right => "right",
        }
    }

    /// `self` first, then the remaining positions in canonical order.
    pub fn search_order(self) -> impl Iterator<Item = Position> {
        std::iter::once(self).chain(Self::ALL.into_iter().filter(move |p| *p != self))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_side_mapping() {
        for me in AbsoluteSide::ALL {
            assert_eq!(LocalSide::from_absolute(me, me), LocalSide::Player);
            assert_eq!(LocalSide::from_absolute(me.opposite(), me), LocalSide::Opponent);
        }
    }

    #[test]
    fn test_to_absolute_inverts() {
        for me in AbsoluteSide::ALL {
            for local in [LocalSide::Player, LocalSide::Opponent] {
                assert_eq!(LocalSide::from_absolute(local.to_absolute(me), me), local);
            }
        }
    }

    #[test]
    fn test_search_order() {
        let order: Vec<_> = Position::Right.search_order().collect();
        assert_eq!(order, vec![Position::Right, Position::Left, Position::Center]);

        let order: Vec<_> = Position::Left.search_order().collect();
        assert_eq!(order, vec![Position::Left, Position::Center, Position::Right]);
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(serde_json::to_string(&AbsoluteSide::Host).unwrap(), "\"host\"");
        assert_eq!(serde_json::to_string(&LocalSide::Opponent).unwrap(), "\"opponent\"");
        assert_eq!(serde_json::to_string(&Position::Center).unwrap(), "\"center\"");
    }
}
