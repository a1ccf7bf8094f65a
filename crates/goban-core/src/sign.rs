#![forbid(unsafe_code)]

//! Intersection occupancy.

/// Occupancy of a single intersection.
///
/// Encoded as 0 (empty), 1 (black), -1 (white) to match SGF conventions and
/// the sign-map wire shape most Go tooling exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sign {
    #[default]
    Empty,
    Black,
    White,
}

impl Sign {
    /// Numeric encoding: 0 empty, 1 black, -1 white.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Sign::Empty => 0,
            Sign::Black => 1,
            Sign::White => -1,
        }
    }

    /// Decode from the numeric encoding. Any positive value is black, any
    /// negative value is white.
    #[inline]
    #[must_use]
    pub const fn from_value(value: i8) -> Self {
        if value > 0 {
            Sign::Black
        } else if value < 0 {
            Sign::White
        } else {
            Sign::Empty
        }
    }

    /// Whether a stone occupies the intersection.
    #[inline]
    #[must_use]
    pub const fn is_stone(self) -> bool {
        !matches!(self, Sign::Empty)
    }
}

/// Whether two paint values share the same non-comparable-to-zero sign.
///
/// Mirrors sign-map equality used for paint joins: values compare by sign
/// only, so 2 and 1 join, 1 and -1 do not, and 0 only joins 0.
#[inline]
#[must_use]
pub const fn same_sign(a: i8, b: i8) -> bool {
    a.signum() == b.signum()
}
