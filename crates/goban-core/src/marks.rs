#![forbid(unsafe_code)]

//! Annotation overlay inputs: markers, ghost stones, heat, lines.
//!
//! These are stateless per render pass. The engine never mutates them; they
//! are pure pass-through from the caller to the renderers.

use crate::sign::Sign;
use crate::vertex::Vertex;

/// Marker glyph drawn at an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Circle,
    Cross,
    Triangle,
    Square,
    Point,
    /// Busy indicator. Always rendered as an animated overlay element, never
    /// baked into static output, on either backend.
    Loader,
    Label,
}

/// A marker at one intersection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Marker {
    pub kind: Option<MarkerKind>,
    pub label: Option<String>,
}

impl Marker {
    /// A plain marker of the given kind.
    #[must_use]
    pub fn of(kind: MarkerKind) -> Self {
        Self {
            kind: Some(kind),
            label: None,
        }
    }

    /// A label marker.
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            kind: Some(MarkerKind::Label),
            label: Some(text.into()),
        }
    }

    /// Whether the label needs the reduced type size: multi-line labels or
    /// labels of three or more characters.
    #[must_use]
    pub fn is_small_label(&self) -> bool {
        self.kind == Some(MarkerKind::Label)
            && self
                .label
                .as_deref()
                .is_some_and(|label| label.contains('\n') || label.chars().count() >= 3)
    }
}

/// Qualitative judgement attached to a ghost stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GhostKind {
    Good,
    Interesting,
    Doubtful,
    Bad,
}

/// A provisional stone rendered translucently. Only meaningful on empty
/// intersections; renderers ignore ghost stones under real stones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostStone {
    pub sign: Sign,
    pub kind: Option<GhostKind>,
    pub faint: bool,
}

impl GhostStone {
    /// A plain ghost stone of the given color.
    #[must_use]
    pub const fn of(sign: Sign) -> Self {
        Self {
            sign,
            kind: None,
            faint: false,
        }
    }
}

/// Numeric-strength overlay value, rendered as a radial glow with optional
/// label text. Strengths outside 1–9 are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeatVertex {
    pub strength: u8,
    pub text: Option<String>,
}

impl HeatVertex {
    /// Whether the heat value is in the renderable 1–9 band.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.strength >= 1 && self.strength <= 9
    }
}

/// Shape of a line annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineKind {
    #[default]
    Line,
    Arrow,
}

/// A line or arrow between two intersections, always drawn topmost and
/// pointer-transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMarker {
    pub v1: Vertex,
    pub v2: Vertex,
    pub kind: LineKind,
}

#[cfg(test)]
mod tests {
    use super::{HeatVertex, Marker, MarkerKind};

    #[test]
    fn small_label_detection() {
        assert!(Marker::label("abc").is_small_label());
        assert!(Marker::label("a\nb").is_small_label());
        assert!(!Marker::label("ab").is_small_label());
        assert!(!Marker::of(MarkerKind::Circle).is_small_label());
    }

    #[test]
    fn heat_visibility_band() {
        assert!(HeatVertex { strength: 1, text: None }.is_visible());
        assert!(HeatVertex { strength: 9, text: None }.is_visible());
        assert!(!HeatVertex { strength: 0, text: None }.is_visible());
        assert!(!HeatVertex { strength: 10, text: None }.is_visible());
    }
}
