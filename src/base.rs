use core::fmt;
use glam::DVec2;
use std::{error::Error, result};

/// The three steering letters a path word is spelled with
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentType {
    /// Left-turning segment
    L,
    /// Straight segment
    S,
    /// Right-turning segment
    R,
}

impl SegmentType {
    /// Whether this letter steers the car along a turning circle
    #[inline]
    #[must_use]
    pub const fn is_turn(&self) -> bool {
        !matches!(self, Self::S)
    }
}

/// The gear a segment is driven in
///
/// Reverse gear on an arc moves the car the opposite way around its turning
/// circle while the heading stays tangent to the circle.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    /// Driving nose-first
    Forward,
    /// Driving in reverse gear
    Backward,
}

/// All the canonical word families
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathFamily {
    #[default]
    /// A "Left Straight Left" path
    LSL,
    /// A "Left Straight Right" path
    LSR,
    /// A "Right Straight Left" path
    RSL,
    /// A "Right Straight Right" path
    RSR,
    /// A "Right Left Right" path
    RLR,
    /// A "Left Right Left" path
    LRL,
}

impl PathFamily {
    /// All of the "Curve Straight Curve" families
    pub const CSC: [Self; 4] = [Self::LSL, Self::LSR, Self::RSL, Self::RSR];
    /// All of the "Curve Curve Curve" families
    pub const CCC: [Self; 2] = [Self::RLR, Self::LRL];
    /// All of the families
    pub const ALL: [Self; 6] = [
        Self::LSL,
        Self::LSR,
        Self::RSL,
        Self::RSR,
        Self::RLR,
        Self::LRL,
    ];

    /// Convert the family to its three steering letters
    #[inline]
    #[must_use]
    pub const fn to_segment_types(&self) -> [SegmentType; 3] {
        match self {
            Self::LSL => [SegmentType::L, SegmentType::S, SegmentType::L],
            Self::LSR => [SegmentType::L, SegmentType::S, SegmentType::R],
            Self::RSL => [SegmentType::R, SegmentType::S, SegmentType::L],
            Self::RSR => [SegmentType::R, SegmentType::S, SegmentType::R],
            Self::RLR => [SegmentType::R, SegmentType::L, SegmentType::R],
            Self::LRL => [SegmentType::L, SegmentType::R, SegmentType::L],
        }
    }

    /// The family name as spelled in the word ("RSR", "LSL", ...)
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LSL => "LSL",
            Self::LSR => "LSR",
            Self::RSL => "RSL",
            Self::RSR => "RSR",
            Self::RLR => "RLR",
            Self::LRL => "LRL",
        }
    }
}

impl fmt::Display for PathFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One piece of a path: an arc or a straight, driven in one gear
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSegment {
    /// The steering letter; `S` means no turn
    pub steer: SegmentType,
    /// The gear the segment is driven in
    pub direction: Direction,
    /// Arc length for turns, Euclidean length for straights; never negative
    pub length: f64,
}

impl PathSegment {
    /// Create an arc segment
    #[inline]
    #[must_use]
    pub const fn arc(steer: SegmentType, direction: Direction, length: f64) -> Self {
        Self {
            steer,
            direction,
            length,
        }
    }

    /// Create a forward straight segment
    #[inline]
    #[must_use]
    pub const fn straight(length: f64) -> Self {
        Self {
            steer: SegmentType::S,
            direction: Direction::Forward,
            length,
        }
    }

    /// The central angle this segment sweeps on its turning circle
    ///
    /// Zero for straight segments.
    #[inline]
    #[must_use]
    pub fn sweep(&self, rho: f64) -> f64 {
        if self.steer.is_turn() {
            self.length / rho
        } else {
            0.
        }
    }
}

/// Segments shorter than this are treated as absent when counting gear
/// changes or classifying the leading segment
pub(crate) const LENGTH_EPSILON: f64 = 1e-9;

/// Count the `Forward`/`Backward` transitions across the positive-length
/// segments of a path
#[must_use]
pub fn direction_changes(segments: &[PathSegment]) -> usize {
    let mut changes = 0;
    let mut previous: Option<Direction> = None;

    for seg in segments {
        if seg.length <= LENGTH_EPSILON {
            continue;
        }

        if let Some(dir) = previous {
            if dir != seg.direction {
                changes += 1;
            }
        }

        previous = Some(seg.direction);
    }

    changes
}

/// The errors a planning query can surface
///
/// Family-local degeneracies (coincident circles, tangent-infeasible pairs)
/// never appear here; an evaluator hitting one simply emits no candidate.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum PlanningError {
    /// The turning radius was zero, negative, or NaN
    InvalidRadius,
    /// Every family evaluator rejected its candidate
    NoFeasiblePath,
}

impl fmt::Display for PlanningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadius => write!(f, "Turning radius must be a positive number"),
            Self::NoFeasiblePath => write!(f, "No path exists with given parameters"),
        }
    }
}

impl Error for PlanningError {}

/// A type that allows the function to return either
///
/// Ok(T) or Err([`PlanningError`])
pub type Result<T> = result::Result<T, PlanningError>;

/// The car's position and heading in radians
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PosRot(DVec2, f64);

impl PosRot {
    /// Create a new `PosRot` from a `DVec2` and heading
    #[inline]
    #[must_use]
    pub const fn new(pos: DVec2, rot: f64) -> Self {
        Self(pos, rot)
    }

    /// Create a new `PosRot` from a position and heading
    #[inline]
    #[must_use]
    pub const fn from_floats(x: f64, y: f64, rot: f64) -> Self {
        Self(DVec2::new(x, y), rot)
    }

    /// Get the position
    #[inline]
    #[must_use]
    pub const fn pos(&self) -> DVec2 {
        self.0
    }

    /// Get the x position
    #[inline]
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.0.x
    }

    /// Get the y position
    #[inline]
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.0.y
    }

    /// Get the heading
    #[inline]
    #[must_use]
    pub const fn rot(&self) -> f64 {
        self.1
    }
}

impl From<[f64; 3]> for PosRot {
    #[inline]
    fn from(posrot: [f64; 3]) -> Self {
        Self::from_floats(posrot[0], posrot[1], posrot[2])
    }
}
