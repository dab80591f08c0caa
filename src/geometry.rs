//! Angle and circle primitives shared by every word evaluator.

use crate::{PosRot, SegmentType};
use core::f64::consts::{FRAC_PI_2, TAU};
use glam::DVec2;

/// Tolerance for "is this distance zero" and tangency-boundary roundoff,
/// scaled by the turning radius where lengths are compared
pub(crate) const GEOM_EPSILON: f64 = 1e-9;

/// Ensure the given angle is between 0 and 2pi
///
/// # Arguments
///
/// * `theta`: The value to be normalized
///
/// # Examples
///
/// ```
/// use core::f64::consts::TAU;
/// use reeds_shepp_paths::mod2pi;
///
/// assert_eq!(mod2pi(TAU), 0.);
/// assert!((mod2pi(-0.25) - (TAU - 0.25)).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn mod2pi(theta: f64) -> f64 {
    let r = theta % TAU;
    if r < 0.0 {
        r + TAU
    } else {
        r
    }
}

/// The minimal non-negative rotation from bearing `from` to bearing `to`
/// when turning in the commanded direction
///
/// A left turn sweeps counterclockwise, a right turn clockwise; the result is
/// always in `[0, 2pi)`. A straight sweeps nothing. This is the single place
/// where the sign/quadrant disambiguation between an arc and its 2pi
/// complement is decided.
#[inline]
#[must_use]
pub fn sweep_angle(from: f64, to: f64, steer: SegmentType) -> f64 {
    match steer {
        SegmentType::L => mod2pi(to - from),
        SegmentType::R => mod2pi(from - to),
        SegmentType::S => 0.,
    }
}

/// The bearing of `to` as seen from `from`
#[inline]
#[must_use]
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    mod2pi(d.y.atan2(d.x))
}

/// The locus a car traces while steering maximally in one direction
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurningCircle {
    /// Center of the circle
    pub center: DVec2,
    /// The car's minimum turning radius
    pub radius: f64,
}

impl TurningCircle {
    /// The circle the car turns around when steering fully left
    ///
    /// Its center sits one radius to the left of the heading.
    #[inline]
    #[must_use]
    pub fn left_of(pose: PosRot, radius: f64) -> Self {
        Self {
            center: pose.pos() + radius * DVec2::from_angle(pose.rot() + FRAC_PI_2),
            radius,
        }
    }

    /// The circle the car turns around when steering fully right
    #[inline]
    #[must_use]
    pub fn right_of(pose: PosRot, radius: f64) -> Self {
        Self {
            center: pose.pos() + radius * DVec2::from_angle(pose.rot() - FRAC_PI_2),
            radius,
        }
    }

    /// Euclidean distance between the centers of two circles
    #[inline]
    #[must_use]
    pub fn center_distance(&self, other: &Self) -> f64 {
        self.center.distance(other.center)
    }

    /// The bearing of a point as seen from this circle's center
    #[inline]
    #[must_use]
    pub fn bearing_to(&self, point: DVec2) -> f64 {
        bearing(self.center, point)
    }

    /// The point on the circumference at the given bearing
    #[inline]
    #[must_use]
    pub fn point_at(&self, bearing: f64) -> DVec2 {
        self.center + self.radius * DVec2::from_angle(bearing)
    }
}

/// Bearing of the outer tangent points joining two same-turn circles
///
/// Both circles carry their tangent point at the same bearing: the chord runs
/// parallel to the center line, offset by a quarter turn toward the side the
/// commanded turn travels on. The chord length equals the center distance.
#[inline]
#[must_use]
pub fn outer_tangent_bearing(a: &TurningCircle, b: &TurningCircle, steer: SegmentType) -> f64 {
    let theta = bearing(a.center, b.center);

    match steer {
        SegmentType::R => mod2pi(theta + FRAC_PI_2),
        SegmentType::L => mod2pi(theta - FRAC_PI_2),
        SegmentType::S => theta,
    }
}

/// Inner (crossing) tangent joining two opposite-turn circles
///
/// `first` is the steering letter of the circle `a` belongs to. Returns the
/// straight length and the tangent-point bearing on `a`; the tangent point on
/// `b` sits at the antipodal bearing. `None` when the centers are closer than
/// one diameter, which is the family's normal "no candidate" outcome.
#[must_use]
pub fn inner_tangent(a: &TurningCircle, b: &TurningCircle, first: SegmentType) -> Option<(f64, f64)> {
    let d = a.center_distance(b);
    let diameter = a.radius + b.radius;
    let len_sq = d * d - diameter * diameter;

    // tiny negatives right at the tangency boundary are roundoff, not infeasibility
    let len = if len_sq < 0. {
        if len_sq < -GEOM_EPSILON * diameter.max(1.) {
            return None;
        }
        0.
    } else {
        len_sq.sqrt()
    };

    let theta = bearing(a.center, b.center);
    let offset = len.atan2(diameter);

    let psi = match first {
        SegmentType::R => theta + offset,
        _ => theta - offset,
    };

    Some((len, mod2pi(psi)))
}

/// Centers of the two circles tangent to both `a` and `b` from the same side,
/// used as the middle circle of the CCC families
///
/// Each center sits one diameter away from both input centers, so a solution
/// exists only while the centers are at most two diameters apart. `None` when
/// they are farther than that, or so close that the normal direction is
/// undefined.
#[must_use]
pub fn middle_circle_centers(a: &TurningCircle, b: &TurningCircle) -> Option<[DVec2; 2]> {
    let d = a.center_distance(b);
    if d < GEOM_EPSILON * a.radius.max(1.) {
        return None;
    }

    let diameter = a.radius + b.radius;
    let half = d / 2.;
    let h_sq = diameter * diameter - half * half;

    let h = if h_sq < 0. {
        if h_sq < -GEOM_EPSILON * diameter.max(1.) {
            return None;
        }
        0.
    } else {
        h_sq.sqrt()
    };

    let dir = (b.center - a.center) / d;
    let normal = dir.perp();
    let mid = (a.center + b.center) * 0.5;

    Some([mid + h * normal, mid - h * normal])
}
