use crate::{
    direction_changes,
    geometry::{mod2pi, TurningCircle},
    word::{Candidate, Circles},
    Direction, PathFamily, PathSegment, PlanningError, PosRot, Result, SegmentType,
};
use glam::DVec2;

/// Relative tolerance when deciding that two candidate lengths are equal
const LENGTH_TOLERANCE: f64 = 1e-9;

/// Whether `new` should replace `current` as the selected candidate
///
/// Shorter wins. Lengths equal within tolerance fall through to the
/// deterministic tie-break: fewer gear changes, then a turning first segment
/// over a straight one, then whichever was evaluated first.
fn preferred(new: &Candidate, current: &Candidate) -> bool {
    let new_len = new.length();
    let cur_len = current.length();
    let tol = LENGTH_TOLERANCE * new_len.max(cur_len).max(1.);

    if (new_len - cur_len).abs() > tol {
        return new_len < cur_len;
    }

    let new_rev = new.reversals();
    let cur_rev = current.reversals();
    if new_rev != cur_rev {
        return new_rev < cur_rev;
    }

    new.starts_with_turn() && !current.starts_with_turn()
}

/// A selected shortest Reeds-Shepp path between two poses
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReedsSheppPath {
    /// The starting location and heading
    pub qi: PosRot,
    /// The car's turning radius
    pub rho: f64,
    /// The three segments, in world units
    pub segments: [PathSegment; 3],
    /// The word family of the path
    pub family: PathFamily,
}

impl ReedsSheppPath {
    /// Find the shortest path out of the specified word families
    ///
    /// # Arguments
    ///
    /// * `q0`: The starting location and heading of the car.
    /// * `q1`: The goal location and heading of the car.
    /// * `rho`: The turning radius of the car. Must be greater than 0.
    /// * `families`: A reference to a slice that contains the families to be compared.
    ///
    /// # Errors
    ///
    /// [`PlanningError::InvalidRadius`] when `rho` is not a positive number;
    /// [`PlanningError::NoFeasiblePath`] when every listed family rejects its
    /// candidate.
    ///
    /// # Examples
    ///
    /// ```
    /// use reeds_shepp_paths::{PathFamily, PosRot, ReedsSheppPath};
    ///
    /// let q0: PosRot = [0., 0., 0.].into();
    /// let q1: PosRot = [20., 5., 0.].into();
    ///
    /// let path = ReedsSheppPath::shortest_in(q0, q1, 5., &PathFamily::CSC);
    /// assert!(path.is_ok());
    /// ```
    pub fn shortest_in(
        q0: PosRot,
        q1: PosRot,
        rho: f64,
        families: &[PathFamily],
    ) -> Result<Self> {
        // also rejects NaN
        if !(rho > 0.) {
            return Err(PlanningError::InvalidRadius);
        }

        let circles = Circles::new(q0, q1, rho);

        let mut candidates = Vec::with_capacity(8 * families.len());
        for &family in families {
            circles.word(family, &mut candidates);
        }

        let mut best: Option<Candidate> = None;
        for candidate in candidates {
            match &best {
                Some(current) if !preferred(&candidate, current) => {}
                _ => best = Some(candidate),
            }
        }

        best.map(|candidate| Self {
            qi: q0,
            rho,
            segments: candidate.segments,
            family: candidate.family,
        })
        .ok_or(PlanningError::NoFeasiblePath)
    }

    /// Find the shortest path out of all six word families
    ///
    /// # Arguments
    ///
    /// * `q0`: The starting location and heading of the car.
    /// * `q1`: The goal location and heading of the car.
    /// * `rho`: The turning radius of the car. Must be greater than 0.
    ///
    /// # Errors
    ///
    /// See [`shortest_in`](Self::shortest_in).
    ///
    /// # Examples
    ///
    /// ```
    /// use reeds_shepp_paths::{PosRot, ReedsSheppPath};
    ///
    /// // a goal straight ahead is reached by the straight itself
    /// let path = ReedsSheppPath::shortest_from([0., 0., 0.].into(), [40., 0., 0.].into(), 10.).unwrap();
    /// assert!((path.length() - 40.).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn shortest_from(q0: PosRot, q1: PosRot, rho: f64) -> Result<Self> {
        Self::shortest_in(q0, q1, rho, &PathFamily::ALL)
    }

    /// Calculate the best path of one specific word family
    ///
    /// # Errors
    ///
    /// [`PlanningError::NoFeasiblePath`] when the family has no feasible
    /// tangent geometry for these poses, [`PlanningError::InvalidRadius`] for
    /// a non-positive `rho`.
    #[inline]
    pub fn new(q0: PosRot, q1: PosRot, rho: f64, family: PathFamily) -> Result<Self> {
        Self::shortest_in(q0, q1, rho, core::slice::from_ref(&family))
    }

    /// Calculate the total length of the path
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments.iter().map(|seg| seg.length).sum()
    }

    /// The length of one segment, in world units
    #[inline]
    #[must_use]
    pub fn segment_length(&self, i: usize) -> f64 {
        self.segments[i].length
    }

    /// Number of gear changes along the path
    #[inline]
    #[must_use]
    pub fn reversals(&self) -> usize {
        direction_changes(&self.segments)
    }

    /// The pose after driving `distance` along one segment from pose `qi`
    ///
    /// On an arc the car stays on the turning circle of `qi`; reverse gear
    /// moves it the opposite way around the circle while the heading stays
    /// tangent. `distance` is capped at the segment length by the callers.
    #[must_use]
    pub fn segment(qi: PosRot, seg: &PathSegment, distance: f64, rho: f64) -> PosRot {
        if !seg.steer.is_turn() {
            let step = match seg.direction {
                Direction::Forward => distance,
                Direction::Backward => -distance,
            };
            return PosRot::new(qi.pos() + step * DVec2::from_angle(qi.rot()), qi.rot());
        }

        let sweep = distance / rho;

        // angular displacement about the circle center; heading follows it
        let delta = match (seg.steer, seg.direction) {
            (SegmentType::L, Direction::Forward) | (SegmentType::R, Direction::Backward) => sweep,
            _ => -sweep,
        };

        let circle = match seg.steer {
            SegmentType::L => TurningCircle::left_of(qi, rho),
            _ => TurningCircle::right_of(qi, rho),
        };

        let center = circle.center;
        let pos = center + DVec2::from_angle(delta).rotate(qi.pos() - center);
        PosRot::new(pos, mod2pi(qi.rot() + delta))
    }

    /// Get car location and heading after some travel distance
    ///
    /// # Arguments
    ///
    /// * `t`: The travel distance, clamped into `[0, length]`
    #[must_use]
    pub fn sample(&self, t: f64) -> PosRot {
        let mut remaining = t.clamp(0., self.length());
        let mut q = self.qi;

        for seg in &self.segments {
            if remaining <= seg.length {
                return Self::segment(q, seg, remaining, self.rho);
            }

            q = Self::segment(q, seg, seg.length, self.rho);
            remaining -= seg.length;
        }

        q
    }

    /// Get a vec of all the poses along the path,
    /// with the endpoint always sampled regardless of `step_distance`
    ///
    /// # Arguments
    ///
    /// * `step_distance`: The distance between each pose
    #[must_use]
    pub fn sample_many(&self, step_distance: f64) -> Vec<PosRot> {
        debug_assert!(step_distance > 0.);

        let total = self.length();

        // Rounding down is the correct behavior; the endpoint is chained on
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let num_samples = ((total / step_distance) as usize).max(1);

        (0..num_samples)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                self.sample(i as f64 * step_distance)
            })
            .chain(core::iter::once(self.sample(total)))
            .collect()
    }

    /// Get the endpoint of the path
    ///
    /// For every path returned by the planner this equals the goal pose,
    /// within floating-point tolerance.
    #[must_use]
    pub fn endpoint(&self) -> PosRot {
        let mut q = self.qi;
        for seg in &self.segments {
            q = Self::segment(q, seg, seg.length, self.rho);
        }
        q
    }
}
