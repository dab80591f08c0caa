//! One evaluator per canonical word family.
//!
//! Every evaluator derives the tangent geometry for its word from the four
//! precomputed turning circles and emits zero or more feasible candidates.
//! Each arc of a candidate has two realizations that end at the same tangent
//! point with the same heading: drive forward through the resolved sweep, or
//! drive in reverse gear the complementary way around the circle. Evaluators
//! emit every combination so the selector can compare them all; this is what
//! lets the planner use reverse gear at all.

use crate::{
    base::LENGTH_EPSILON,
    direction_changes,
    geometry::{
        bearing, inner_tangent, middle_circle_centers, mod2pi, outer_tangent_bearing, sweep_angle,
        TurningCircle, GEOM_EPSILON,
    },
    Direction, PathFamily, PathSegment, PosRot, SegmentType,
};
use core::f64::consts::{FRAC_PI_2, PI, TAU};

/// One feasible decomposition of the motion into three segments
///
/// Tracing the segments from the start pose reaches the goal pose exactly; a
/// partially valid decomposition is never constructed.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// The word family this candidate belongs to
    pub family: PathFamily,
    /// The ordered segments, in world units
    pub segments: [PathSegment; 3],
}

impl Candidate {
    /// Total length: the sum of the segment lengths
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments.iter().map(|seg| seg.length).sum()
    }

    /// Number of gear changes along the candidate
    #[inline]
    #[must_use]
    pub fn reversals(&self) -> usize {
        direction_changes(&self.segments)
    }

    /// Whether the first driven segment is a turn rather than a straight
    #[must_use]
    pub fn starts_with_turn(&self) -> bool {
        self.segments
            .iter()
            .find(|seg| seg.length > LENGTH_EPSILON)
            .is_some_and(|seg| seg.steer.is_turn())
    }
}

/// The four turning circles, and each pose's bearing on its own circles,
/// shared by every family evaluator
///
/// To construct this type, use [`Circles::new`].
#[derive(Copy, Clone, Debug)]
pub struct Circles {
    rho: f64,
    start_left: TurningCircle,
    start_right: TurningCircle,
    goal_left: TurningCircle,
    goal_right: TurningCircle,
    start_left_bearing: f64,
    start_right_bearing: f64,
    goal_left_bearing: f64,
    goal_right_bearing: f64,
}

impl Circles {
    /// Precompute the turning circles required by all word families
    ///
    /// # Arguments
    ///
    /// * `q0`: The starting location and heading of the car.
    /// * `q1`: The goal location and heading of the car.
    /// * `rho`: The turning radius of the car. Must be greater than 0.
    ///
    /// A pose sits on its left circle a quarter turn clockwise of the center
    /// bearing, and on its right circle a quarter turn counterclockwise.
    #[must_use]
    pub fn new(q0: PosRot, q1: PosRot, rho: f64) -> Self {
        debug_assert!(rho > 0.);

        Self {
            rho,
            start_left: TurningCircle::left_of(q0, rho),
            start_right: TurningCircle::right_of(q0, rho),
            goal_left: TurningCircle::left_of(q1, rho),
            goal_right: TurningCircle::right_of(q1, rho),
            start_left_bearing: mod2pi(q0.rot() - FRAC_PI_2),
            start_right_bearing: mod2pi(q0.rot() + FRAC_PI_2),
            goal_left_bearing: mod2pi(q1.rot() - FRAC_PI_2),
            goal_right_bearing: mod2pi(q1.rot() + FRAC_PI_2),
        }
    }

    /// Evaluate a specific word family, appending its candidates to `out`
    ///
    /// Emits nothing when the family has no feasible tangent geometry.
    pub fn word(&self, family: PathFamily, out: &mut Vec<Candidate>) {
        match family {
            PathFamily::LSL => self.lsl(out),
            PathFamily::LSR => self.lsr(out),
            PathFamily::RSL => self.rsl(out),
            PathFamily::RSR => self.rsr(out),
            PathFamily::RLR => self.rlr(out),
            PathFamily::LRL => self.lrl(out),
        }
    }

    fn lsl(&self, out: &mut Vec<Candidate>) {
        self.csc_same_turn(
            PathFamily::LSL,
            SegmentType::L,
            &self.start_left,
            &self.goal_left,
            self.start_left_bearing,
            self.goal_left_bearing,
            out,
        );
    }

    fn rsr(&self, out: &mut Vec<Candidate>) {
        self.csc_same_turn(
            PathFamily::RSR,
            SegmentType::R,
            &self.start_right,
            &self.goal_right,
            self.start_right_bearing,
            self.goal_right_bearing,
            out,
        );
    }

    fn lsr(&self, out: &mut Vec<Candidate>) {
        self.csc_opposite_turn(
            PathFamily::LSR,
            SegmentType::L,
            SegmentType::R,
            &self.start_left,
            &self.goal_right,
            self.start_left_bearing,
            self.goal_right_bearing,
            out,
        );
    }

    fn rsl(&self, out: &mut Vec<Candidate>) {
        self.csc_opposite_turn(
            PathFamily::RSL,
            SegmentType::R,
            SegmentType::L,
            &self.start_right,
            &self.goal_left,
            self.start_right_bearing,
            self.goal_left_bearing,
            out,
        );
    }

    fn rlr(&self, out: &mut Vec<Candidate>) {
        self.ccc(
            PathFamily::RLR,
            SegmentType::R,
            SegmentType::L,
            &self.start_right,
            &self.goal_right,
            self.start_right_bearing,
            self.goal_right_bearing,
            out,
        );
    }

    fn lrl(&self, out: &mut Vec<Candidate>) {
        self.ccc(
            PathFamily::LRL,
            SegmentType::L,
            SegmentType::R,
            &self.start_left,
            &self.goal_left,
            self.start_left_bearing,
            self.goal_left_bearing,
            out,
        );
    }

    /// LSL and RSR: the straight runs along the outer tangent of two
    /// same-turn circles
    #[allow(clippy::too_many_arguments)]
    fn csc_same_turn(
        &self,
        family: PathFamily,
        steer: SegmentType,
        a: &TurningCircle,
        b: &TurningCircle,
        start_bearing: f64,
        goal_bearing: f64,
        out: &mut Vec<Candidate>,
    ) {
        let d = a.center_distance(b);

        if d < GEOM_EPSILON * self.rho.max(1.) {
            // both poses sit on one turning circle (the heading is then
            // automatically tangent-consistent); a lone arc closes the gap
            let sweep = sweep_angle(start_bearing, goal_bearing, steer);
            self.push_csc(family, (steer, sweep), 0., (steer, 0.), out);
            return;
        }

        let psi = outer_tangent_bearing(a, b, steer);
        let depart = sweep_angle(start_bearing, psi, steer);
        let arrive = sweep_angle(psi, goal_bearing, steer);

        self.push_csc(family, (steer, depart), d, (steer, arrive), out);
    }

    /// LSR and RSL: the straight crosses between two opposite-turn circles;
    /// feasible only when the centers are at least one diameter apart
    #[allow(clippy::too_many_arguments)]
    fn csc_opposite_turn(
        &self,
        family: PathFamily,
        first: SegmentType,
        last: SegmentType,
        a: &TurningCircle,
        b: &TurningCircle,
        start_bearing: f64,
        goal_bearing: f64,
        out: &mut Vec<Candidate>,
    ) {
        let Some((len, psi)) = inner_tangent(a, b, first) else {
            return;
        };

        let depart = sweep_angle(start_bearing, psi, first);
        let arrive = sweep_angle(mod2pi(psi + PI), goal_bearing, last);

        self.push_csc(family, (first, depart), len, (last, arrive), out);
    }

    /// RLR and LRL: a third circle of the same radius rolls tangent to both
    /// outer circles; both placements of its center are evaluated
    #[allow(clippy::too_many_arguments)]
    fn ccc(
        &self,
        family: PathFamily,
        outer: SegmentType,
        middle: SegmentType,
        a: &TurningCircle,
        b: &TurningCircle,
        start_bearing: f64,
        goal_bearing: f64,
        out: &mut Vec<Candidate>,
    ) {
        let Some(centers) = middle_circle_centers(a, b) else {
            return;
        };

        for m in centers {
            let depart = sweep_angle(start_bearing, a.bearing_to(m), outer);
            let transfer = sweep_angle(bearing(m, a.center), bearing(m, b.center), middle);
            let arrive = sweep_angle(b.bearing_to(m), goal_bearing, outer);

            self.push_ccc(
                family,
                (outer, depart),
                (middle, transfer),
                (outer, arrive),
                out,
            );
        }
    }

    /// The two ways to reach an arc's far tangent point: drive forward
    /// through the resolved sweep, or reverse the complementary way around
    ///
    /// The reverse realization is dropped for negligible sweeps, where it
    /// would be a pointless full loop.
    fn arc_realizations(&self, steer: SegmentType, sweep: f64) -> ([PathSegment; 2], usize) {
        let forward = PathSegment::arc(steer, Direction::Forward, sweep * self.rho);

        if sweep < GEOM_EPSILON {
            return ([forward, forward], 1);
        }

        let reverse = PathSegment::arc(steer, Direction::Backward, (TAU - sweep) * self.rho);
        ([forward, reverse], 2)
    }

    fn push_csc(
        &self,
        family: PathFamily,
        first: (SegmentType, f64),
        straight: f64,
        last: (SegmentType, f64),
        out: &mut Vec<Candidate>,
    ) {
        let (depart, n_depart) = self.arc_realizations(first.0, first.1);
        let (arrive, n_arrive) = self.arc_realizations(last.0, last.1);

        for d in &depart[..n_depart] {
            for a in &arrive[..n_arrive] {
                out.push(Candidate {
                    family,
                    segments: [*d, PathSegment::straight(straight), *a],
                });
            }
        }
    }

    fn push_ccc(
        &self,
        family: PathFamily,
        first: (SegmentType, f64),
        middle: (SegmentType, f64),
        last: (SegmentType, f64),
        out: &mut Vec<Candidate>,
    ) {
        let (depart, n_depart) = self.arc_realizations(first.0, first.1);
        let (transfer, n_transfer) = self.arc_realizations(middle.0, middle.1);
        let (arrive, n_arrive) = self.arc_realizations(last.0, last.1);

        for d in &depart[..n_depart] {
            for t in &transfer[..n_transfer] {
                for a in &arrive[..n_arrive] {
                    out.push(Candidate {
                        family,
                        segments: [*d, *t, *a],
                    });
                }
            }
        }
    }
}
