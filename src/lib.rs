//! Shortest Reeds-Shepp paths for a car-like vehicle with a bounded turning
//! radius that can drive both forwards and backwards.
//!
//! A planning query is a pure function of a start pose, a goal pose and the
//! car's minimum turning radius. Each of the six canonical word families
//! (`LSL`, `LSR`, `RSL`, `RSR`, `RLR`, `LRL`) is evaluated through its
//! circle-tangent geometry, every arc is considered both nose-first and in
//! reverse gear, and the shortest feasible candidate wins.
//!
//! # Examples
//!
//! ```
//! use core::f64::consts::PI;
//! use reeds_shepp_paths::{PosRot, ReedsSheppPath};
//!
//! // turn the car around on the spot
//! let q0 = PosRot::from_floats(0., 0., 0.);
//! let q1 = PosRot::from_floats(0., 0., PI);
//!
//! let path = ReedsSheppPath::shortest_from(q0, q1, 10.).unwrap();
//!
//! // a three-arc shuffle with two gear changes beats any single sweep
//! assert_eq!(path.reversals(), 2);
//! ```
//!
//! There is no global planner state, no I/O and no logging; queries are safe
//! to run concurrently from independent callers.

mod base;
mod geometry;
mod path;
mod word;

pub use base::{
    direction_changes, Direction, PathFamily, PathSegment, PlanningError, PosRot, Result,
    SegmentType,
};
pub use geometry::{
    bearing, inner_tangent, middle_circle_centers, mod2pi, outer_tangent_bearing, sweep_angle,
    TurningCircle,
};
pub use path::ReedsSheppPath;
pub use word::{Candidate, Circles};

/// [`glam`] provides the 2D vector type used for positions
pub extern crate glam;
