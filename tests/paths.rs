use approx::assert_abs_diff_eq;
use core::f64::consts::{FRAC_PI_2, PI, TAU};
use glam::DVec2;
use rand::Rng;
use reeds_shepp_paths::{
    mod2pi, Direction, PathFamily, PlanningError, PosRot, ReedsSheppPath, SegmentType,
};

/// Smallest rotation between two headings, ignoring full turns
fn heading_diff(a: f64, b: f64) -> f64 {
    let d = mod2pi(a - b);
    d.min(TAU - d)
}

fn random_pose(rng: &mut impl Rng) -> PosRot {
    PosRot::from_floats(
        rng.gen_range(-100.0..100.0),
        rng.gen_range(-100.0..100.0),
        rng.gen_range(-TAU..TAU),
    )
}

#[test]
fn invalid_radius_is_rejected() {
    let q0: PosRot = [0., 0., 0.].into();
    let q1: PosRot = [10., 10., FRAC_PI_2].into();

    for rho in [0., -1., -100., f64::NAN] {
        assert_eq!(
            ReedsSheppPath::shortest_from(q0, q1, rho).unwrap_err(),
            PlanningError::InvalidRadius
        );
        assert_eq!(
            ReedsSheppPath::new(q0, q1, rho, PathFamily::RSR).unwrap_err(),
            PlanningError::InvalidRadius
        );
    }
}

#[test]
fn identical_poses_yield_zero_length() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let q = random_pose(&mut rng);
        let path = ReedsSheppPath::shortest_from(q, q, 3.).unwrap();

        assert!(path.length() <= 1e-9, "{:?}", path.segments);

        let end = path.endpoint();
        assert_abs_diff_eq!(end.x(), q.x(), epsilon = 1e-9);
        assert_abs_diff_eq!(end.y(), q.y(), epsilon = 1e-9);
        assert!(heading_diff(end.rot(), q.rot()) <= 1e-9);
    }
}

#[test]
fn straight_ahead_goal_takes_the_straight() {
    let q0: PosRot = [0., 0., 0.].into();
    let q1: PosRot = [42., 0., 0.].into();

    let path = ReedsSheppPath::shortest_from(q0, q1, 7.).unwrap();

    // the pure straight is the global optimum; no arc can shortcut it
    assert_abs_diff_eq!(path.length(), 42., epsilon = 1e-9);
    assert!(PathFamily::CSC.contains(&path.family));
    assert_eq!(path.reversals(), 0);

    let straight = path.segments[1];
    assert_eq!(straight.steer, SegmentType::S);
    assert_eq!(straight.direction, Direction::Forward);
    assert_abs_diff_eq!(straight.length, 42., epsilon = 1e-9);
    assert!(path.segment_length(0) <= 1e-9);
    assert!(path.segment_length(2) <= 1e-9);
}

#[test]
fn length_never_beats_the_euclidean_distance() {
    let mut rng = rand::thread_rng();

    for _ in 0..1000 {
        let q0 = random_pose(&mut rng);
        let q1 = random_pose(&mut rng);

        let path = ReedsSheppPath::shortest_from(q0, q1, 10.).unwrap();
        let crow_flies = q0.pos().distance(q1.pos());

        assert!(
            path.length() + 1e-6 >= crow_flies,
            "{} < {crow_flies} for {q0:?} -> {q1:?}",
            path.length()
        );
    }
}

#[test]
fn reversed_query_has_equal_length() {
    // driving the optimal path backwards solves the query with start and goal
    // swapped and both headings flipped by pi, so the two optima agree
    let mut rng = rand::thread_rng();

    for _ in 0..500 {
        let q0 = random_pose(&mut rng);
        let q1 = random_pose(&mut rng);

        let forward = ReedsSheppPath::shortest_from(q0, q1, 10.).unwrap();

        let flipped0 = PosRot::from_floats(q1.x(), q1.y(), q1.rot() + PI);
        let flipped1 = PosRot::from_floats(q0.x(), q0.y(), q0.rot() + PI);
        let reversed = ReedsSheppPath::shortest_from(flipped0, flipped1, 10.).unwrap();

        let tol = 1e-6 * forward.length().max(1.);
        assert!(
            (forward.length() - reversed.length()).abs() <= tol,
            "{} vs {} for {q0:?} -> {q1:?}",
            forward.length(),
            reversed.length()
        );
    }
}

#[test]
fn about_face_uses_a_three_point_turn() {
    let r = 10.;
    let q0: PosRot = [0., 0., 0.].into();
    let q1: PosRot = [0., 0., PI].into();

    let path = ReedsSheppPath::shortest_from(q0, q1, r).unwrap();

    // Expected geometry: the start and goal right circles sit at (0, -r) and
    // (0, r). The middle circle center is 2r from both, so it lies on the x
    // axis at x = sqrt((2r)^2 - r^2). The arc swept on the start circle runs
    // from the start bearing (pi/2) to the bearing of that center, and by
    // symmetry all three arcs sweep the same angle.
    let m = DVec2::new((4. * r * r - r * r).sqrt(), 0.);
    let depart = FRAC_PI_2 - (r / m.x).atan();
    let expected = 3. * r * depart;

    assert!(PathFamily::CCC.contains(&path.family), "{:?}", path.family);
    assert_abs_diff_eq!(path.length(), expected, epsilon = 1e-9);

    // the middle arc is driven in the opposite gear to the outer two
    assert_eq!(path.reversals(), 2);

    let end = path.endpoint();
    assert_abs_diff_eq!(end.x(), 0., epsilon = 1e-9);
    assert_abs_diff_eq!(end.y(), 0., epsilon = 1e-9);
    assert!(heading_diff(end.rot(), PI) <= 1e-9);
}

#[test]
fn crossing_tangent_boundary() {
    let r = 10.;
    let q0: PosRot = [0., 0., 0.].into();

    // the start-left and goal-right circles sit exactly one diameter apart,
    // so the two circles touch and the straight degenerates to a point
    let q1: PosRot = [2. * r, 2. * r, 0.].into();
    let path = ReedsSheppPath::new(q0, q1, r, PathFamily::LSR).unwrap();

    assert!(path.segment_length(1) <= 1e-9);
    assert_abs_diff_eq!(path.length(), r * PI, epsilon = 1e-9);

    let end = path.endpoint();
    assert_abs_diff_eq!(end.x(), q1.x(), epsilon = 1e-9);
    assert_abs_diff_eq!(end.y(), q1.y(), epsilon = 1e-9);

    // any closer and the family has no candidate at all
    let q1: PosRot = [r, 2. * r, 0.].into();
    assert_eq!(
        ReedsSheppPath::new(q0, q1, r, PathFamily::LSR).unwrap_err(),
        PlanningError::NoFeasiblePath
    );
}

#[test]
fn many_path_correctness() {
    // Test that the path is correct for a number of random configurations:
    // tracing the selected segments from the start pose must land exactly on
    // the goal pose.

    let runs = 5000;
    let mut rng = rand::thread_rng();

    for _ in 0..runs {
        let q0 = random_pose(&mut rng);
        let q1 = random_pose(&mut rng);

        let path = ReedsSheppPath::shortest_from(q0, q1, 10.).unwrap();

        let start = path.sample(0.);
        assert_abs_diff_eq!(start.x(), q0.x(), epsilon = 1e-6);
        assert_abs_diff_eq!(start.y(), q0.y(), epsilon = 1e-6);
        assert!(
            heading_diff(start.rot(), q0.rot()) <= 1e-6,
            "start differs: {:?} | {q0:?} | {start:?}",
            path.family
        );

        let endpoint = path.endpoint();
        assert_abs_diff_eq!(endpoint.x(), q1.x(), epsilon = 1e-6);
        assert_abs_diff_eq!(endpoint.y(), q1.y(), epsilon = 1e-6);
        assert!(
            heading_diff(endpoint.rot(), q1.rot()) <= 1e-6,
            "endpoint differs: {:?} | {q1:?} | {endpoint:?}",
            path.family
        );
    }
}

#[test]
fn sample_many_covers_both_ends() {
    let q0: PosRot = [0., 0., FRAC_PI_2].into();
    let q1: PosRot = [-20., 35., 2.5].into();

    let path = ReedsSheppPath::shortest_from(q0, q1, 8.).unwrap();
    let samples = path.sample_many(0.4);

    assert!(samples.len() >= 2);

    let first = samples.first().unwrap();
    assert_abs_diff_eq!(first.x(), q0.x(), epsilon = 1e-9);
    assert_abs_diff_eq!(first.y(), q0.y(), epsilon = 1e-9);

    let last = samples.last().unwrap();
    assert_abs_diff_eq!(last.x(), q1.x(), epsilon = 1e-6);
    assert_abs_diff_eq!(last.y(), q1.y(), epsilon = 1e-6);
    assert!(heading_diff(last.rot(), q1.rot()) <= 1e-6);
}

#[test]
fn segment_lengths_sum_to_total() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let q0 = random_pose(&mut rng);
        let q1 = random_pose(&mut rng);

        let path = ReedsSheppPath::shortest_from(q0, q1, 10.).unwrap();

        let sum: f64 = (0..3).map(|i| path.segment_length(i)).sum();
        assert_abs_diff_eq!(sum, path.length(), epsilon = 1e-9);
        assert!((0..3).all(|i| path.segment_length(i) >= 0.));
    }
}
