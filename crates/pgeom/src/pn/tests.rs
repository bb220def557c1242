use super::*;
use crate::error::KernelError;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

const ORIGIN: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

/// A point that is proper in every metric: spatial part well inside `|w|`.
fn proper_point() -> impl Strategy<Value = Vec<f64>> {
    (
        prop::array::uniform3(-0.5f64..0.5),
        0.5f64..2.0,
        prop::bool::ANY,
    )
        .prop_map(|(x, w, flip)| {
            let s = if flip { -1.0 } else { 1.0 };
            vec![s * x[0] * w, s * x[1] * w, s * x[2] * w, s * w]
        })
}

/// Any nonzero point, ideal or outside the absolute included.
fn any_point() -> impl Strategy<Value = Vec<f64>> {
    (prop::array::uniform4(-2.0f64..2.0), prop::bool::ANY).prop_map(|(x, ideal)| {
        let w = if ideal { 0.0 } else { x[3] };
        vec![x[0], x[1], x[2], w]
    })
}

fn random_proper(rng: &mut StdRng) -> Vec<f64> {
    let w = rng.gen_range(0.5..2.0);
    let mut p: Vec<f64> = (0..3).map(|_| rng.gen_range(-0.5..0.5) * w).collect();
    p.push(w);
    p
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn distance_to_self_is_zero(p in proper_point()) {
        for m in Metric::ALL {
            prop_assert_eq!(distance_between(&p, &p, m).unwrap(), 0.0);
        }
    }

    #[test]
    fn distance_to_self_is_zero_off_the_proper_region(p in any_point(), s in 0.5f64..3.0) {
        prop_assume!(crate::rn::euclidean_norm(&p) > 1e-3);
        let scaled: Vec<f64> = p.iter().map(|x| -s * x).collect();
        for m in Metric::ALL {
            prop_assert_eq!(distance_between(&p, &p, m).unwrap(), 0.0);
            // improper inputs only reach 0 through the projective-equality test
            if !is_proper_point(&p, m) && !is_proper_point(&scaled, m) {
                prop_assert_eq!(distance_between(&p, &scaled, m).unwrap(), 0.0);
            }
        }
    }

    #[test]
    fn distance_is_symmetric(p in proper_point(), q in proper_point()) {
        for m in Metric::ALL {
            let d1 = distance_between(&p, &q, m).unwrap();
            let d2 = distance_between(&q, &p, m).unwrap();
            prop_assert_eq!(d1, d2);
            prop_assert!(d1 >= 0.0);
        }
    }

    #[test]
    fn dehomogenize_is_idempotent(v in prop::collection::vec(-10.0f64..10.0, 1..6)) {
        let once = dehomogenize(&v);
        prop_assert_eq!(dehomogenize(&once), once);
    }

    #[test]
    fn euclidean_tangent_has_exact_zero_last_slot(
        p in prop::collection::vec(-10.0f64..10.0, 4),
        v in prop::collection::vec(-10.0f64..10.0, 4),
    ) {
        let t = project_to_tangent_space(&p, &v, Metric::Euclidean).unwrap();
        prop_assert_eq!(t[3], 0.0);
    }

    #[test]
    fn hyperbolic_tangent_is_form_orthogonal(p in proper_point(), v in proper_point()) {
        let t = project_to_tangent_space(&p, &v, Metric::Hyperbolic).unwrap();
        let ip = inner_product(&p, &t, Metric::Hyperbolic).unwrap();
        let scale = norm(&p, Metric::Hyperbolic) * norm(&v, Metric::Hyperbolic);
        prop_assert!(ip.abs() <= 1e-10 * scale.max(1.0), "ip = {ip}");
    }
}

#[test]
fn euclidean_drag_is_exact() {
    let r = drag_towards(&ORIGIN, &[1.0, 0.0, 0.0, 1.0], 2.0, Metric::Euclidean).unwrap();
    assert_eq!(r, vec![2.0, 0.0, 0.0, 1.0]);
    // ideal target is read as a direction
    let r = drag_towards(&ORIGIN, &[0.0, 3.0, 0.0, 0.0], 1.5, Metric::Euclidean).unwrap();
    assert_eq!(r, vec![0.0, 1.5, 0.0, 1.0]);
}

#[test]
fn hyperbolic_drag_stays_inside_and_moves_unit_distance() {
    let r = drag_towards(&ORIGIN, &[1.0, 0.0, 0.0, 1.0], 1.0, Metric::Hyperbolic).unwrap();
    assert!(inner_product(&r, &r, Metric::Hyperbolic).unwrap() < 0.0);
    let d = distance_between(&ORIGIN, &r, Metric::Hyperbolic).unwrap();
    assert!((d - 1.0).abs() < 1e-6, "d = {d}");
}

#[test]
fn elliptic_drag_moves_requested_distance() {
    let r = drag_towards(&ORIGIN, &[0.0, 0.2, 0.0, 1.0], 0.7, Metric::Elliptic).unwrap();
    let d = distance_between(&ORIGIN, &r, Metric::Elliptic).unwrap();
    assert!((d - 0.7).abs() < 1e-12);
}

#[test]
fn drag_degenerate_inputs_return_start() {
    for m in Metric::ALL {
        let r = drag_towards(&ORIGIN, &ORIGIN, 1.0, m).unwrap();
        assert_eq!(r, ORIGIN.to_vec(), "{m}");
    }
    // start on the absolute is not a hyperbolic point
    let on_absolute = [1.0, 0.0, 0.0, 1.0];
    let r = drag_towards(&on_absolute, &ORIGIN, 1.0, Metric::Hyperbolic).unwrap();
    assert_eq!(r, on_absolute.to_vec());
    assert!(matches!(
        drag_towards(&ORIGIN, &[1.0, 0.0], 1.0, Metric::Euclidean),
        Err(KernelError::SizeMismatch { op: "drag_towards", .. })
    ));
}

#[test]
fn hyperbolic_drag_towards_ideal_point() {
    // the target lies on the absolute; the geodesic still has a tangent
    let r = drag_towards(&ORIGIN, &[0.0, 0.0, 1.0, 1.0], 2.0, Metric::Hyperbolic).unwrap();
    let d = distance_between(&ORIGIN, &r, Metric::Hyperbolic).unwrap();
    assert!((d - 2.0).abs() < 1e-9);
    assert!(r[2] > 0.0);
}

#[test]
fn drag_agrees_with_interpolation_seeded() {
    let mut rng = StdRng::seed_from_u64(3);
    for m in Metric::ALL {
        for _ in 0..20 {
            let p = random_proper(&mut rng);
            let q = random_proper(&mut rng);
            let d = distance_between(&p, &q, m).unwrap();
            let t = rng.gen_range(0.0..1.0);
            let lerp = linear_interpolation(&p, &q, t, m).unwrap();
            let drag = drag_towards(&p, &q, t * d, m).unwrap();
            let gap = distance_between(&lerp, &drag, m).unwrap();
            assert!(gap < 1e-7, "{m}: gap {gap}");
            let along = distance_between(&p, &lerp, m).unwrap();
            assert!((along - t * d).abs() < 1e-7, "{m}: {along} vs {}", t * d);
        }
    }
}

#[test]
fn interpolation_endpoints_and_midpoint() {
    let a = [1.0, 0.0, 0.0, 1.0];
    let b = [-1.0, 0.0, 0.0, 1.0];
    let mid = midpoint(&a, &b, Metric::Elliptic).unwrap();
    assert!(crate::rn::equals(&mid, &ORIGIN, 1e-12), "{mid:?}");

    let (from, to) = ([0.0, 0.0, 0.0, 2.0], [4.0, 0.0, 0.0, 2.0]);
    let e = linear_interpolation(&from, &to, 0.25, Metric::Euclidean).unwrap();
    assert_eq!(e, vec![0.5, 0.0, 0.0, 1.0]);

    let p = [0.1, 0.2, 0.0, 1.0];
    let same = linear_interpolation(&p, &p, 0.5, Metric::Hyperbolic).unwrap();
    assert_eq!(same, p.to_vec());
}

#[test]
fn distance_special_cases() {
    let ideal = [1.0, 0.0, 0.0, 0.0];
    assert_eq!(distance_between(&ORIGIN, &ideal, Metric::Euclidean).unwrap(), f64::INFINITY);
    assert_eq!(distance_between(&ORIGIN, &ideal, Metric::Hyperbolic).unwrap(), f64::INFINITY);
    assert!(distance_between(&ORIGIN, &[0.0; 4], Metric::Elliptic).unwrap().is_nan());

    // improper points still sit at distance 0 from themselves
    let direction = [1.0, 2.0, 0.0, 0.0];
    let d = distance_between(&direction, &direction, Metric::Euclidean).unwrap();
    assert_eq!(d, 0.0);
    let d = distance_between(&direction, &[-2.0, -4.0, 0.0, 0.0], Metric::Euclidean).unwrap();
    assert_eq!(d, 0.0);
    let outside = [2.0, 0.0, 0.0, 1.0];
    assert_eq!(distance_between(&outside, &outside, Metric::Hyperbolic).unwrap(), 0.0);
    let d = distance_between(&outside, &[0.0, 2.0, 0.0, 1.0], Metric::Hyperbolic).unwrap();
    assert_eq!(d, f64::INFINITY);

    // antipodal representatives are the same elliptic point
    let (p, antipode) = ([0.3, 0.1, 0.0, 1.0], [-0.3, -0.1, 0.0, -1.0]);
    let d = distance_between(&p, &antipode, Metric::Elliptic).unwrap();
    assert!(d.abs() < 1e-7);
    // elliptic distance is bounded by π/2
    let d = distance_between(&ORIGIN, &ideal, Metric::Elliptic).unwrap();
    assert!((d - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

    let (p, twice) = ([1.0, 2.0, 2.0, 1.0], [2.0, 4.0, 4.0, 2.0]);
    let d = distance_between(&p, &twice, Metric::Euclidean).unwrap();
    assert_eq!(d, 0.0);
    let d = distance_between(&[3.0, 4.0, 0.0, 1.0], &ORIGIN, Metric::Euclidean).unwrap();
    assert_eq!(d, 5.0);
}

#[test]
fn polarize_cases() {
    let p = [1.0, 2.0, 3.0, 1.0];
    assert_eq!(polarize_plane(&p, Metric::Euclidean), vec![1.0, 2.0, 3.0, 0.0]);
    assert_eq!(polarize_plane(&p, Metric::Hyperbolic), vec![1.0, 2.0, 3.0, -1.0]);
    assert_eq!(polarize_plane(&p, Metric::Elliptic), p.to_vec());
    let plane = polarize_plane(&p, Metric::Hyperbolic);
    assert_eq!(polarize_point(&plane, Metric::Hyperbolic), p.to_vec());
}

#[test]
fn normalization_per_metric() {
    let v = normalize(&[3.0, 4.0, 0.0, 2.0], Metric::Euclidean);
    assert!(crate::rn::equals(&v, &[0.6, 0.8, 0.0, 2.0], 1e-15));

    let h = normalize(&[0.0, 0.0, 0.0, -2.0], Metric::Hyperbolic);
    assert_eq!(h, vec![0.0, 0.0, 0.0, -1.0]);
    assert_eq!(norm_squared(&h, Metric::Hyperbolic), -1.0);

    // light-like vectors have no unit representative
    let l = [1.0, 0.0, 0.0, 1.0];
    assert_eq!(normalize(&l, Metric::Hyperbolic), l.to_vec());

    let plane = normalize_plane(&[0.0, 0.0, 2.0, 5.0], Metric::Euclidean);
    assert_eq!(plane, vec![0.0, 0.0, 1.0, 2.5]);

    let mut w = [0.0, 3.0, 0.0, 4.0];
    normalize_in_place(&mut w, Metric::Elliptic);
    assert!((norm(&w, Metric::Elliptic) - 1.0).abs() < 1e-15);
}

#[test]
fn proper_points() {
    let ideal = [1.0, 0.0, 0.0, 0.0];
    assert!(!is_proper_point(&ideal, Metric::Euclidean));
    assert!(is_proper_point(&ideal, Metric::Elliptic));
    assert!(!is_proper_point(&ideal, Metric::Hyperbolic));
    assert!(!is_proper_point(&[0.0; 4], Metric::Elliptic));
    assert!(is_proper_point(&[0.5, 0.0, 0.0, 1.0], Metric::Hyperbolic));
    assert!(!is_proper_point(&[2.0, 0.0, 0.0, 1.0], Metric::Hyperbolic));
}

#[test]
fn dehomogenize_forms() {
    assert_eq!(dehomogenize(&[2.0, 4.0, 2.0]), vec![1.0, 2.0, 1.0]);
    assert_eq!(dehomogenize(&[2.0, 4.0, 1e-12]), vec![2.0, 4.0, 1e-12]);
    let mut dst = [0.0; 3];
    dehomogenize_into(&mut dst, &[3.0, 6.0, 3.0]).unwrap();
    assert_eq!(dst, [1.0, 2.0, 1.0]);
    assert!(dehomogenize_into(&mut dst, &[1.0, 1.0]).is_err());
    let mut v = [4.0, 2.0];
    dehomogenize_in_place(&mut v);
    assert_eq!(v, [2.0, 1.0]);
    assert_eq!(homogenize(&[1.0, 2.0]), vec![1.0, 2.0, 1.0]);
}

#[test]
fn plane_angles_and_form_checks() {
    let a = angle_between_planes(&[1.0, 0.0, 0.0, 0.0], &[0.0, 1.0, 0.0, 0.0], Metric::Hyperbolic)
        .unwrap();
    assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    let a = angle_between_planes(&[1.0, 0.0, 0.0, 0.0], &[1.0, 1.0, 0.0, 0.0], Metric::Euclidean)
        .unwrap();
    assert!((a - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    assert!(angle_between_planes(&[0.0; 4], &[1.0, 0.0, 0.0, 0.0], Metric::Elliptic)
        .unwrap()
        .is_nan());
    assert!(inner_product(&[1.0, 2.0], &[1.0, 2.0, 3.0], Metric::Elliptic).is_err());
    assert_eq!(
        inner_product(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0, 1.0, 1.0], Metric::Hyperbolic).unwrap(),
        2.0
    );
}
