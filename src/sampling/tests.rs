use super::*;
use crate::constraint::ConstraintKind;
use crate::domain::{build_domains, uniform_ranges, CellIndex, CellRange};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn binary_sampler(constraints: Vec<Constraint>) -> MatrixSampler {
    let domains = build_domains(2, &uniform_ranges(2, CellRange::new(0.0, 1.0, 1.0)))
        .expect("ranges cover the grid");
    MatrixSampler::new(2, domains, constraints).expect("domains match size")
}

#[test]
fn test_draw_values_come_from_domains() {
    let domains = build_domains(3, &uniform_ranges(3, CellRange::new(-1.0, 1.0, 0.5))).unwrap();
    let sampler = MatrixSampler::new(3, domains, Vec::new()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let m = sampler.draw(&mut rng);
        assert_eq!(m.shape(), (3, 3));
        for &v in m.as_slice() {
            assert!((-1.0..=1.0).contains(&v));
            assert!(((v + 1.0) / 0.5).fract().abs() < 1e-9);
        }
    }
}

#[test]
fn test_sample_reaches_target_without_constraints() {
    let sampler = binary_sampler(Vec::new());
    let mut rng = StdRng::seed_from_u64(42);
    let obs = Observer::disabled();
    let outcome = sampler.sample(3, &mut rng, &obs).unwrap();
    assert_eq!(outcome.matrices.len(), 3);
    assert_eq!(outcome.attempts, 3);
    assert_eq!(obs.stats().attempts, 3);
}

#[test]
fn test_first_row_constraint_never_violated() {
    let constraint = Constraint::new(
        vec![(0, 0).into(), (0, 1).into()],
        ConstraintKind::SumGreater,
        1.0,
    );
    let sampler = binary_sampler(vec![constraint.clone()]);
    let mut rng = StdRng::seed_from_u64(3);
    let outcome = sampler.sample(3, &mut rng, &Observer::disabled()).unwrap();
    for m in &outcome.matrices {
        assert!(constraint.is_satisfied_by(m));
        assert!(!(m.get(0, 0) == 0.0 && m.get(0, 1) == 0.0));
    }
}

#[test]
fn test_infeasible_constraint_exhausts_budget() {
    let impossible = Constraint::new(vec![(0, 0).into()], ConstraintKind::SumGreater, 5.0);
    let sampler = binary_sampler(vec![impossible]);
    let mut rng = StdRng::seed_from_u64(9);
    let obs = Observer::disabled();
    let err = sampler.sample(4, &mut rng, &obs).unwrap_err();
    match err {
        EigenscapeError::SamplingExhausted {
            accepted,
            requested,
            attempts,
        } => {
            assert_eq!(accepted, 0);
            assert_eq!(requested, 4);
            assert_eq!(attempts, 40);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(obs.stats().rejected, 40);
}

#[test]
fn test_custom_attempt_multiplier() {
    let impossible = Constraint::new(vec![(1, 1).into()], ConstraintKind::SumLess, -1.0);
    let sampler = binary_sampler(vec![impossible]).with_attempt_multiplier(3);
    assert_eq!(sampler.attempt_budget(5), 15);
    let mut rng = StdRng::seed_from_u64(0);
    let err = sampler.sample(5, &mut rng, &Observer::disabled()).unwrap_err();
    assert!(matches!(err, EigenscapeError::SamplingExhausted { attempts: 15, .. }));
}

#[test]
fn test_same_seed_same_matrices() {
    let sampler = binary_sampler(Vec::new());
    let a = sampler
        .sample(5, &mut StdRng::seed_from_u64(11), &Observer::disabled())
        .unwrap();
    let b = sampler
        .sample(5, &mut StdRng::seed_from_u64(11), &Observer::disabled())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_domain_count_must_match_size() {
    let domains = build_domains(2, &uniform_ranges(2, CellRange::new(0.0, 1.0, 1.0))).unwrap();
    assert!(MatrixSampler::new(3, domains, Vec::new()).is_err());
}

#[test]
fn test_new_rejects_out_of_bounds_constraint_cell() {
    let domains = build_domains(2, &uniform_ranges(2, CellRange::new(0.0, 1.0, 1.0))).unwrap();
    let constraint = Constraint::new(vec![CellIndex::new(0, 2)], ConstraintKind::SumGreater, 1.0);
    let err = MatrixSampler::new(2, domains, vec![constraint]).unwrap_err();
    assert!(matches!(
        err,
        EigenscapeError::CellOutOfBounds {
            row: 0,
            col: 2,
            size: 2
        }
    ));
}
