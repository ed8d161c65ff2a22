use super::*;

fn clusters() -> Matrix<f64> {
    Matrix::from_vec(
        6,
        2,
        vec![
            0.0, 0.0, 0.1, 0.1, 0.2, 0.0, //
            10.0, 10.0, 10.1, 10.1, 10.0, 10.2,
        ],
    )
    .expect("6x2")
}

fn dist(m: &Matrix<f64>, i: usize, j: usize) -> f64 {
    m.row(i)
        .iter()
        .zip(m.row(j))
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

#[test]
fn test_new() {
    let tsne = TSNE::new(3);
    assert_eq!(tsne.n_components(), 3);
    assert_eq!(tsne.perplexity(), 30.0);
    assert!(!tsne.is_fitted());
}

#[test]
fn test_fit_transform_shape_and_finite() {
    let mut tsne = TSNE::new(2)
        .with_perplexity(2.0)
        .with_n_iter(300)
        .with_random_state(42);
    let y = tsne.fit_transform(&clusters()).unwrap();
    assert_eq!(y.shape(), (6, 2));
    assert!(y.as_slice().iter().all(|v| v.is_finite()));
    assert!(tsne.is_fitted());
}

#[test]
fn test_preserves_clusters() {
    let mut tsne = TSNE::new(2)
        .with_perplexity(2.0)
        .with_n_iter(500)
        .with_random_state(7);
    let y = tsne.fit_transform(&clusters()).unwrap();
    let within = dist(&y, 0, 1).max(dist(&y, 3, 4));
    let between = dist(&y, 0, 3);
    assert!(between > within, "between={between} within={within}");
}

#[test]
fn test_seed_is_reproducible() {
    let run = || {
        TSNE::new(2)
            .with_perplexity(2.0)
            .with_n_iter(100)
            .with_random_state(42)
            .fit_transform(&clusters())
            .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_transform_before_fit_errors() {
    let tsne = TSNE::new(2);
    assert!(tsne.transform(&clusters()).is_err());
}

#[test]
fn test_perplexity_must_be_below_sample_count() {
    let mut tsne = TSNE::new(2).with_perplexity(6.0);
    assert!(matches!(
        tsne.fit(&clusters()),
        Err(EigenscapeError::InvalidParameter { .. })
    ));
}

#[test]
fn test_identical_points_stay_finite() {
    let x = Matrix::from_vec(4, 2, vec![1.0; 8]).unwrap();
    let y = TSNE::new(2)
        .with_perplexity(2.0)
        .with_n_iter(200)
        .with_random_state(1)
        .fit_transform(&x)
        .unwrap();
    assert!(y.as_slice().iter().all(|v| v.is_finite()));
}

#[test]
fn test_embedder_perplexity_policy() {
    let embedder = Embedder::new(2);
    assert_eq!(embedder.perplexity_for(2), 1.0);
    assert_eq!(embedder.perplexity_for(3), 2.0);
    assert_eq!(embedder.perplexity_for(31), 30.0);
    assert_eq!(embedder.perplexity_for(500), 30.0);
}

#[test]
fn test_embedder_single_sample_is_origin() {
    let x = Matrix::from_vec(1, 4, vec![3.0, -1.0, 0.0, 0.0]).unwrap();
    let y = Embedder::new(2).embed(&x).unwrap();
    assert_eq!(y.to_rows(), vec![vec![0.0, 0.0]]);
}

#[test]
fn test_embedder_two_samples() {
    let x = Matrix::from_vec(2, 2, vec![0.0, 0.0, 1.0, 1.0]).unwrap();
    let y = Embedder::new(3).with_n_iter(300).embed(&x).unwrap();
    assert_eq!(y.shape(), (2, 3));
    assert!(y.as_slice().iter().all(|v| v.is_finite()));
}

#[test]
fn test_embedder_rejects_zero_dimensions() {
    let x = Matrix::from_vec(2, 2, vec![0.0, 0.0, 1.0, 1.0]).unwrap();
    assert!(Embedder::new(0).embed(&x).is_err());
}
