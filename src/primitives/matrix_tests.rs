pub(crate) use super::*;

#[test]
fn test_from_vec() {
    let m: Matrix<f64> = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0) - 1.0).abs() < 1e-12);
    assert!((m.get(1, 2) - 6.0).abs() < 1e-12);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0]);
    assert!(result.is_err());
}

#[test]
fn test_from_rows_roundtrip() {
    let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    let m = Matrix::from_rows(&rows).expect("rows are rectangular");
    assert_eq!(m.shape(), (2, 2));
    assert_eq!(m.to_rows(), rows);
}

#[test]
fn test_from_rows_ragged() {
    let rows = vec![vec![1.0, 2.0], vec![3.0]];
    assert!(Matrix::from_rows(&rows).is_err());
}

#[test]
fn test_zeros() {
    let m = Matrix::zeros(2, 3);
    assert_eq!(m.shape(), (2, 3));
    assert!(m.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn test_eye() {
    let m = Matrix::eye(3);
    assert_eq!(m.get(0, 0), 1.0);
    assert_eq!(m.get(2, 2), 1.0);
    assert_eq!(m.get(0, 1), 0.0);
    assert!(m.is_square());
}

#[test]
fn test_transpose() {
    let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let t = m.transpose();
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t.get(0, 0), 1.0);
    assert_eq!(t.get(0, 1), 4.0);
    assert_eq!(t.get(2, 1), 6.0);
}

#[test]
fn test_transpose_square() {
    let m = Matrix::from_rows(&[vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])
        .expect("rows are rectangular");
    let expected = Matrix::from_rows(&[vec![1, 4, 7], vec![2, 5, 8], vec![3, 6, 9]])
        .expect("rows are rectangular");
    assert_eq!(m.transpose(), expected);
}

#[test]
fn test_row() {
    let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
}

#[test]
fn test_set() {
    let mut m = Matrix::zeros(2, 2);
    m.set(1, 0, 7.5);
    assert_eq!(m.get(1, 0), 7.5);
}

#[test]
fn test_to_dmatrix_is_row_major() {
    let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).expect("2x2");
    let d = m.to_dmatrix();
    assert_eq!(d[(0, 1)], 2.0);
    assert_eq!(d[(1, 0)], 3.0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_get_column_past_end_panics() {
    // (0, 2) would alias (1, 0) in row-major storage
    let m = Matrix::from_vec(2, 2, vec![0.0, 0.0, 5.0, 0.0]).expect("2x2 data");
    let _ = m.get(0, 2);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_set_column_past_end_panics() {
    let mut m = Matrix::<f64>::zeros(2, 2);
    m.set(0, 2, 1.0);
}
