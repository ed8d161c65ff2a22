//! End-to-end generation scenarios.

use eigenscape::constraint::satisfies_all;
use eigenscape::prelude::*;
use eigenscape::spectral::decompose;

fn binary_ranges(size: usize) -> CellRanges {
    uniform_ranges(size, CellRange::new(0.0, 1.0, 1.0))
}

fn pipeline(seed: u64) -> Pipeline {
    Pipeline::new(
        PipelineConfig::default()
            .with_seed(seed)
            .with_tsne_iterations(250),
    )
}

#[test]
fn binary_2x2_with_first_row_constraint() {
    let constraint = Constraint::new(
        vec![CellIndex::new(0, 0), CellIndex::new(0, 1)],
        ConstraintKind::SumGreater,
        1.0,
    );
    let request = GenerationRequest {
        size: 2,
        num_matrices: 3,
        dimensionality: 2,
        cell_ranges: binary_ranges(2),
        constraints: vec![constraint.clone()],
        transpose_matrix: false,
    };

    for seed in 0..10 {
        let response = pipeline(seed)
            .generate(&request, &Observer::disabled())
            .expect("constraint is satisfiable by 12 of 16 matrices");
        assert_eq!(response.matrices.len(), 3);
        for rows in &response.matrices {
            assert!(!(rows[0][0] == 0.0 && rows[0][1] == 0.0));
            let m = Matrix::from_rows(rows).unwrap();
            assert!(satisfies_all(&m, std::slice::from_ref(&constraint)));
        }
    }
}

#[test]
fn reported_eigenpairs_match_reported_matrices() {
    let request = GenerationRequest {
        size: 3,
        num_matrices: 6,
        dimensionality: 2,
        cell_ranges: uniform_ranges(3, CellRange::new(-2.0, 2.0, 1.0)),
        constraints: Vec::new(),
        transpose_matrix: false,
    };
    let response = pipeline(99)
        .generate(&request, &Observer::disabled())
        .unwrap();

    for (idx, rows) in response.matrices.iter().enumerate() {
        let m = Matrix::from_rows(rows).unwrap();
        let spectrum = decompose(&m).unwrap();
        assert_eq!(spectrum.eigenvalues, response.eigenvalues[idx]);
        assert_eq!(spectrum.eigenvectors, response.eigenvectors[idx]);
    }
}

#[test]
fn infeasible_request_is_rejected_up_front() {
    let request = GenerationRequest {
        size: 2,
        num_matrices: 20,
        dimensionality: 2,
        cell_ranges: binary_ranges(2),
        constraints: Vec::new(),
        transpose_matrix: false,
    };
    let observer = Observer::disabled();
    let err = pipeline(1).generate(&request, &observer).unwrap_err();
    assert!(err.to_string().contains("at most 16"));
    assert_eq!(observer.stats().attempts, 0);
}

#[test]
fn response_wire_format() {
    let request: GenerationRequest = serde_json::from_str(
        r#"{
            "size": 2,
            "num_matrices": 2,
            "dimensionality": 3,
            "cell_ranges": {
                "0,0": {"min": 0, "max": 0, "step": 1},
                "0,1": {"min": -1, "max": -1, "step": 1},
                "1,0": {"min": 1, "max": 1, "step": 1},
                "1,1": {"min": 0, "max": 1, "step": 1}
            },
            "constraints": [{"cells": ["1,1"], "type": "sum_equal", "value": 0}]
        }"#,
    )
    .unwrap();
    let response = pipeline(5)
        .generate(&request, &Observer::disabled())
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();

    // [[0,-1],[1,0]] has eigenvalues ±i: both reported as {real, imag}
    let eigenvalues = json["eigenvalues"][0].as_array().unwrap();
    assert!(eigenvalues.iter().all(|v| v.get("real").is_some() && v.get("imag").is_some()));
    assert_eq!(json["matrices"][0], serde_json::json!([[0.0, -1.0], [1.0, 0.0]]));
    assert_eq!(json["coordinates"][0].as_array().unwrap().len(), 3);
    assert_eq!(json["eigenvectors"][0].as_array().unwrap().len(), 2);
}

#[test]
fn sampling_exhaustion_message() {
    let request = GenerationRequest {
        size: 2,
        num_matrices: 4,
        dimensionality: 2,
        cell_ranges: binary_ranges(2),
        constraints: vec![Constraint::new(
            vec![CellIndex::new(0, 0), CellIndex::new(1, 1)],
            ConstraintKind::SumLess,
            -1.0,
        )],
        transpose_matrix: false,
    };
    let err = pipeline(3)
        .generate(&request, &Observer::disabled())
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert!(err
        .to_string()
        .starts_with("Could not generate any valid matrices in 40 attempts"));
}
