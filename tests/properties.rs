//! Property-based tests for the evaluator and the matrix kernel.
//!
//! Scripts are generated with random numeric literals and run through
//! `run_source`; matrix properties are checked directly on the kernel.

use mava::{
    interpreter::{io::IoHandler, linalg::matrix::Matrix},
    run_source,
};
use proptest::prelude::*;

fn number() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6
}

fn vector(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(number(), 1..=max_len)
}

fn square_matrix() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1..=4usize).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(-9i32..=9, n), n))
                .prop_map(|rows| {
                    rows.into_iter()
                        .map(|row| row.into_iter().map(f64::from).collect())
                        .collect()
                })
}

fn small_square_matrix() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1..=3usize).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(-5i32..=5, n), n))
                .prop_map(|rows| {
                    rows.into_iter()
                        .map(|row| row.into_iter().map(f64::from).collect())
                        .collect()
                })
}

fn matrix_literal(rows: &[Vec<f64>]) -> String {
    let rows = rows.iter().map(|row| list_literal(row)).collect::<Vec<_>>();
    format!("[{}]", rows.join(", "))
}

fn list_literal(values: &[f64]) -> String {
    let items = values.iter().map(f64::to_string).collect::<Vec<_>>();
    format!("[{}]", items.join(", "))
}

fn run(source: &str) -> Result<String, String> {
    let mut io = IoHandler::buffer();
    run_source(source, &mut io).map(|_| io.output().to_string())
                               .map_err(|e| format!("{e}\n{source}"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    #[test]
    fn addition_commutes(a in number(), b in number()) {
        let source = format!("assert({a} + {b} == {b} + {a})");
        prop_assert!(run(&source).is_ok(), "{}", run(&source).unwrap_err());
    }

    #[test]
    fn numbers_equal_themselves(a in number()) {
        let ok = run(&format!("assert({a} == {a})")).is_ok();
        prop_assert!(ok);
    }

    #[test]
    fn vectors_equal_themselves(v in vector(8)) {
        let literal = list_literal(&v);
        let ok = run(&format!("v = {literal}\nassert(v == {literal})")).is_ok();
        prop_assert!(ok);
    }

    #[test]
    fn transposed_vector_is_one_row(v in vector(8)) {
        let source = format!("t = transpose({})\nprintln(rows(t))\nprintln(columns(t))",
                             list_literal(&v));
        prop_assert_eq!(run(&source).unwrap(), format!("1\n{}\n", v.len()));
    }

    #[test]
    fn vector_dimensions(v in vector(8)) {
        let source = format!("v = {}\nprintln(rows(v))\nprintln(columns(v))", list_literal(&v));
        prop_assert_eq!(run(&source).unwrap(), format!("{}\n1\n", v.len()));
    }

    #[test]
    fn determinant_is_invariant_under_transpose(rows in square_matrix()) {
        let m = Matrix::from_rows(rows).unwrap();
        let det = m.determinant().unwrap();
        let det_t = m.transpose().determinant().unwrap();
        prop_assert!((det - det_t).abs() <= 1e-9 * (1.0 + det.abs()),
                     "{det} != {det_t}");
    }

    #[test]
    fn determinant_of_transpose_in_the_language(rows in small_square_matrix()) {
        let source = format!("m = {}\nassert(determinant(m) == determinant(transpose(m)))",
                             matrix_literal(&rows));
        let result = run(&source);
        prop_assert!(result.is_ok(), "{}", result.unwrap_err());
    }

    #[test]
    fn transpose_is_an_involution(rows in square_matrix()) {
        let m = Matrix::from_rows(rows).unwrap();
        prop_assert_eq!(m.transpose().transpose(), m);
    }
}
