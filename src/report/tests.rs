use ndarray::{array, Array1};

use super::*;
use crate::datasets::Observations;
use crate::estimators::linear_regression::LinearRegression;
use crate::pipeline::Pipeline;

fn render(pipeline: Pipeline<f64>) -> String {
    let obs = Observations::new(array![1., 2., 3.], array![2., 4., 6.]).unwrap();
    let report = pipeline.analyze(obs).unwrap();
    let mut reporter = ConsoleReporter::new(Vec::new());
    reporter.report(&report).unwrap();
    String::from_utf8(reporter.into_inner()).unwrap()
}

#[test]
fn test_report_lines() {
    let pipeline = Pipeline::new(LinearRegression::params())
        .unwrap()
        .out_of_sample(array![10., 20.])
        .unwrap();
    let text = render(pipeline);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "B0 = 0, B1 = 2",
            "R2: 1",
            "RMSE: 0",
            "Predictions:",
            "  x = 10 -> y = 20",
            "  x = 20 -> y = 40",
        ]
    );
}

#[test]
fn test_report_without_out_of_sample() {
    let pipeline = Pipeline::new(LinearRegression::params())
        .unwrap()
        .out_of_sample(Array1::zeros(0))
        .unwrap();
    let text = render(pipeline);
    assert_eq!(text.lines().count(), 3);
    assert!(!text.contains("Predictions"));
}
