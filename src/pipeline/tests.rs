use std::cell::RefCell;
use std::fmt;

use approx::assert_abs_diff_eq;
use ndarray::array;

use super::*;
use crate::estimators::linear_regression::LinearRegression;
use crate::helpers::test_helpers::assert_array_all_close;

#[derive(Default)]
struct RecordingReporter {
    reports: Vec<RegressionReport<f64>>,
}

impl Reporter<f64> for RecordingReporter {
    fn report(&mut self, report: &RegressionReport<f64>) -> io::Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}

struct BrokenReporter;

impl Reporter<f64> for BrokenReporter {
    fn report(&mut self, _report: &RegressionReport<f64>) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
}

#[derive(Default)]
struct RecordingVisualizer {
    plots: RefCell<Vec<PlotData<f64>>>,
}

impl Visualizer<f64> for RecordingVisualizer {
    type Error = Infallible;

    fn render(&self, plot: &PlotData<f64>) -> std::result::Result<(), Infallible> {
        self.plots.borrow_mut().push(plot.clone());
        Ok(())
    }
}

#[derive(Debug)]
struct MissingTable;

impl fmt::Display for MissingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing table")
    }
}

impl StdError for MissingTable {}

struct MissingSource;

impl ObservationSource<f64> for MissingSource {
    type Error = MissingTable;

    fn load(&self) -> std::result::Result<Observations<f64>, MissingTable> {
        Err(MissingTable)
    }
}

fn noisy_observations() -> Observations<f64> {
    Observations::new(array![1., 2., 3., 4.], array![2., 3., 5., 6.]).unwrap()
}

#[test]
fn test_analyze_exact_scenario() {
    let obs = Observations::new(array![1., 2., 3.], array![2., 4., 6.]).unwrap();
    let pipeline = Pipeline::new(LinearRegression::params()).unwrap();
    let report = pipeline.analyze(obs).unwrap();

    assert_abs_diff_eq!(report.model().intercept(), 0., epsilon = 1e-12);
    assert_abs_diff_eq!(report.model().slope(), 2., epsilon = 1e-12);
    assert_array_all_close(report.predictions(), array![2., 4., 6.].view(), 1e-12);
    assert_abs_diff_eq!(report.metrics().r2(), 1., epsilon = 1e-12);
    assert_abs_diff_eq!(report.metrics().rmse(), 0., epsilon = 1e-12);
}

#[test]
fn test_analyze_noisy_scenario() {
    let pipeline = Pipeline::new(LinearRegression::params()).unwrap();
    let report = pipeline.analyze(noisy_observations()).unwrap();

    assert_abs_diff_eq!(report.model().slope(), 1.4, epsilon = 1e-12);
    assert_abs_diff_eq!(report.model().intercept(), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(report.metrics().r2(), 0.98, epsilon = 1e-12);
    assert_abs_diff_eq!(report.metrics().rmse(), 0.05_f64.sqrt(), epsilon = 1e-12);

    assert_eq!(report.out_of_sample_x(), array![53., 58., 67.]);
    assert_array_all_close(
        report.out_of_sample_predictions(),
        array![74.7, 81.7, 94.3].view(),
        1e-9,
    );
}

#[test]
fn test_custom_out_of_sample() {
    let pipeline = Pipeline::new(LinearRegression::params())
        .unwrap()
        .out_of_sample(array![-100., 0.])
        .unwrap();
    let report = pipeline.analyze(noisy_observations()).unwrap();
    assert_array_all_close(
        report.out_of_sample_predictions(),
        array![-139.5, 0.5].view(),
        1e-9,
    );
}

#[test]
fn test_non_finite_out_of_sample() {
    let res = Pipeline::new(LinearRegression::params())
        .unwrap()
        .out_of_sample(array![1., f64::NAN]);
    assert!(matches!(
        res,
        Err(RegressionError::NonFiniteValue { index: 1, .. })
    ));
}

#[test]
fn test_invalid_params() {
    let res = Pipeline::new(LinearRegression::params().variance_threshold(-1.));
    assert!(matches!(
        res,
        Err(RegressionError::InvalidVarianceThreshold(_))
    ));
}

#[test]
fn test_analyze_zero_variance() {
    let obs = Observations::new(array![2., 2., 2.], array![1., 2., 3.]).unwrap();
    let pipeline = Pipeline::new(LinearRegression::params()).unwrap();
    assert!(matches!(
        pipeline.analyze(obs),
        Err(RegressionError::ZeroVariance)
    ));
}

#[test]
fn test_analyze_constant_response() {
    let obs = Observations::new(array![1., 2., 3.], array![5., 5., 5.]).unwrap();
    let pipeline = Pipeline::new(LinearRegression::params()).unwrap();
    assert!(matches!(
        pipeline.analyze(obs),
        Err(RegressionError::ZeroTotalSumOfSquares)
    ));
}

#[test]
fn test_plot_data() {
    let obs = Observations::new(array![3., 1., 2.], array![6., 2., 4.]).unwrap();
    let pipeline = Pipeline::new(LinearRegression::params())
        .unwrap()
        .out_of_sample(array![10.])
        .unwrap();
    let plot = pipeline.analyze(obs).unwrap().plot_data();

    assert_eq!(plot.observed, vec![(3., 6.), (1., 2.), (2., 4.)]);
    let xs: Vec<f64> = plot.fitted_line.iter().map(|p| p.0).collect();
    assert_eq!(xs, vec![1., 2., 3.]);
    for (x, y) in &plot.fitted_line {
        assert_abs_diff_eq!(*y, 2. * x, epsilon = 1e-12);
    }
    assert_eq!(plot.out_of_sample.len(), 1);
    assert_abs_diff_eq!(plot.out_of_sample[0].1, 20., epsilon = 1e-12);
    assert_eq!(plot.points().count(), 7);
    assert!(!plot.is_empty());
}

#[test]
fn test_run_calls_collaborators() {
    let pipeline = Pipeline::new(LinearRegression::params()).unwrap();
    let source = noisy_observations();
    let mut reporter = RecordingReporter::default();
    let visualizer = RecordingVisualizer::default();

    let report = pipeline.run(&source, &mut reporter, &visualizer).unwrap();

    assert_eq!(reporter.reports, vec![report.clone()]);
    assert_eq!(*visualizer.plots.borrow(), vec![report.plot_data()]);
}

#[test]
fn test_run_without_visualizer() {
    let pipeline = Pipeline::new(LinearRegression::params()).unwrap();
    let mut reporter = RecordingReporter::default();
    let visualizer: Option<RecordingVisualizer> = None;
    assert!(pipeline
        .run(&noisy_observations(), &mut reporter, &visualizer)
        .is_ok());
    assert_eq!(reporter.reports.len(), 1);
}

#[test]
fn test_run_propagates_load_errors() {
    let pipeline = Pipeline::new(LinearRegression::params()).unwrap();
    let mut reporter = RecordingReporter::default();
    let visualizer = RecordingVisualizer::default();

    let res = pipeline.run(&MissingSource, &mut reporter, &visualizer);
    match res {
        Err(PipelineError::Load(e)) => assert_eq!(e.to_string(), "missing table"),
        other => panic!("expected a load error, got {:?}", other.map(|_| ())),
    }
    assert!(reporter.reports.is_empty());
    assert!(visualizer.plots.borrow().is_empty());
}

#[test]
fn test_run_propagates_regression_errors() {
    let pipeline = Pipeline::new(LinearRegression::params()).unwrap();
    let source = Observations::new(array![1., 1.], array![1., 2.]).unwrap();
    let mut reporter = RecordingReporter::default();
    let visualizer = RecordingVisualizer::default();

    let res = pipeline.run(&source, &mut reporter, &visualizer);
    assert!(matches!(
        res,
        Err(PipelineError::Regression(RegressionError::ZeroVariance))
    ));
    assert!(reporter.reports.is_empty());
}

#[test]
fn test_run_propagates_report_errors() {
    let pipeline = Pipeline::new(LinearRegression::params()).unwrap();
    let visualizer = RecordingVisualizer::default();
    let res = pipeline.run(&noisy_observations(), &mut BrokenReporter, &visualizer);
    assert!(matches!(res, Err(PipelineError::Report(_))));
    assert!(visualizer.plots.borrow().is_empty());
}
