use std::cmp::Ordering;
use std::convert::Infallible;
use std::error::Error as StdError;
use std::io;

use ndarray::{Array1, ArrayView1};
use thiserror::Error;
use tracing::info;

use crate::datasets::Observations;
use crate::estimators::error::{RegressionError, Result};
use crate::estimators::hyperparams::{LinearRegressionParams, LinearRegressionValidParams};
use crate::estimators::linear_regression::FittedLinearRegression;
use crate::estimators::param_guard::ParamGuard;
use crate::estimators::traits::{Fit, Predict};
use crate::helpers::helpers::argsort_by;
use crate::metrics::FitMetrics;
use crate::Float;

#[cfg(test)]
mod tests;

/// Out-of-sample values of the independent variable predicted by default.
pub const DEFAULT_OUT_OF_SAMPLE: [f64; 3] = [53., 58., 67.];

/// Input collaborator
///
/// Supplies the observation set the pipeline works on, typically by reading
/// and parsing a table.
pub trait ObservationSource<F> {
    type Error: StdError + Send + Sync + 'static;

    fn load(&self) -> std::result::Result<Observations<F>, Self::Error>;
}

/// An in-memory observation set is its own source.
impl<F: Float> ObservationSource<F> for Observations<F> {
    type Error = Infallible;

    fn load(&self) -> std::result::Result<Observations<F>, Infallible> {
        Ok(self.clone())
    }
}

/// Report collaborator
///
/// Surfaces the coefficients and the fit metrics of a regression to the user.
pub trait Reporter<F> {
    fn report(&mut self, report: &RegressionReport<F>) -> io::Result<()>;
}

/// Output collaborator
///
/// Renders the observed points, the fitted line and the out-of-sample
/// predictions. It carries no computation.
pub trait Visualizer<F> {
    type Error: StdError + Send + Sync + 'static;

    fn render(&self, plot: &PlotData<F>) -> std::result::Result<(), Self::Error>;
}

/// A missing visualizer renders nothing.
impl<F, V: Visualizer<F>> Visualizer<F> for Option<V> {
    type Error = V::Error;

    fn render(&self, plot: &PlotData<F>) -> std::result::Result<(), V::Error> {
        match self {
            Some(visualizer) => visualizer.render(plot),
            None => Ok(()),
        }
    }
}

/// Error variants from a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to load observations")]
    Load(#[source] Box<dyn StdError + Send + Sync>),
    #[error(transparent)]
    Regression(#[from] RegressionError),
    #[error("failed to write report")]
    Report(#[source] io::Error),
    #[error("failed to render plot")]
    Render(#[source] Box<dyn StdError + Send + Sync>),
}

/// Points handed to a [`Visualizer`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData<F> {
    /// Original `(x, y)` observations, in their original order
    pub observed: Vec<(F, F)>,
    /// Fitted `(x, y_pred)` pairs sorted by increasing `x`
    pub fitted_line: Vec<(F, F)>,
    /// Out-of-sample `(x, y_pred)` predictions
    pub out_of_sample: Vec<(F, F)>,
}

impl<F: Float> PlotData<F> {
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty() && self.fitted_line.is_empty() && self.out_of_sample.is_empty()
    }

    /// Iterates over every point of the three series.
    pub fn points(&self) -> impl Iterator<Item = (F, F)> + '_ {
        self.observed
            .iter()
            .chain(self.fitted_line.iter())
            .chain(self.out_of_sample.iter())
            .copied()
    }
}

/// Outcome of a regression over one observation set
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionReport<F> {
    observations: Observations<F>,
    model: FittedLinearRegression<F>,
    predictions: Array1<F>,
    metrics: FitMetrics<F>,
    out_of_sample_x: Array1<F>,
    out_of_sample_predictions: Array1<F>,
}

impl<F: Float> RegressionReport<F> {
    pub fn observations(&self) -> &Observations<F> {
        &self.observations
    }

    pub fn model(&self) -> &FittedLinearRegression<F> {
        &self.model
    }

    /// Predictions over the original values of the independent variable.
    pub fn predictions(&self) -> ArrayView1<F> {
        self.predictions.view()
    }

    pub fn metrics(&self) -> &FitMetrics<F> {
        &self.metrics
    }

    pub fn out_of_sample_x(&self) -> ArrayView1<F> {
        self.out_of_sample_x.view()
    }

    pub fn out_of_sample_predictions(&self) -> ArrayView1<F> {
        self.out_of_sample_predictions.view()
    }

    /// Builds the original points, the fitted line and the out-of-sample
    /// points for a [`Visualizer`].
    pub fn plot_data(&self) -> PlotData<F> {
        let x = self.observations.x();
        let order = argsort_by(&x, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let fitted_line = order
            .into_iter()
            .map(|i| (x[i], self.predictions[i]))
            .collect();
        let out_of_sample = self
            .out_of_sample_x
            .iter()
            .copied()
            .zip(self.out_of_sample_predictions.iter().copied())
            .collect();

        PlotData {
            observed: self.observations.pairs().collect(),
            fitted_line,
            out_of_sample,
        }
    }
}

/// Regression pipeline
///
/// Fits a simple linear regression on an observation set, predicts over the
/// original and the out-of-sample values of the independent variable,
/// evaluates the fit, then hands the results over to the reporter and the
/// visualizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline<F> {
    params: LinearRegressionValidParams<F>,
    out_of_sample: Array1<F>,
}

impl<F: Float> Pipeline<F> {
    /// Creates a pipeline from unchecked estimator parameters. The
    /// out-of-sample values default to [`DEFAULT_OUT_OF_SAMPLE`].
    pub fn new(params: LinearRegressionParams<F>) -> Result<Self> {
        Ok(Pipeline {
            params: params.check()?,
            out_of_sample: DEFAULT_OUT_OF_SAMPLE.iter().map(|&x| F::cast(x)).collect(),
        })
    }

    /// Sets the out-of-sample values of the independent variable. They may lie
    /// anywhere, including outside the observed range, but must be finite.
    pub fn out_of_sample(mut self, x: Array1<F>) -> Result<Self> {
        if let Some(index) = x.iter().position(|v| !v.is_finite()) {
            return Err(RegressionError::NonFiniteValue {
                column: "out-of-sample x",
                index,
            });
        }
        self.out_of_sample = x;
        Ok(self)
    }

    pub fn params(&self) -> &LinearRegressionValidParams<F> {
        &self.params
    }

    /// Runs the computational core: fit, predict and evaluate. This step has
    /// no side effect.
    pub fn analyze(&self, observations: Observations<F>) -> Result<RegressionReport<F>> {
        let model = self.params.fit(&observations)?;
        let predictions = model.predict(&observations);
        let metrics = FitMetrics::evaluate(&observations.y(), &predictions)?;
        let out_of_sample_predictions = model.predict(&self.out_of_sample);

        Ok(RegressionReport {
            observations,
            model,
            predictions,
            metrics,
            out_of_sample_x: self.out_of_sample.clone(),
            out_of_sample_predictions,
        })
    }

    /// Loads the observations from `source`, analyzes them, then passes the
    /// outcome to `reporter` and `visualizer`.
    pub fn run<S, R, V>(
        &self,
        source: &S,
        reporter: &mut R,
        visualizer: &V,
    ) -> std::result::Result<RegressionReport<F>, PipelineError>
    where
        S: ObservationSource<F>,
        R: Reporter<F>,
        V: Visualizer<F>,
    {
        let observations = source
            .load()
            .map_err(|e| PipelineError::Load(Box::new(e)))?;
        info!(n_samples = observations.n_samples(), "loaded observations");

        let report = self.analyze(observations)?;
        info!(
            intercept = %report.model().intercept(),
            slope = %report.model().slope(),
            r2 = %report.metrics().r2(),
            rmse = %report.metrics().rmse(),
            "fitted simple linear regression"
        );

        reporter.report(&report).map_err(PipelineError::Report)?;
        visualizer
            .render(&report.plot_data())
            .map_err(|e| PipelineError::Render(Box::new(e)))?;

        Ok(report)
    }
}
