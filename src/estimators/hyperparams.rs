use super::error::{RegressionError, Result};
use super::param_guard::ParamGuard;
use crate::Float;

/// A verified hyperparameter set ready for the fitting of a simple linear
/// regression model
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionValidParams<F> {
    fit_intercept: bool,
    variance_threshold: F,
}

impl<F: Float> LinearRegressionValidParams<F> {
    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    pub fn variance_threshold(&self) -> F {
        self.variance_threshold
    }
}

/// A hyper-parameter set during construction
///
/// Configures and minimizes the following objective function:
/// ```ignore
/// sum_i (y_i - b0 - b1 * x_i)^2
/// ```
/// where `b0` is fixed to `0` when no intercept is fitted.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionParams<F>(LinearRegressionValidParams<F>);

impl<F: Float> Default for LinearRegressionParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure and fit a simple linear regression model
impl<F: Float> LinearRegressionParams<F> {
    /// Create default simple linear regression hyper parameters
    pub fn new() -> LinearRegressionParams<F> {
        Self(LinearRegressionValidParams {
            fit_intercept: true,
            variance_threshold: F::zero(),
        })
    }

    /// Whether to estimate the intercept. When disabled, the fitted line goes
    /// through the origin.
    /// Defaults to `true` if not set.
    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.0.fit_intercept = fit_intercept;
        self
    }

    /// Set the value at or below which the spread of the independent variable
    /// is considered null, in which case the slope is undefined and fitting
    /// fails.
    /// Defaults to `0` if not set.
    pub fn variance_threshold(mut self, variance_threshold: F) -> Self {
        self.0.variance_threshold = variance_threshold;
        self
    }
}

impl<F: Float> ParamGuard for LinearRegressionParams<F> {
    type Checked = LinearRegressionValidParams<F>;
    type Error = RegressionError;

    /// Validate the hyper parameters
    fn check_ref(&self) -> Result<&Self::Checked> {
        let threshold = self.0.variance_threshold;
        if threshold < F::zero() || !threshold.is_finite() {
            Err(RegressionError::InvalidVarianceThreshold(
                threshold.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
