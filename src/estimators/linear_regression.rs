use ndarray::{Array1, ArrayBase, ArrayView1, Data, Ix1, Zip};
use tracing::debug;

use super::error::{RegressionError, Result};
use super::hyperparams::{LinearRegressionParams, LinearRegressionValidParams};
use super::traits::{Fit, Predict};
use crate::datasets::Observations;
use crate::helpers::helpers::is_constant;
use crate::Float;

/// Simple linear regression
///
/// The estimator fits the line `y = b0 + b1 * x` to a set of paired
/// observations with ordinary least squares, using the closed-form solution.
/// The fitted coefficients are immutable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression;

impl LinearRegression {
    /// Creates an instance of the simple linear regression with default
    /// parameters
    pub fn params<F: Float>() -> LinearRegressionParams<F> {
        LinearRegressionParams::new()
    }
}

/// A fitted simple linear regression model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedLinearRegression<F> {
    intercept: F,
    slope: F,
}

impl<F: Float> FittedLinearRegression<F> {
    /// This method is a getter for the intercept `b0`.
    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// This method is a getter for the slope `b1`.
    pub fn slope(&self) -> F {
        self.slope
    }

    /// Returns the `(b0, b1)` pair.
    pub fn coefficients(&self) -> (F, F) {
        (self.intercept, self.slope)
    }

    /// Predicts the response for a single value of the independent variable.
    /// No clamping is applied outside of the fitted range.
    pub fn predict_one(&self, x: F) -> F {
        self.intercept + self.slope * x
    }
}

/// Predictions over an arbitrary column of independent variable values,
/// in-sample or out-of-sample.
impl<'a, F: Float, S: Data<Elem = F>> Predict<&'a ArrayBase<S, Ix1>>
    for FittedLinearRegression<F>
{
    type Output = Array1<F>;

    fn predict(&self, x: &'a ArrayBase<S, Ix1>) -> Array1<F> {
        x.mapv(|xi| self.predict_one(xi))
    }
}

/// Predictions over the independent variable of an observation set.
impl<'a, F: Float> Predict<&'a Observations<F>> for FittedLinearRegression<F> {
    type Output = Array1<F>;

    fn predict(&self, dataset: &'a Observations<F>) -> Array1<F> {
        dataset.x().mapv(|xi| self.predict_one(xi))
    }
}

impl<F: Float> Fit<F, RegressionError> for LinearRegressionValidParams<F> {
    type Object = FittedLinearRegression<F>;

    /// Fits the simple linear regression to an observation set
    fn fit(&self, dataset: &Observations<F>) -> Result<Self::Object> {
        let (intercept, slope) = if self.fit_intercept() {
            least_squares(dataset.x(), dataset.y(), self.variance_threshold())?
        } else {
            let slope =
                least_squares_through_origin(dataset.x(), dataset.y(), self.variance_threshold())?;
            (F::zero(), slope)
        };
        debug!(
            n_samples = dataset.n_samples(),
            %intercept,
            %slope,
            "fitted simple linear regression"
        );
        Ok(FittedLinearRegression { intercept, slope })
    }
}

/// This function computes the ordinary least squares estimates `(b0, b1)`.
///
/// The covariance and variance sums around the means are accumulated in a
/// single pass. The slope is undefined when all the `x` values are identical
/// or when the variance sum does not exceed `variance_threshold`, in which
/// case [`RegressionError::ZeroVariance`] is returned rather than an infinite
/// or NaN slope.
pub fn least_squares<F: Float>(
    x: ArrayView1<F>,
    y: ArrayView1<F>,
    variance_threshold: F,
) -> Result<(F, F)> {
    check_aligned(x, y)?;
    // The rounded mean of a constant column may differ from its values, so
    // the variance sum alone can miss it.
    if is_constant(&x) {
        return Err(RegressionError::ZeroVariance);
    }
    let mean_x = x.mean().ok_or(RegressionError::EmptyInput)?;
    let mean_y = y.mean().ok_or(RegressionError::EmptyInput)?;

    let (covariance_sum, variance_sum) = Zip::from(&x).and(&y).fold(
        (F::zero(), F::zero()),
        |(covariance_sum, variance_sum), &xi, &yi| {
            let dx = xi - mean_x;
            (covariance_sum + dx * (yi - mean_y), variance_sum + dx * dx)
        },
    );
    debug!(%mean_x, %mean_y, %covariance_sum, %variance_sum, "least squares sums");

    if variance_sum <= variance_threshold {
        return Err(RegressionError::ZeroVariance);
    }
    let slope = covariance_sum / variance_sum;
    let intercept = mean_y - slope * mean_x;
    Ok((intercept, slope))
}

/// This function computes the least squares slope of a line constrained to
/// go through the origin, `b1 = sum(x * y) / sum(x^2)`.
pub fn least_squares_through_origin<F: Float>(
    x: ArrayView1<F>,
    y: ArrayView1<F>,
    variance_threshold: F,
) -> Result<F> {
    check_aligned(x, y)?;
    let (cross_sum, square_sum) = Zip::from(&x).and(&y).fold(
        (F::zero(), F::zero()),
        |(cross_sum, square_sum), &xi, &yi| (cross_sum + xi * yi, square_sum + xi * xi),
    );
    debug!(%cross_sum, %square_sum, "least squares sums through the origin");

    if square_sum <= variance_threshold {
        return Err(RegressionError::ZeroVariance);
    }
    Ok(cross_sum / square_sum)
}

fn check_aligned<F>(x: ArrayView1<F>, y: ArrayView1<F>) -> Result<()> {
    if x.len() != y.len() {
        Err(RegressionError::LengthMismatch {
            expected: x.len(),
            found: y.len(),
        })
    } else if x.len() < 2 {
        Err(RegressionError::NotEnoughSamples(x.len()))
    } else {
        Ok(())
    }
}
