use ndarray::{Array1, ArrayBase, Data, Ix1};
use ndarray_stats::DeviationExt;

use crate::estimators::error::{RegressionError, Result};
use crate::helpers::helpers::is_constant;
use crate::Float;


/// Goodness-of-fit of a prediction sequence against the observed responses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitMetrics<F> {
    r2: F,
    rmse: F,
}

impl<F: Float> FitMetrics<F> {
    /// This method evaluates both the coefficient of determination and the
    /// root-mean-squared error of `y_pred` against `y`.
    pub fn evaluate<S1, S2>(y: &ArrayBase<S1, Ix1>, y_pred: &ArrayBase<S2, Ix1>) -> Result<Self>
    where
        S1: Data<Elem = F>,
        S2: Data<Elem = F>,
    {
        Ok(FitMetrics {
            r2: r2_score(y, y_pred)?,
            rmse: root_mean_squared_error(y, y_pred)?,
        })
    }

    pub fn r2(&self) -> F {
        self.r2
    }

    pub fn rmse(&self) -> F {
        self.rmse
    }
}

/// This function computes the coefficient of determination
/// `1 - SSE / SST`, where `SSE` is the sum of squared errors of `y_pred` and
/// `SST` the total sum of squares of `y` around its mean.
///
/// The score is `1` for a perfect fit, `0` for a constant prediction equal to
/// the mean of `y`, and negative for a fit worse than that baseline. It is
/// never clamped. A constant `y` yields
/// [`RegressionError::ZeroTotalSumOfSquares`].
pub fn r2_score<F, S1, S2>(y: &ArrayBase<S1, Ix1>, y_pred: &ArrayBase<S2, Ix1>) -> Result<F>
where
    F: Float,
    S1: Data<Elem = F>,
    S2: Data<Elem = F>,
{
    check_lengths(y, y_pred)?;
    if is_constant(y) {
        return Err(RegressionError::ZeroTotalSumOfSquares);
    }
    let mean_y = y.mean().ok_or(RegressionError::EmptyInput)?;
    let baseline = Array1::from_elem(y.len(), mean_y);

    let sse = y.view().sq_l2_dist(&y_pred.view())?;
    let sst = y.view().sq_l2_dist(&baseline.view())?;
    if sst == F::zero() {
        return Err(RegressionError::ZeroTotalSumOfSquares);
    }
    Ok(F::one() - sse / sst)
}

/// Mean of the squared errors between `y` and `y_pred`.
pub fn mean_squared_error<F, S1, S2>(
    y: &ArrayBase<S1, Ix1>,
    y_pred: &ArrayBase<S2, Ix1>,
) -> Result<F>
where
    F: Float,
    S1: Data<Elem = F>,
    S2: Data<Elem = F>,
{
    check_lengths(y, y_pred)?;
    Ok(F::cast(y.view().mean_sq_err(&y_pred.view())?))
}

/// This function computes the root-mean-squared error
/// `sqrt(1 / n * sum_i (y_i - y_pred_i)^2)`, expressed in the units of `y`.
pub fn root_mean_squared_error<F, S1, S2>(
    y: &ArrayBase<S1, Ix1>,
    y_pred: &ArrayBase<S2, Ix1>,
) -> Result<F>
where
    F: Float,
    S1: Data<Elem = F>,
    S2: Data<Elem = F>,
{
    check_lengths(y, y_pred)?;
    Ok(F::cast(y.view().root_mean_sq_err(&y_pred.view())?))
}

fn check_lengths<F, S1, S2>(y: &ArrayBase<S1, Ix1>, y_pred: &ArrayBase<S2, Ix1>) -> Result<()>
where
    S1: Data<Elem = F>,
    S2: Data<Elem = F>,
{
    if y.len() != y_pred.len() {
        Err(RegressionError::LengthMismatch {
            expected: y.len(),
            found: y_pred.len(),
        })
    } else if y.is_empty() {
        Err(RegressionError::EmptyInput)
    } else {
        Ok(())
    }
}
