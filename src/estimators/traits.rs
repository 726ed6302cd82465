use crate::datasets::Observations;

/// Fit trait
///
/// The fittable trait allows an estimator to be fitted to a set of paired
/// observations. More formally, the model estimates the coefficients that
/// minimize an empirical risk (here, the sum of squared residuals).
pub trait Fit<F, E: std::error::Error> {
    type Object;

    fn fit(&self, dataset: &Observations<F>) -> Result<Self::Object, E>;
}

/// Predict trait
///
/// A fitted model maps some input (a column of independent variable values, or
/// a whole observation set) to predicted responses. Prediction never fails.
pub trait Predict<X> {
    type Output;

    fn predict(&self, x: X) -> Self::Output;
}
