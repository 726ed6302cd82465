use std::error::Error as StdError;

use super::traits::Fit;
use crate::datasets::Observations;

/// Estimator settings that still need validation
///
/// Builders such as
/// [`LinearRegressionParams`](crate::estimators::hyperparams::LinearRegressionParams)
/// hand out their validated form only through this trait, so a fit can never
/// run on an invalid variance threshold. Both methods apply the same rules.
pub trait ParamGuard {
    /// Validated settings
    type Checked;
    /// Raised when a setting is out of range
    type Error: StdError;

    /// Validates in place and borrows the validated settings.
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Validates and consumes the builder.
    fn check(self) -> Result<Self::Checked, Self::Error>;
}

/// Unchecked settings fit like checked ones: validation runs first and its
/// error is converted into the estimator's error type.
impl<F, E, G> Fit<F, E> for G
where
    G: ParamGuard,
    G::Checked: Fit<F, E>,
    E: StdError + From<G::Error>,
{
    type Object = <G::Checked as Fit<F, E>>::Object;

    fn fit(&self, observations: &Observations<F>) -> Result<Self::Object, E> {
        self.check_ref()?.fit(observations)
    }
}
