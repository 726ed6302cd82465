use ndarray_stats::errors::MultiInputError;
use thiserror::Error;

/// Simplified `Result` using [`RegressionError`](crate::estimators::error::RegressionError)
/// as error type
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Error variants from hyperparameter validation, dataset construction, model
/// estimation or model evaluation
///
/// Every variant describes an invalid input: the computations are
/// deterministic, so the same input always fails the same way.
#[derive(Debug, Error)]
pub enum RegressionError {
    /// The observation set has fewer than two samples
    #[error("at least 2 observations are required, got {0}")]
    NotEnoughSamples(usize),
    #[error("empty input: at least 1 value is required")]
    EmptyInput,
    #[error("mismatched lengths: {expected} values expected, got {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("non-finite {column} value at index {index}")]
    NonFiniteValue { column: &'static str, index: usize },
    /// All the x values are identical, the slope is undefined
    #[error("zero variance in independent variable")]
    ZeroVariance,
    /// All the observed y values are identical, R² is undefined
    #[error("zero variance in dependent variable")]
    ZeroTotalSumOfSquares,
    #[error("invalid variance threshold {0}")]
    InvalidVarianceThreshold(f32),
}

/// Deviation measures from `ndarray-stats` fail on the same conditions the
/// metrics already check, so their errors map onto the matching variants.
impl From<MultiInputError> for RegressionError {
    fn from(err: MultiInputError) -> Self {
        match err {
            MultiInputError::EmptyInput => RegressionError::EmptyInput,
            MultiInputError::ShapeMismatch(shapes) => RegressionError::LengthMismatch {
                expected: shapes.first_shape.iter().product(),
                found: shapes.second_shape.iter().product(),
            },
        }
    }
}
