
pub mod error;
pub mod hyperparams;
pub mod linear_regression;
pub mod param_guard;
pub mod traits;
