use ndarray::ScalarOperand;

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};

use std::cmp::PartialOrd;
use std::fmt;
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

/// Float point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point
/// number and implement them for 32bit and 64bit float points.
/// Ref: https://github.com/rust-ml/linfa/blob/master/src/dataset/mod.rs#L36
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<f64>
    + for<'a> AddAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

pub mod datasets;
pub mod estimators;
pub mod helpers;
pub mod loader;
pub mod metrics;
pub mod pipeline;
pub mod plot;
pub mod report;
