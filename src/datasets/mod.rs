use ndarray::{Array1, ArrayBase, ArrayView1, Data, Ix1};
use num_traits::AsPrimitive;

use crate::estimators::error::{RegressionError, Result};
use crate::Float;


/// Observations
///
/// An ordered set of paired `(x, y)` samples used to fit a simple linear
/// regression. The two columns are index-aligned, hold at least two samples
/// and only finite values. Once built, an observation set is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations<F> {
    x: Array1<F>,
    y: Array1<F>,
}

impl<F: Float> Observations<F> {
    /// This method instantiates an observation set from an independent
    /// variable column `x` and a dependent variable column `y`.
    pub fn new(x: Array1<F>, y: Array1<F>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(RegressionError::LengthMismatch {
                expected: x.len(),
                found: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(RegressionError::NotEnoughSamples(x.len()));
        }
        check_finite(&x, "x")?;
        check_finite(&y, "y")?;
        Ok(Observations { x, y })
    }

    /// This method converts two numeric columns of any primitive type (for
    /// instance integers read from a table) into an observation set. The
    /// coercion to `F` happens once here, and the input slices are copied.
    pub fn from_columns<A, B>(x: &[A], y: &[B]) -> Result<Self>
    where
        A: AsPrimitive<F>,
        B: AsPrimitive<F>,
    {
        let x = x.iter().map(|&xi| xi.as_()).collect::<Array1<F>>();
        let y = y.iter().map(|&yi| yi.as_()).collect::<Array1<F>>();
        Self::new(x, y)
    }

    /// This method builds an observation set from `(x, y)` pairs.
    pub fn from_pairs<A, B, I>(pairs: I) -> Result<Self>
    where
        A: AsPrimitive<F>,
        B: AsPrimitive<F>,
        I: IntoIterator<Item = (A, B)>,
    {
        let (x, y): (Vec<F>, Vec<F>) = pairs.into_iter().map(|(a, b)| (a.as_(), b.as_())).unzip();
        Self::new(Array1::from(x), Array1::from(y))
    }

    /// This method is a getter for the independent variable column.
    pub fn x(&self) -> ArrayView1<F> {
        self.x.view()
    }

    /// This method is a getter for the dependent variable column.
    pub fn y(&self) -> ArrayView1<F> {
        self.y.view()
    }

    pub fn n_samples(&self) -> usize {
        self.x.len()
    }

    /// Iterates over the `(x, y)` pairs in their original order.
    pub fn pairs(&self) -> impl Iterator<Item = (F, F)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// This implementation block allows to build an observation set from a tuple
/// of columns, much like a design matrix and its targets.
impl<F: Float, S: Data<Elem = F>> TryFrom<(ArrayBase<S, Ix1>, ArrayBase<S, Ix1>)>
    for Observations<F>
{
    type Error = RegressionError;

    fn try_from(data: (ArrayBase<S, Ix1>, ArrayBase<S, Ix1>)) -> Result<Self> {
        Observations::new(data.0.to_owned(), data.1.to_owned())
    }
}

fn check_finite<F: Float>(column: &Array1<F>, name: &'static str) -> Result<()> {
    match column.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(RegressionError::NonFiniteValue {
            column: name,
            index,
        }),
        None => Ok(()),
    }
}
