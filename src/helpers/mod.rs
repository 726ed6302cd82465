
/// This module contains helper functions shared by the regression pipeline.
pub mod helpers {
    use crate::Float;
    use ndarray::{ArrayBase, Data, Ix1};
    use std::cmp::Ordering;

    /// This is a helper method that sorts the indices of an array based on some
    /// `compare` closure. It is used to order the fitted line by increasing
    /// values of the independent variable before it is drawn.
    /// Reference: `https://github.com/rust-ndarray/ndarray/issues/1145`
    pub fn argsort_by<S, F>(arr: &ArrayBase<S, Ix1>, mut compare: F) -> Vec<usize>
    where
        S: Data,
        F: FnMut(&S::Elem, &S::Elem) -> Ordering,
    {
        let mut indices: Vec<usize> = (0..arr.len()).collect();
        indices.sort_unstable_by(move |&i, &j| compare(&arr[i], &arr[j]));
        indices
    }

    /// This function returns the smallest and largest values of an iterator
    /// over finite floats, or `None` when the iterator is empty.
    pub fn min_max<F: Float, I: IntoIterator<Item = F>>(values: I) -> Option<(F, F)> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Whether every element equals the first one. An empty array is constant.
    pub fn is_constant<F: Float, S: Data<Elem = F>>(arr: &ArrayBase<S, Ix1>) -> bool {
        match arr.iter().next() {
            Some(&first) => arr.iter().all(|&v| v == first),
            None => true,
        }
    }
}

/// This module contains helpers functions to efficiently write tests.
pub mod test_helpers {
    use crate::Float;
    use approx::AbsDiffEq;
    use ndarray::{Array1, ArrayView1};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal, Uniform};

    pub fn assert_array_all_close<F>(x: ArrayView1<F>, y: ArrayView1<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.len(), y.len());
        for i in 0..x.len() {
            if x[i].abs_diff_ne(&y[i], delta) {
                panic!("x: {}, y: {} ; with precision level {}", x[i], y[i], delta);
            }
        }
    }

    pub fn fill_random_vector(capacity: usize, low: f64, high: f64) -> Vec<f64> {
        let mut r = StdRng::seed_from_u64(42);
        let uniform = Uniform::new(low, high);

        let mut data_x: Vec<f64> = Vec::with_capacity(capacity);
        for _ in 0..data_x.capacity() {
            data_x.push(uniform.sample(&mut r));
        }
        data_x
    }

    /// Generates `n_samples` observations of `y = intercept + slope * x + e`
    /// where `x` is drawn uniformly in `[-10, 10)` and `e` is a centered
    /// gaussian noise with standard deviation `noise_std`. The generator is
    /// seeded so that the data is reproducible.
    pub fn generate_random_data(
        n_samples: usize,
        intercept: f64,
        slope: f64,
        noise_std: f64,
    ) -> (Array1<f64>, Array1<f64>) {
        let x = Array1::from_vec(fill_random_vector(n_samples, -10., 10.));
        let mut y = x.mapv(|xi| intercept + slope * xi);

        if noise_std > 0. {
            let mut r = StdRng::seed_from_u64(7);
            let normal = Normal::new(0., noise_std).unwrap();
            y.mapv_inplace(|yi| yi + normal.sample(&mut r));
        }

        (x, y)
    }
}
