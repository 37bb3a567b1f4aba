//! Random tensor construction, mainly for parameter initialization.

use rand::Rng;
use rand::distr::StandardUniform;
use rand_distr::StandardNormal;

use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Element types that can be sampled from the standard distributions.
pub trait RandomScalar: Scalar {
    /// Sample from the uniform distribution on [0, 1).
    fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Sample from the standard normal distribution.
    fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

macro_rules! impl_random_scalar {
    ($t:ty) => {
        impl RandomScalar for $t {
            fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
                rng.sample(StandardUniform)
            }

            fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
                rng.sample(StandardNormal)
            }
        }
    };
}

impl_random_scalar!(f32);
impl_random_scalar!(f64);

impl<ElT: RandomScalar> Tensor<ElT> {
    fn sampled<F: FnMut() -> ElT>(shape: &[usize], mut sample: F) -> Self {
        let mut t = Self::zeros(shape);
        for x in t.data_mut() {
            *x = sample();
        }
        t
    }

    /// Create a tensor with uniform random values in [0, 1).
    ///
    /// # Example
    ///
    /// ```
    /// use tensorgrad::Tensor;
    ///
    /// let t: Tensor<f64> = Tensor::random(&[2, 3]);
    /// assert_eq!(t.shape(), &[2, 3]);
    /// assert!(t.data().iter().all(|&v| (0.0..1.0).contains(&v)));
    /// ```
    pub fn random(shape: &[usize]) -> Self {
        Self::random_with_rng(shape, &mut rand::rng())
    }

    /// Uniform [0, 1) values drawn from a caller-provided RNG.
    ///
    /// ```
    /// use tensorgrad::Tensor;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let t1: Tensor<f64> = Tensor::random_with_rng(&[2, 3], &mut StdRng::seed_from_u64(42));
    /// let t2: Tensor<f64> = Tensor::random_with_rng(&[2, 3], &mut StdRng::seed_from_u64(42));
    /// assert_eq!(t1, t2);
    /// ```
    pub fn random_with_rng<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Self {
        Self::sampled(shape, || ElT::sample_uniform(rng))
    }

    /// Uniform values in [low, high) drawn from a caller-provided RNG.
    pub fn uniform_with_rng<R: Rng + ?Sized>(
        shape: &[usize],
        low: ElT,
        high: ElT,
        rng: &mut R,
    ) -> Self {
        let width = high - low;
        Self::sampled(shape, || low + width * ElT::sample_uniform(rng))
    }

    /// Create a tensor with standard normal random values.
    pub fn randn(shape: &[usize]) -> Self {
        Self::randn_with_rng(shape, &mut rand::rng())
    }

    /// Standard normal values drawn from a caller-provided RNG.
    pub fn randn_with_rng<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Self {
        Self::sampled(shape, || ElT::sample_normal(rng))
    }
}
