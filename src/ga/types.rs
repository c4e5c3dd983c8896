//! Core trait definitions for the binary-encoded GA.
//!
//! [`Real`] and [`Gene`] parametrize the numeric representation: the real
//! type that candidate solutions decode to, and the fixed-width unsigned
//! integer that stores each encoded value. [`FitnessFunction`] is the
//! contract between the engine and the user objective.

/// Real-valued type that genes decode to and fitness is expressed in.
///
/// Higher fitness is considered better (maximization).
///
/// Built-in implementations exist for `f64` and `f32`.
pub trait Real:
    PartialOrd + Copy + Send + Sync + std::fmt::Debug + std::fmt::Display + 'static
{
    /// Returns the lowest representable value.
    ///
    /// Used as the initial best-ever fitness so that any evaluated
    /// individual replaces it.
    fn lowest() -> Self;

    /// Converts to `f64` for codec arithmetic and logging.
    fn to_f64(self) -> f64;

    /// Converts from `f64`, rounding to the nearest representable value.
    fn from_f64(value: f64) -> Self;
}

impl Real for f64 {
    fn lowest() -> Self {
        f64::MIN
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

impl Real for f32 {
    fn lowest() -> Self {
        f32::MIN
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

/// Fixed-width unsigned integer holding one encoded value.
///
/// Only the low `integer_bits` bits of a gene are significant. Bit
/// manipulation is carried out on the `u64` widening of the gene, so a
/// gene type only has to describe its width and conversions.
pub trait Gene: Copy + Eq + Ord + Default + Send + Sync + std::fmt::Debug + 'static {
    /// Bit width of the integer type.
    const BITS: u32;

    /// Widens the gene to `u64`.
    fn to_u64(self) -> u64;

    /// Narrows a `u64` into the gene type, keeping the low `BITS` bits.
    fn from_u64(value: u64) -> Self;
}

macro_rules! impl_gene {
    ($($t:ty),*) => {
        $(
            impl Gene for $t {
                const BITS: u32 = <$t>::BITS;

                fn to_u64(self) -> u64 {
                    self as u64
                }

                fn from_u64(value: u64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_gene!(u8, u16, u32, u64);

/// Mask selecting the low `bits` bits of a `u64`.
///
/// Saturates at 64 so that full-width genes never shift out of range.
pub fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Objective function to maximize.
///
/// Receives the decoded candidate as `number_of_vectors` vectors of
/// `dimension` components and returns a score (higher is better). It must
/// be pure: the engine caches its result and may call it from several
/// threads when parallel evaluation is enabled.
///
/// Any `Fn(&[Vec<R>]) -> R + Send + Sync` closure implements this trait.
///
/// ```
/// use u_genetic::ga::FitnessFunction;
///
/// let sphere = |vectors: &[Vec<f64>]| -> f64 {
///     -vectors.iter().flatten().map(|x| x * x).sum::<f64>()
/// };
/// assert_eq!(sphere.evaluate(&[vec![1.0, 2.0]]), -5.0);
/// ```
pub trait FitnessFunction<R: Real>: Send + Sync {
    /// Scores a decoded candidate.
    fn evaluate(&self, vectors: &[Vec<R>]) -> R;
}

impl<R, F> FitnessFunction<R> for F
where
    R: Real,
    F: Fn(&[Vec<R>]) -> R + Send + Sync,
{
    fn evaluate(&self, vectors: &[Vec<R>]) -> R {
        self(vectors)
    }
}
