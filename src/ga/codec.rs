//! Real/integer codec.
//!
//! Maps a bounded real interval onto the `2^bits` codes of a fixed-width
//! gene by uniform quantization over `2^bits - 1` steps:
//!
//! ```text
//! decode(c) = min + (max - min) * c / (2^bits - 1)
//! encode(x) = round((x - min) / (max - min) * (2^bits - 1))
//! ```
//!
//! The same codec decodes mutation-probability genes with `[0, 1]` bounds
//! (see [`Codec::unit`]).

use super::types::{low_mask, Gene, Real};

/// Uniform quantizer between a real interval and `bits`-bit codes.
///
/// # Examples
///
/// ```
/// use u_genetic::ga::Codec;
///
/// let codec = Codec::new(-10.0_f64, 10.0, 16);
/// assert_eq!(codec.decode(0u32), -10.0);
/// assert_eq!(codec.decode(65535u32), 10.0);
/// assert_eq!(codec.encode::<u32>(10.0), 65535);
/// ```
///
/// # Precision
///
/// Decoding goes through `f64` and ends in `R`. Adjacent codes stay
/// distinct, and `encode(decode(c)) == c` holds, only while the step
/// `(max - min) / (2^bits - 1)` is coarser than the spacing of `R` near
/// the bounds. That bounds `bits` by the mantissa width: 24 for `f32`,
/// 53 for `f64`. Wider genes (e.g. `f32` with 32 bits, or 64-bit genes)
/// still decode into `[min, max]`, but neighbouring codes collapse onto
/// the same real.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Codec<R: Real> {
    min: R,
    max: R,
    bits: u32,
}

impl<R: Real> Codec<R> {
    /// Creates a codec for `[min, max]` with `bits` significant bits.
    ///
    /// Bounds and width are checked by
    /// [`GeneticConfig::validate`](super::GeneticConfig::validate), not here.
    pub fn new(min: R, max: R, bits: u32) -> Self {
        Self { min, max, bits }
    }

    /// Codec for probabilities in `[0, 1]`.
    pub fn unit(bits: u32) -> Self {
        Self::new(R::from_f64(0.0), R::from_f64(1.0), bits)
    }

    pub fn min(&self) -> R {
        self.min
    }

    pub fn max(&self) -> R {
        self.max
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Largest code, `2^bits - 1`.
    pub fn max_code(&self) -> u64 {
        low_mask(self.bits)
    }

    /// Distance between two adjacent decoded values.
    pub fn step(&self) -> f64 {
        (self.max.to_f64() - self.min.to_f64()) / self.max_code() as f64
    }

    /// Decodes a gene into `[min, max]`.
    ///
    /// Bits above `bits` are ignored. Code `0` yields `min` and code
    /// `2^bits - 1` yields `max`, both exactly.
    pub fn decode<G: Gene>(&self, gene: G) -> R {
        let max_code = self.max_code();
        let code = gene.to_u64() & max_code;
        if code == max_code {
            return self.max;
        }
        let min = self.min.to_f64();
        let t = code as f64 / max_code as f64;
        R::from_f64(min + (self.max.to_f64() - min) * t)
    }

    /// Encodes a real value as the nearest code.
    ///
    /// Values outside `[min, max]` saturate to the boundary codes.
    pub fn encode<G: Gene>(&self, value: R) -> G {
        let max_code = self.max_code();
        let min = self.min.to_f64();
        let t = (value.to_f64() - min) / (self.max.to_f64() - min);
        let scaled = (t * max_code as f64).round();
        let code = if scaled.is_nan() || scaled <= 0.0 {
            0
        } else if scaled >= max_code as f64 {
            max_code
        } else {
            scaled as u64
        };
        G::from_u64(code)
    }
}

/// Decodes `code` into `[min, max]` using `bits` significant bits.
pub fn decode<R: Real, G: Gene>(code: G, min: R, max: R, bits: u32) -> R {
    Codec::new(min, max, bits).decode(code)
}

/// Encodes `value` from `[min, max]` into a `bits`-bit code.
pub fn encode<R: Real, G: Gene>(value: R, min: R, max: R, bits: u32) -> G {
    Codec::new(min, max, bits).encode(value)
}
