//! Real-or-complex scalar.

use nalgebra::Complex;
use serde::{Deserialize, Serialize};

/// A spectral scalar.
///
/// Serializes as a bare number when real and as `{"real", "imag"}` when
/// complex.
///
/// # Examples
///
/// ```
/// use eigenscape::spectral::Scalar;
/// use nalgebra::Complex;
///
/// assert_eq!(Scalar::from(Complex::new(2.0, 0.0)), Scalar::Real(2.0));
/// let z = Scalar::from(Complex::new(1.0, -0.5));
/// assert_eq!(serde_json::to_string(&z).unwrap(), r#"{"real":1.0,"imag":-0.5}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Imaginary part exactly zero.
    Real(f64),
    /// Genuinely complex value.
    Complex {
        /// Real part.
        real: f64,
        /// Imaginary part (non-zero).
        imag: f64,
    },
}

impl Scalar {
    /// Real part.
    #[must_use]
    pub fn re(&self) -> f64 {
        match *self {
            Scalar::Real(x) => x,
            Scalar::Complex { real, .. } => real,
        }
    }

    /// Imaginary part (zero for [`Scalar::Real`]).
    #[must_use]
    pub fn im(&self) -> f64 {
        match *self {
            Scalar::Real(_) => 0.0,
            Scalar::Complex { imag, .. } => imag,
        }
    }

    /// Whether the value is real.
    #[must_use]
    pub fn is_real(&self) -> bool {
        matches!(self, Scalar::Real(_))
    }

    /// Complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        match *self {
            Scalar::Real(x) => Scalar::Real(x),
            Scalar::Complex { real, imag } => Scalar::Complex { real, imag: -imag },
        }
    }

    /// As an nalgebra complex number.
    #[must_use]
    pub fn to_complex(&self) -> Complex<f64> {
        Complex::new(self.re(), self.im())
    }
}

impl From<Complex<f64>> for Scalar {
    fn from(z: Complex<f64>) -> Self {
        if z.im == 0.0 {
            Scalar::Real(z.re)
        } else {
            Scalar::Complex {
                real: z.re,
                imag: z.im,
            }
        }
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Real(x)
    }
}
