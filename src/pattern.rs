//! Normalized diffraction pattern

use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;

use crate::aperture::ApertureError;

/// Elementwise magnitude of `field` divided by its maximum
///
/// An all-zero field has no maximum to normalize by and is reported as an
/// [ApertureError::EmptyAperture].
pub fn normalize(field: ArrayView2<Complex64>) -> Result<Array2<f64>, ApertureError> {
    let magnitude = field.mapv(|z| z.norm());
    let peak = magnitude.iter().cloned().fold(0f64, f64::max);
    log::debug!("peak field magnitude: {:e}", peak);
    if peak > 0f64 && peak.is_finite() {
        Ok(magnitude.mapv_into(|x| x / peak))
    } else {
        Err(ApertureError::EmptyAperture)
    }
}

/// Modulus of the propagated field, normalized to a maximum of 1
#[derive(Debug, Clone, PartialEq)]
pub struct DiffractionPattern {
    magnitude: Array2<f64>,
    sampling: (f64, f64),
}
impl DiffractionPattern {
    /// Normalizes the propagated `field` sampled every `sampling = (rows, cols)` meters
    pub fn new(field: ArrayView2<Complex64>, sampling: (f64, f64)) -> Result<Self, ApertureError> {
        Ok(Self {
            magnitude: normalize(field)?,
            sampling,
        })
    }
    pub fn shape(&self) -> (usize, usize) {
        self.magnitude.dim()
    }
    /// Normalized field modulus, values in [0,1]
    pub fn magnitude(&self) -> ArrayView2<f64> {
        self.magnitude.view()
    }
    pub fn into_magnitude(self) -> Array2<f64> {
        self.magnitude
    }
    /// Normalized intensity, the squared modulus
    pub fn intensity(&self) -> Array2<f64> {
        self.magnitude.mapv(|x| x * x)
    }
    /// Observation plane sampling `(rows, cols)` in meters
    pub fn sampling(&self) -> (f64, f64) {
        self.sampling
    }
    /// Observation plane coordinates `(x, y)` in meters of cell `(a,b)`
    ///
    /// `x` grows with the column index and `y` decreases with the row index,
    /// the zero frequency cell `(rows/2, cols/2)` is at the origin.
    pub fn coordinates(&self, a: usize, b: usize) -> (f64, f64) {
        let (rows, cols) = self.shape();
        let (dy, dx) = self.sampling;
        (
            (b as f64 - (cols / 2) as f64) * dx,
            ((rows / 2) as f64 - a as f64) * dy,
        )
    }
    /// Observation plane bounds `((x_min, x_max), (y_min, y_max))` in meters
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let (rows, cols) = self.shape();
        let (x_min, y_max) = self.coordinates(0, 0);
        let (x_max, y_min) = self.coordinates(rows - 1, cols - 1);
        ((x_min, x_max), (y_min, y_max))
    }
}
