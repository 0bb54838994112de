//! Optical parameters and their validation

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("the wavelength must be positive, got {0}m")]
    Wavelength(f64),
    #[error("the propagation distance must be positive, got {0}m")]
    Distance(f64),
    #[error("the sampling period must be positive, got {0}m")]
    Sampling(f64),
    #[error("the aperture radius must be positive, got {0}m")]
    Radius(f64),
    #[error("the grid must have at least one cell (rows={0}, cols={1})")]
    GridSize(usize, usize),
    #[error("a padding of ({pad_rows},{pad_cols}) cells leaves no room in a {rows}x{cols} grid")]
    Padding {
        rows: usize,
        cols: usize,
        pad_rows: usize,
        pad_cols: usize,
    },
    #[error("the padding must be finite and non-negative, got {0}m")]
    PaddingWidth(f64),
    #[error("the silhouette threshold must be within [0,1], got {0}")]
    Threshold(f64),
}
pub(crate) type Result<T> = std::result::Result<T, ParameterError>;

/// Checks that `value` is finite and strictly positive
pub(crate) fn positive(value: f64, err: fn(f64) -> ParameterError) -> Result<f64> {
    if value.is_finite() && value > 0f64 {
        Ok(value)
    } else {
        Err(err(value))
    }
}

/// Wavelength and propagation distance of a monochromatic simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    wavelength: f64,
    distance: f64,
}
impl Parameters {
    /// Creates the parameters from the wavelength `λ` and the propagation distance `z`, both in meters
    pub fn new(wavelength: f64, distance: f64) -> Result<Self> {
        Ok(Self {
            wavelength: positive(wavelength, ParameterError::Wavelength)?,
            distance: positive(distance, ParameterError::Distance)?,
        })
    }
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }
    pub fn distance(&self) -> f64 {
        self.distance
    }
    /// Returns the coefficient `π/(λz)` of the quadratic phase
    pub fn phase_curvature(&self) -> f64 {
        std::f64::consts::PI / (self.wavelength * self.distance)
    }
    /// Returns the radius beyond which the quadratic phase changes by more than π
    /// between adjacent samples of period `sampling`
    pub fn critical_radius(&self, sampling: f64) -> f64 {
        self.wavelength * self.distance / (2f64 * sampling)
    }
}
