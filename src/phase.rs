//! Fresnel quadratic phase

use ndarray::{Array2, Zip};
use num_complex::Complex64;

use crate::{
    aperture::{ApertureError, Mask},
    grid::Grid,
    parameters::Parameters,
};

/// Quadratic phase factor `exp(i π r²/(λz))` sampled on the grid
pub fn quadratic_phase(grid: &Grid, parameters: &Parameters) -> Array2<Complex64> {
    let curvature = parameters.phase_curvature();
    grid.radial_distances()
        .mapv(|r| Complex64::cis(curvature * r * r))
}

/// Field in the aperture plane: the mask times the quadratic phase
///
/// Cells outside the aperture are zero.
pub fn aperture_field(
    mask: &Mask,
    grid: &Grid,
    parameters: &Parameters,
) -> Result<Array2<Complex64>, ApertureError> {
    mask.check_shape(grid)?;
    let mut field = quadratic_phase(grid, parameters);
    Zip::from(&mut field)
        .and(mask.view())
        .for_each(|value, &m| *value *= f64::from(m));
    Ok(field)
}
