//! Fresnel diffraction simulator

use std::time::Instant;

use crate::{
    aperture::{Aperture, ApertureError, Circular, Mask},
    grid::Grid,
    parameters::Parameters,
    pattern::DiffractionPattern,
    phase::aperture_field,
    propagation::propagate,
    Error,
};

type Result<T> = std::result::Result<T, Error>;

/// Propagates aperture masks sampled on a [Grid] to the observation plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulator {
    parameters: Parameters,
    grid: Grid,
}
impl Simulator {
    pub fn new(parameters: Parameters, grid: Grid) -> Self {
        Self { parameters, grid }
    }
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    /// Samples the `aperture` on the grid and propagates it
    pub fn simulate<A: Aperture>(&self, aperture: &A) -> Result<DiffractionPattern> {
        let mask = aperture.mask(&self.grid)?;
        self.simulate_mask(&mask)
    }
    /// Propagates a mask already sampled on the grid
    pub fn simulate_mask(&self, mask: &Mask) -> Result<DiffractionPattern> {
        mask.check_shape(&self.grid)?;
        let now = Instant::now();
        let (rows, cols) = self.grid.shape();
        log::info!(
            "Simulating {}x{} grid, sampling {:e}m, wavelength {:e}m, distance {:e}m",
            rows,
            cols,
            self.grid.sampling(),
            self.parameters.wavelength(),
            self.parameters.distance()
        );

        let n_cell = mask.transmitting();
        log::debug!("{} transmitting cells", n_cell);
        if n_cell == 0 {
            return Err(ApertureError::EmptyAperture.into());
        }
        self.check_aliasing(mask);

        let field = aperture_field(mask, &self.grid, &self.parameters)?;
        let propagated = propagate(field.view());
        let pattern = DiffractionPattern::new(
            propagated.view(),
            self.grid.observation_sampling(&self.parameters),
        )?;
        log::info!("... computed in {}ms", now.elapsed().as_millis());
        Ok(pattern)
    }
    fn check_aliasing(&self, mask: &Mask) {
        let critical_radius = self.parameters.critical_radius(self.grid.sampling());
        let max_radius = mask
            .view()
            .indexed_iter()
            .filter(|(_, m)| **m == 1)
            .map(|((a, b), _)| self.grid.radial_distance(a, b))
            .fold(0f64, f64::max);
        if max_radius > critical_radius {
            log::warn!(
                "the aperture extends to {:e}m, beyond the {:e}m radius where the quadratic phase is sampled without aliasing",
                max_radius,
                critical_radius
            );
        }
    }
}

/// Circular aperture diffraction on a `size x size` grid
///
/// All the parameters are validated before any array is allocated.
pub fn simulate(
    wavelength: f64,
    distance: f64,
    sampling: f64,
    size: usize,
    radius: f64,
) -> Result<DiffractionPattern> {
    let parameters = Parameters::new(wavelength, distance)?;
    let grid = Grid::new(size, sampling)?;
    let aperture = Circular::new(radius)?;
    Simulator::new(parameters, grid).simulate(&aperture)
}
