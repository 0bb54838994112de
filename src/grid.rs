//! Sampling grid of the aperture plane

use ndarray::Array2;

use crate::parameters::{positive, ParameterError, Parameters, Result};

/// A `rows x cols` grid with square cells of side `sampling` meters
///
/// The coordinate origin is the grid midpoint `(rows/2, cols/2)` in 0-based indices,
/// evaluated in real arithmetic so odd sizes are centered between cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    sampling: f64,
}
impl Grid {
    /// Square `size x size` grid
    pub fn new(size: usize, sampling: f64) -> Result<Self> {
        Self::rectangular(size, size, sampling)
    }
    pub fn rectangular(rows: usize, cols: usize, sampling: f64) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ParameterError::GridSize(rows, cols));
        }
        Ok(Self {
            rows,
            cols,
            sampling: positive(sampling, ParameterError::Sampling)?,
        })
    }
    /// Square grid of `size` cells spanning `extent` meters
    pub fn from_extent(extent: f64, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(ParameterError::GridSize(size, size));
        }
        let extent = positive(extent, ParameterError::Sampling)?;
        Self::new(size, extent / size as f64)
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    pub fn sampling(&self) -> f64 {
        self.sampling
    }
    /// Physical size `(height, width)` of the grid in meters
    pub fn extent(&self) -> (f64, f64) {
        (
            self.rows as f64 * self.sampling,
            self.cols as f64 * self.sampling,
        )
    }
    /// Grid midpoint in (fractional) 0-based indices
    pub fn center(&self) -> (f64, f64) {
        (self.rows as f64 / 2f64, self.cols as f64 / 2f64)
    }
    /// Distance in meters from the grid midpoint to the center of cell `(a,b)`
    pub fn radial_distance(&self, a: usize, b: usize) -> f64 {
        let (ca, cb) = self.center();
        let (da, db) = (a as f64 - ca, b as f64 - cb);
        self.sampling * (da * da + db * db).sqrt()
    }
    pub fn radial_distances(&self) -> Array2<f64> {
        Array2::from_shape_fn(self.shape(), |(a, b)| self.radial_distance(a, b))
    }
    /// Grows the grid by `padding` meters on each side, keeping the sampling
    ///
    /// Returns the padded grid and the number of cells added on each side.
    pub fn padded(&self, padding: f64) -> Result<(Self, usize)> {
        if !padding.is_finite() || padding < 0f64 {
            return Err(ParameterError::PaddingWidth(padding));
        }
        let cells = (padding / self.sampling).round() as usize;
        let grow = |n: usize| cells.checked_mul(2).and_then(|p| n.checked_add(p));
        match (grow(self.rows), grow(self.cols)) {
            (Some(rows), Some(cols)) => Ok((Self::rectangular(rows, cols, self.sampling)?, cells)),
            _ => Err(ParameterError::PaddingWidth(padding)),
        }
    }
    /// Sampling `(rows, cols)` of the observation plane at the distance given in `parameters`
    pub fn observation_sampling(&self, parameters: &Parameters) -> (f64, f64) {
        let lz = parameters.wavelength() * parameters.distance();
        let (height, width) = self.extent();
        (lz / height, lz / width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_matches_one_based_midpoint() {
        // (M/2+1, M/2+1) in 1-based indexing
        let grid = Grid::new(512, 6e-6).unwrap();
        assert_eq!(grid.center(), (256f64, 256f64));
        assert_eq!(grid.radial_distance(256, 256), 0f64);
        let grid = Grid::new(5, 1f64).unwrap();
        assert_eq!(grid.center(), (2.5, 2.5));
    }

    #[test]
    fn radial_distance() {
        let grid = Grid::new(4, 2f64).unwrap();
        assert_eq!(grid.radial_distance(2, 3), 2f64);
        assert_eq!(grid.radial_distance(0, 2), 4f64);
        assert!((grid.radial_distance(0, 0) - 4f64 * 2f64.sqrt()).abs() < 1e-12);
        let rr = grid.radial_distances();
        assert_eq!(rr.dim(), (4, 4));
        assert_eq!(rr[[2, 3]], 2f64);
    }

    #[test]
    fn rectangular_center() {
        let grid = Grid::rectangular(4, 6, 1f64).unwrap();
        assert_eq!(grid.shape(), (4, 6));
        assert_eq!(grid.center(), (2f64, 3f64));
        assert_eq!(grid.radial_distance(2, 3), 0f64);
    }

    #[test]
    fn from_extent() {
        let grid = Grid::from_extent(5.6e-3, 500).unwrap();
        assert!((grid.sampling() - 11.2e-6).abs() < 1e-18);
        assert!((grid.extent().1 - 5.6e-3).abs() < 1e-15);
    }

    #[test]
    fn invalid_grids() {
        assert_eq!(Grid::new(0, 1f64), Err(ParameterError::GridSize(0, 0)));
        assert_eq!(
            Grid::rectangular(3, 0, 1f64),
            Err(ParameterError::GridSize(3, 0))
        );
        assert_eq!(Grid::new(4, 0f64), Err(ParameterError::Sampling(0f64)));
        assert!(Grid::new(4, -1e-6).is_err());
        assert!(Grid::from_extent(0f64, 4).is_err());
    }

    #[test]
    fn padded() {
        let grid = Grid::rectangular(6, 4, 0.5).unwrap();
        let (padded, cells) = grid.padded(1f64).unwrap();
        assert_eq!(cells, 2);
        assert_eq!(padded.shape(), (10, 8));
        assert_eq!(padded.sampling(), 0.5);
        assert_eq!(grid.padded(0f64).unwrap(), (grid, 0));
        assert_eq!(grid.padded(-1f64), Err(ParameterError::PaddingWidth(-1f64)));
        assert!(grid.padded(f64::NAN).is_err());
        assert!(grid.padded(1e300).is_err());
    }

    #[test]
    fn observation_sampling() {
        let params = Parameters::new(0.5e-6, 1f64).unwrap();
        let grid = Grid::rectangular(100, 200, 1e-5).unwrap();
        let (dy, dx) = grid.observation_sampling(&params);
        assert!((dy - 0.5e-3).abs() < 1e-15);
        assert!((dx - 0.25e-3).abs() < 1e-15);
    }
}
