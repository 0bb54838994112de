//! Aperture masks
//!
//! An [Aperture] turns a [Grid] into a binary [Mask]: 1 where the aperture
//! transmits light and 0 elsewhere.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use ndarray::{Array2, ArrayView2};

use crate::{
    grid::Grid,
    parameters::{positive, ParameterError},
};

#[derive(thiserror::Error, Debug)]
pub enum ApertureError {
    #[error("the aperture does not transmit any light")]
    EmptyAperture,
    #[error("failed to load the aperture image {path:?}")]
    ImageLoad {
        #[source]
        source: image::ImageError,
        path: PathBuf,
    },
    #[error("the silhouette shape {found:?} does not match the grid shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("invalid aperture parameter")]
    Parameter(#[from] ParameterError),
}
type Result<T> = std::result::Result<T, ApertureError>;

/// Binary transmission mask
///
/// The mask is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    cells: Array2<u8>,
}
impl Mask {
    /// Circular mask of the given `radius` centered on the grid midpoint
    pub fn circular(grid: &Grid, radius: f64) -> Result<Self> {
        Circular::new(radius)?.mask(grid)
    }
    /// Mask from a boolean silhouette, `true` cells transmit
    pub fn from_silhouette(silhouette: ArrayView2<bool>) -> Self {
        Self {
            cells: silhouette.mapv(u8::from),
        }
    }
    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }
    pub fn view(&self) -> ArrayView2<u8> {
        self.cells.view()
    }
    /// Returns `true` if cell `(a,b)` transmits
    pub fn transmits(&self, a: usize, b: usize) -> bool {
        self.cells[[a, b]] == 1
    }
    /// Number of transmitting cells
    pub fn transmitting(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }
    /// Mask as a real valued array of 0s and 1s
    pub fn to_real(&self) -> Array2<f64> {
        self.cells.mapv(f64::from)
    }
    pub(crate) fn check_shape(&self, grid: &Grid) -> Result<()> {
        if self.shape() == grid.shape() {
            Ok(())
        } else {
            Err(ApertureError::ShapeMismatch {
                expected: grid.shape(),
                found: self.shape(),
            })
        }
    }
}

/// Aperture geometry sampled on a [Grid]
pub trait Aperture {
    fn mask(&self, grid: &Grid) -> Result<Mask>;
}

/// Circular aperture of radius `radius` meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circular {
    radius: f64,
}
impl Circular {
    pub fn new(radius: f64) -> std::result::Result<Self, ParameterError> {
        Ok(Self {
            radius: positive(radius, ParameterError::Radius)?,
        })
    }
    pub fn radius(&self) -> f64 {
        self.radius
    }
}
impl Aperture for Circular {
    fn mask(&self, grid: &Grid) -> Result<Mask> {
        // cells at exactly `radius` are inside
        Ok(Mask {
            cells: Array2::from_shape_fn(grid.shape(), |(a, b)| {
                u8::from(grid.radial_distance(a, b) <= self.radius)
            }),
        })
    }
}

/// Aperture given as a binary silhouette of the same shape as the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Silhouette(Mask);
impl Silhouette {
    pub fn new(silhouette: ArrayView2<bool>) -> Self {
        Self(Mask::from_silhouette(silhouette))
    }
    /// Grid matching the silhouette shape with the given `sampling`
    pub fn grid(&self, sampling: f64) -> std::result::Result<Grid, ParameterError> {
        let (rows, cols) = self.0.shape();
        Grid::rectangular(rows, cols, sampling)
    }
}
impl Aperture for Silhouette {
    fn mask(&self, grid: &Grid) -> Result<Mask> {
        self.0.check_shape(grid)?;
        Ok(self.0.clone())
    }
}

/// Aperture derived from the silhouette of an image file
///
/// The image is converted to grayscale, resized to the grid minus `padding` cells
/// on each side and centered in the grid. Cells brighter than `threshold`
/// (normalized luma in [0,1]) transmit, or darker ones if the aperture is inverted.
#[derive(Debug, Clone)]
pub struct ImageAperture {
    path: PathBuf,
    threshold: f64,
    padding: (usize, usize),
    invert: bool,
}
impl ImageAperture {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            threshold: 0.5,
            padding: (0, 0),
            invert: false,
        }
    }
    pub fn threshold(mut self, value: f64) -> Self {
        self.threshold = value;
        self
    }
    /// Number of empty cells on each side: `rows` above and below, `cols` left and right
    pub fn padding(mut self, rows: usize, cols: usize) -> Self {
        self.padding = (rows, cols);
        self
    }
    pub fn invert(mut self, value: bool) -> Self {
        self.invert = value;
        self
    }
    fn inner_shape(&self, grid: &Grid) -> std::result::Result<(usize, usize), ParameterError> {
        let (rows, cols) = grid.shape();
        let (pad_rows, pad_cols) = self.padding;
        let inner = |n: usize, pad: usize| pad.checked_mul(2).and_then(|p| n.checked_sub(p));
        match (inner(rows, pad_rows), inner(cols, pad_cols)) {
            (Some(inner_rows), Some(inner_cols)) if inner_rows > 0 && inner_cols > 0 => {
                Ok((inner_rows, inner_cols))
            }
            _ => Err(ParameterError::Padding {
                rows,
                cols,
                pad_rows,
                pad_cols,
            }),
        }
    }
}
impl Aperture for ImageAperture {
    fn mask(&self, grid: &Grid) -> Result<Mask> {
        if !(0f64..=1f64).contains(&self.threshold) {
            return Err(ParameterError::Threshold(self.threshold).into());
        }
        let (inner_rows, inner_cols) = self.inner_shape(grid)?;
        let (pad_rows, pad_cols) = self.padding;

        let luma = image::open(&self.path)
            .map_err(|source| ApertureError::ImageLoad {
                source,
                path: self.path.clone(),
            })?
            .to_luma8();
        log::debug!(
            "Loaded {:?} ({}x{}), resizing to {}x{}",
            self.path,
            luma.width(),
            luma.height(),
            inner_cols,
            inner_rows
        );
        let luma = imageops::resize(
            &luma,
            inner_cols as u32,
            inner_rows as u32,
            FilterType::Triangle,
        );

        let rows = pad_rows..pad_rows + inner_rows;
        let cols = pad_cols..pad_cols + inner_cols;
        let cells = Array2::from_shape_fn(grid.shape(), |(a, b)| {
            if !rows.contains(&a) || !cols.contains(&b) {
                return 0;
            }
            let luma = luma.get_pixel((b - pad_cols) as u32, (a - pad_rows) as u32)[0];
            let value = f64::from(luma) / 255f64;
            u8::from((value > self.threshold) != self.invert)
        });
        Ok(Mask { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use ndarray::array;

    #[test]
    fn four_by_four_unit_radius() {
        let grid = Grid::new(4, 1f64).unwrap();
        let mask = Mask::circular(&grid, 1f64).unwrap();
        let expected = [(1, 2), (2, 1), (2, 2), (2, 3), (3, 2)];
        for a in 0..4 {
            for b in 0..4 {
                assert_eq!(mask.transmits(a, b), expected.contains(&(a, b)), "({a},{b})");
            }
        }
        assert_eq!(mask.transmitting(), 5);
    }

    #[test]
    fn boundary_cell_is_included() {
        let grid = Grid::new(16, 3e-6).unwrap();
        let radius = grid.radial_distance(3, 11);
        let mask = Mask::circular(&grid, radius).unwrap();
        assert!(mask.transmits(3, 11));
        // the symmetric cells sit at the same distance
        assert!(mask.transmits(13, 5));
        assert!(mask.transmits(11, 3));
    }

    #[test]
    fn circular_mask_is_point_symmetric() {
        for &(size, radius) in &[(32usize, 9.3f64), (33, 7f64), (64, 20f64), (7, 2.2)] {
            let grid = Grid::new(size, 1f64).unwrap();
            let mask = Mask::circular(&grid, radius).unwrap();
            for a in 1..size {
                for b in 1..size {
                    assert_eq!(
                        mask.transmits(a, b),
                        mask.transmits(size - a, size - b),
                        "size {size}: ({a},{b})"
                    );
                }
            }
        }
    }

    #[test]
    fn zero_radius_is_rejected() {
        let grid = Grid::new(4, 1f64).unwrap();
        assert!(matches!(
            Mask::circular(&grid, 0f64),
            Err(ApertureError::Parameter(ParameterError::Radius(_)))
        ));
    }

    #[test]
    fn small_radius_on_odd_grid_is_empty() {
        // the nearest cell centers are δ/√2 away from the midpoint
        let grid = Grid::new(5, 1f64).unwrap();
        let mask = Mask::circular(&grid, 0.7).unwrap();
        assert!(mask.is_empty());
        let mask = Mask::circular(&grid, 0.71).unwrap();
        assert_eq!(mask.transmitting(), 4);
    }

    #[test]
    fn silhouette_shape() {
        let silhouette = Silhouette::new(array![[false, true, false], [true, true, true]].view());
        let grid = silhouette.grid(1e-6).unwrap();
        assert_eq!(grid.shape(), (2, 3));
        let mask = silhouette.mask(&grid).unwrap();
        assert_eq!(mask.transmitting(), 4);
        assert_eq!(mask.to_real()[[0, 1]], 1f64);

        let other = Grid::new(3, 1e-6).unwrap();
        assert!(matches!(
            silhouette.mask(&other),
            Err(ApertureError::ShapeMismatch {
                expected: (3, 3),
                found: (2, 3)
            })
        ));
    }

    fn square_image(dir: &Path) -> PathBuf {
        // white 4x4 square in the middle of a black 8x8 image
        let img = GrayImage::from_fn(8, 8, |x, y| {
            if (2..6).contains(&x) && (2..6).contains(&y) {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        let path = dir.join("square.png");
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn image_silhouette() {
        let dir = tempfile::tempdir().unwrap();
        let path = square_image(dir.path());
        let grid = Grid::new(8, 1e-6).unwrap();
        let mask = ImageAperture::new(&path).mask(&grid).unwrap();
        assert_eq!(mask.transmitting(), 16);
        assert!(mask.transmits(2, 2) && mask.transmits(5, 5));
        assert!(!mask.transmits(1, 2) && !mask.transmits(6, 5));

        let inverted = ImageAperture::new(&path).invert(true).mask(&grid).unwrap();
        assert_eq!(inverted.transmitting(), 64 - 16);
    }

    #[test]
    fn padded_image_silhouette() {
        let dir = tempfile::tempdir().unwrap();
        let path = square_image(dir.path());
        let grid = Grid::new(16, 1e-6).unwrap();
        let mask = ImageAperture::new(&path)
            .padding(4, 4)
            .mask(&grid)
            .unwrap();
        // nothing transmits in the padding
        for a in 0..16 {
            for b in 0..16 {
                if a < 4 || a >= 12 || b < 4 || b >= 12 {
                    assert!(!mask.transmits(a, b));
                }
            }
        }
        assert!(mask.transmits(7, 7) && mask.transmits(8, 8));
        assert!(!mask.is_empty());
    }

    #[test]
    fn invalid_image_apertures() {
        let grid = Grid::new(8, 1e-6).unwrap();
        assert!(matches!(
            ImageAperture::new("does/not/exist.png").mask(&grid),
            Err(ApertureError::ImageLoad { .. })
        ));
        assert!(matches!(
            ImageAperture::new("does/not/exist.png")
                .padding(4, 0)
                .mask(&grid),
            Err(ApertureError::Parameter(ParameterError::Padding { .. }))
        ));
        assert!(matches!(
            ImageAperture::new("does/not/exist.png")
                .threshold(1.5)
                .mask(&grid),
            Err(ApertureError::Parameter(ParameterError::Threshold(_)))
        ));
    }
}
