//! PNG rendering of masks and diffraction patterns
//!
//! Rendering is stateless: every function takes the array to draw and the
//! output file and returns once the file is written.

use std::path::{Path, PathBuf};

use image::{ImageError, RgbImage};
use ndarray::ArrayView2;
use strum_macros::{Display, EnumIter, EnumString};

#[cfg(feature = "plot")]
use crate::pattern::DiffractionPattern;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to create image buffer")]
    Buffer,
    #[error("Failed to save image to png file {1:?}")]
    Save(#[source] ImageError, PathBuf),
    #[error("Failed to create the output directory")]
    Io(#[from] std::io::Error),
    #[error("Failed to draw the chart: {0}")]
    Plot(String),
}
type Result<T> = std::result::Result<T, RenderError>;

/// Color gradients, parsed from their lowercase names
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Colormap {
    /// black to white
    #[default]
    #[strum(to_string = "greys", serialize = "gray")]
    Gray,
    Cubehelix,
    Viridis,
    Plasma,
    Inferno,
    Magma,
}
impl Colormap {
    /// Color of `value`, clamped to [0,1]
    pub fn eval(&self, value: f64) -> colorous::Color {
        let t = if value.is_nan() {
            0f64
        } else {
            value.clamp(0f64, 1f64)
        };
        match self {
            Colormap::Gray => colorous::GREYS.eval_continuous(1f64 - t),
            Colormap::Cubehelix => colorous::CUBEHELIX.eval_continuous(t),
            Colormap::Viridis => colorous::VIRIDIS.eval_continuous(t),
            Colormap::Plasma => colorous::PLASMA.eval_continuous(t),
            Colormap::Inferno => colorous::INFERNO.eval_continuous(t),
            Colormap::Magma => colorous::MAGMA.eval_continuous(t),
        }
    }
}

/// Row major RGB bytes of `array`
pub fn to_rgb(array: ArrayView2<f64>, colormap: Colormap) -> Vec<u8> {
    array
        .iter()
        .flat_map(|&value| {
            let color = colormap.eval(value);
            [color.r, color.g, color.b]
        })
        .collect()
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Saves `array`, with values in [0,1], as a PNG image with one pixel per cell
pub fn save_png(array: ArrayView2<f64>, path: impl AsRef<Path>, colormap: Colormap) -> Result<()> {
    let path = path.as_ref();
    let (rows, cols) = array.dim();
    let image = RgbImage::from_raw(cols as u32, rows as u32, to_rgb(array, colormap))
        .ok_or(RenderError::Buffer)?;
    create_parent(path)?;
    image
        .save(path)
        .map_err(|e| RenderError::Save(e, path.to_path_buf()))?;
    log::info!("Saved {:?}", path);
    Ok(())
}

/// Chart options of [plot]
#[cfg(feature = "plot")]
#[derive(Debug, Clone)]
pub struct PlotOptions {
    caption: Option<String>,
    window: Option<((f64, f64), (f64, f64))>,
    colormap: Colormap,
    intensity: bool,
    size: (u32, u32),
}
#[cfg(feature = "plot")]
impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            caption: None,
            window: None,
            colormap: Colormap::default(),
            intensity: false,
            size: (768, 768),
        }
    }
}
#[cfg(feature = "plot")]
impl PlotOptions {
    pub fn caption(mut self, value: impl ToString) -> Self {
        self.caption = Some(value.to_string());
        self
    }
    /// Axis limits `xlim` and `ylim` in millimeters
    pub fn window(mut self, xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        self.window = Some((xlim, ylim));
        self
    }
    pub fn colormap(mut self, value: Colormap) -> Self {
        self.colormap = value;
        self
    }
    /// Draws the intensity instead of the field modulus
    pub fn intensity(mut self, value: bool) -> Self {
        self.intensity = value;
        self
    }
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }
    /// Axis limits in millimeters, the whole pattern if no window is set
    fn limits(&self, pattern: &DiffractionPattern) -> ((f64, f64), (f64, f64)) {
        self.window.unwrap_or_else(|| {
            let ((x_min, x_max), (y_min, y_max)) = pattern.bounds();
            let (dy, dx) = pattern.sampling();
            (
                ((x_min - 0.5 * dx) * 1e3, (x_max + 0.5 * dx) * 1e3),
                ((y_min - 0.5 * dy) * 1e3, (y_max + 0.5 * dy) * 1e3),
            )
        })
    }
}

/// Draws the diffraction pattern with observation plane axes in millimeters
#[cfg(feature = "plot")]
pub fn plot(
    pattern: &DiffractionPattern,
    path: impl AsRef<Path>,
    options: &PlotOptions,
) -> Result<()> {
    use itertools::iproduct;
    use plotters::prelude::*;

    let plot_err = |e: &dyn std::fmt::Display| RenderError::Plot(e.to_string());

    let path = path.as_ref();
    create_parent(path)?;
    let values = if options.intensity {
        pattern.intensity()
    } else {
        pattern.magnitude().to_owned()
    };
    let (rows, cols) = pattern.shape();
    let ((x_lo, x_hi), (y_lo, y_hi)) = options.limits(pattern);
    let (dy, dx) = pattern.sampling();
    let (hy, hx) = (0.5e3 * dy, 0.5e3 * dx);

    let root = BitMapBackend::new(path, options.size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| plot_err(&e))?;
    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40);
    if let Some(caption) = &options.caption {
        builder.caption(caption, ("sans-serif", 20));
    }
    let mut chart = builder
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(|e| plot_err(&e))?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x [mm]")
        .y_desc("y [mm]")
        .draw()
        .map_err(|e| plot_err(&e))?;

    chart
        .draw_series(iproduct!(0..rows, 0..cols).filter_map(|(a, b)| {
            let (x, y) = pattern.coordinates(a, b);
            let (x, y) = (x * 1e3, y * 1e3);
            if x + hx < x_lo || x - hx > x_hi || y + hy < y_lo || y - hy > y_hi {
                return None;
            }
            let c = options.colormap.eval(values[[a, b]]);
            Some(Rectangle::new(
                [(x - hx, y - hy), (x + hx, y + hy)],
                RGBColor(c.r, c.g, c.b).filled(),
            ))
        }))
        .map_err(|e| plot_err(&e))?;
    root.present().map_err(|e| plot_err(&e))?;
    log::info!("Saved {:?}", path);
    Ok(())
}
