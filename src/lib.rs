/*!
# Fresnel diffraction

Scalar Fresnel diffraction of monochromatic light through a circular or an
image-derived aperture.

The simulation samples the aperture on a [Grid](grid::Grid), multiplies the
binary [Mask](aperture::Mask) by the quadratic phase `exp(iπr²/(λz))`, takes
the centered 2D Fourier transform of the field and normalizes its modulus to
a maximum of 1.

```rust,no_run
use fresnel_diffraction::{render, simulate, MM, UM};

let wavelength = 0.6 * UM;
let pattern = simulate(wavelength, 70. * MM, 10. * wavelength, 512, 0.5 * MM)?;
render::save_png(pattern.magnitude(), "fresnel.png", render::Colormap::Gray)?;
# Ok::<(), fresnel_diffraction::Error>(())
```
*/

pub mod aperture;
mod error;
pub mod grid;
pub mod parameters;
pub mod pattern;
pub mod phase;
pub mod propagation;
pub mod render;
mod simulator;

pub use aperture::{Aperture, Circular, ImageAperture, Mask, Silhouette};
pub use error::Error;
pub use grid::Grid;
pub use parameters::Parameters;
pub use pattern::DiffractionPattern;
pub use simulator::{simulate, Simulator};

/// Nanometer in meters
pub const NM: f64 = 1e-9;
/// Micrometer in meters
pub const UM: f64 = 1e-6;
/// Millimeter in meters
pub const MM: f64 = 1e-3;
/// Centimeter in meters
pub const CM: f64 = 1e-2;
/// Meter
pub const M: f64 = 1f64;
