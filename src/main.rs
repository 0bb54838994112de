use std::path::PathBuf;

use fresnel_diffraction::{render, Grid, Mask, Parameters, Simulator};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "fresnel-diffraction",
    about = "Fresnel diffraction pattern of a circular aperture"
)]
struct Opt {
    /// Wavelength [m]
    #[structopt(long, default_value = "0.6e-6")]
    wavelength: f64,
    /// Sampling period [m], 10 wavelengths if not given
    #[structopt(long)]
    sampling: Option<f64>,
    /// Propagation distance [m]
    #[structopt(short, long, default_value = "0.07")]
    distance: f64,
    /// Grid size [cells]
    #[structopt(short = "n", long, default_value = "512")]
    size: usize,
    /// Aperture radius [m]
    #[structopt(short, long, default_value = "5e-4")]
    radius: f64,
    /// Colormap: greys, cubehelix, viridis, plasma, inferno or magma
    #[structopt(short, long, default_value = "greys")]
    colormap: render::Colormap,
    /// Output directory
    #[structopt(short, long, default_value = ".")]
    output: PathBuf,
    /// Save the aperture image
    #[structopt(short, long)]
    mask: bool,
    /// Render the intensity instead of the field modulus
    #[structopt(short, long)]
    intensity: bool,
    /// Plot the pattern with physical axes
    #[structopt(short, long)]
    plot: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let parameters = Parameters::new(opt.wavelength, opt.distance)?;
    let grid = Grid::new(opt.size, opt.sampling.unwrap_or(10. * opt.wavelength))?;
    let mask = Mask::circular(&grid, opt.radius)?;
    if opt.mask {
        render::save_png(
            mask.to_real().view(),
            opt.output.join("circular_aperture.png"),
            opt.colormap,
        )?;
    }

    let pattern = Simulator::new(parameters, grid).simulate_mask(&mask)?;
    let values = if opt.intensity {
        pattern.intensity()
    } else {
        pattern.magnitude().to_owned()
    };
    render::save_png(
        values.view(),
        opt.output.join("fresnel_diffraction.png"),
        opt.colormap,
    )?;

    if opt.plot {
        #[cfg(feature = "plot")]
        render::plot(
            &pattern,
            opt.output.join("fresnel_diffraction_plot.png"),
            &render::PlotOptions::default()
                .caption(if opt.intensity {
                    "Intensity of the Fresnel diffraction pattern"
                } else {
                    "Modulus of the Fresnel diffraction pattern"
                })
                .colormap(opt.colormap)
                .intensity(opt.intensity),
        )?;
        #[cfg(not(feature = "plot"))]
        log::warn!("plotting requires the `plot` feature");
    }

    Ok(())
}
