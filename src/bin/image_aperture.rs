//! Image aperture
//!
//! Fresnel diffraction pattern of the silhouette of an image

use std::path::PathBuf;

use fresnel_diffraction::{render, Aperture, Grid, ImageAperture, Parameters, Simulator, CM, MM, NM};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "image-aperture",
    about = "Fresnel diffraction pattern of an image silhouette"
)]
struct Opt {
    /// Aperture image
    #[structopt(long, parse(from_os_str))]
    image: PathBuf,
    /// Wavelength [nm]
    #[structopt(long, default_value = "632.8")]
    wavelength: f64,
    /// Width of the image on the grid [mm]
    #[structopt(short, long, default_value = "5.6")]
    extent: f64,
    /// Number of cells across the image
    #[structopt(short = "n", long, default_value = "500")]
    size: usize,
    /// Dark margin around the image on each side [mm], it widens the grid
    #[structopt(long, default_value = "0")]
    padding: f64,
    /// Propagation distance [cm]
    #[structopt(short, long, default_value = "80")]
    distance: f64,
    /// Normalized luma above which the image transmits
    #[structopt(short, long, default_value = "0.5")]
    threshold: f64,
    /// Dark pixels transmit instead of bright ones
    #[structopt(long)]
    invert: bool,
    /// Colormap: greys, cubehelix, viridis, plasma, inferno or magma
    #[structopt(short, long, default_value = "inferno")]
    colormap: render::Colormap,
    /// Output directory
    #[structopt(short, long, default_value = ".")]
    output: PathBuf,
    /// Half width of the plot window [mm]
    #[structopt(short, long, default_value = "7")]
    window: f64,
    /// Plot the pattern with physical axes
    #[structopt(short, long)]
    plot: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let parameters = Parameters::new(opt.wavelength * NM, opt.distance * CM)?;
    let (grid, pad) = Grid::from_extent(opt.extent * MM, opt.size)?.padded(opt.padding * MM)?;
    let mask = ImageAperture::new(&opt.image)
        .padding(pad, pad)
        .threshold(opt.threshold)
        .invert(opt.invert)
        .mask(&grid)?;
    println!(
        "{:?}: {} transmitting cells out of {}",
        opt.image,
        mask.transmitting(),
        grid.rows() * grid.cols()
    );
    render::save_png(
        mask.to_real().view(),
        opt.output.join("image_aperture.png"),
        render::Colormap::Gray,
    )?;

    let pattern = Simulator::new(parameters, grid).simulate_mask(&mask)?;
    render::save_png(
        pattern.intensity().view(),
        opt.output.join("image_diffraction.png"),
        opt.colormap,
    )?;

    if opt.plot {
        #[cfg(feature = "plot")]
        render::plot(
            &pattern,
            opt.output.join("image_diffraction_plot.png"),
            &render::PlotOptions::default()
                .caption(format!("{:.0}cm", opt.distance))
                .window((-opt.window, opt.window), (-opt.window, opt.window))
                .colormap(opt.colormap)
                .intensity(true),
        )?;
        #[cfg(not(feature = "plot"))]
        log::warn!(
            "plotting the ±{}mm window requires the `plot` feature",
            opt.window
        );
    }

    Ok(())
}
