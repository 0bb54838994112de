use crate::{aperture::ApertureError, parameters::ParameterError, render::RenderError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid simulation parameter")]
    InvalidParameter(#[from] ParameterError),
    #[error("Error in the `aperture` module")]
    Aperture(#[from] ApertureError),
    #[error("Error in the `render` module")]
    Render(#[from] RenderError),
}
impl Error {
    /// Returns `true` if the aperture does not transmit any light
    pub fn is_empty_aperture(&self) -> bool {
        matches!(self, Error::Aperture(ApertureError::EmptyAperture))
    }
}
