use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("handlebars encountered an error while rendering")]
    HandlebarsRender(#[from] handlebars::RenderError),

    #[error("io error")]
    Io(#[from] io::Error),
}
