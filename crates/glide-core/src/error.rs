use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Carousel has no slides")]
    EmptyCarousel,

    #[error("Slide index {index} out of range (carousel has {count} slides)")]
    SlideOutOfRange { index: usize, count: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Carousel service is no longer running")]
    ServiceClosed,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
