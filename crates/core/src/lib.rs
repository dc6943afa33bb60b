pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod percentage;
pub mod record;
pub mod segment;
pub mod view;

pub use dataset::Dataset;
pub use error::Error;
pub use percentage::SharePercentage;
pub use segment::SegmentError;
pub use view::Selection;

pub type Result<T> = std::result::Result<T, Error>;
