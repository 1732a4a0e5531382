// Library exports for testing and reuse

pub mod classify;
pub mod cli;
pub mod codes;
pub mod config;
pub mod crop;
pub mod dilate;
pub mod error;
pub mod extract;
#[cfg(feature = "gdal")]
pub mod io;
pub mod label;
pub mod raster;
pub mod select;

// Re-export commonly used types
pub use codes::{ClassRange, ClassRanges, Codec, LandClass};
pub use config::{ExtractConfig, OutputCodes};
pub use error::{ExtractError, Result};
pub use extract::{buffered_patch_extract, trimmed_boundary_extract, BufferOptions, InclusionPolicy, OutputExtract};
pub use raster::{GeoTransform, RasterGrid, Window};
