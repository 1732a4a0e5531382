use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("GDAL error: {0}")]
    Gdal(String),

    #[error("Array shape error: {0}")]
    ArrayShape(#[from] ndarray::ShapeError),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Mask shape {actual:?} does not match raster shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Raw value {0} fits neither the grid-code nor the direct-code space")]
    UnsupportedCodec(i32),

    #[error("Inclusion mask has no true cells, nothing to extract")]
    EmptyExtract,

    #[error("Invalid compression type: {0}")]
    InvalidCompression(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(feature = "gdal")]
impl From<gdal::errors::GdalError> for ExtractError {
    fn from(err: gdal::errors::GdalError) -> Self {
        ExtractError::Gdal(err.to_string())
    }
}

/// Fails with [`ExtractError::ShapeMismatch`] unless both shapes are equal.
pub fn ensure_same_shape(expected: (usize, usize), actual: (usize, usize)) -> Result<()> {
    if expected != actual {
        return Err(ExtractError::ShapeMismatch { expected, actual });
    }
    Ok(())
}
