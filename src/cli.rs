use crate::codes::{ClassRange, ClassRanges};
use crate::config::{ExtractConfig, OutputCodes};
use crate::error::Result;
use crate::extract::{BufferOptions, InclusionPolicy};
use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Crop strictly to the boundary
    Trimmed,
    /// Keep whole urban patches touching the boundary, plus a buffer
    Buffered,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Dilate the intersecting patches only
    SelectedPatches,
    /// Dilate the boundary together with the intersecting patches
    BoundaryAndPatches,
}

impl From<Policy> for InclusionPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::SelectedPatches => InclusionPolicy::SelectedPatches,
            Policy::BoundaryAndPatches => InclusionPolicy::BoundaryAndPatches,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "urban-extract")]
#[command(about = "Extract urban/non-urban land cover around a region boundary")]
#[command(version)]
pub struct Args {
    /// Input GeoTIFF path (CORINE land cover, grid or direct codes)
    #[arg(short, long, value_name = "FILE")]
    pub input: String,

    /// Rasterized boundary GeoTIFF on the same grid as the input
    #[arg(short, long, value_name = "FILE")]
    pub boundary: String,

    /// Output GeoTIFF path (single band, u8)
    #[arg(short, long, value_name = "FILE")]
    pub output: String,

    /// Extraction mode
    #[arg(short, long, value_enum, default_value_t = Mode::Buffered)]
    pub mode: Mode,

    /// Buffer distance in the raster's linear units (buffered mode only)
    #[arg(long, value_name = "METERS", default_value_t = 100.0)]
    pub buffer_dist: f64,

    /// What to dilate in buffered mode
    #[arg(long, value_enum, default_value_t = Policy::SelectedPatches)]
    pub policy: Policy,

    /// Override nodata value (default: read from input, then 255)
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub nodata: Option<i32>,

    /// Urban class range in grid-code space
    #[arg(long, value_name = "MIN,MAX", default_value = "1,11")]
    pub urban: ClassRange,

    /// Non-urban class range in grid-code space
    #[arg(long, value_name = "MIN,MAX", default_value = "12,34")]
    pub non_urban: ClassRange,

    /// Output value for urban cells
    #[arg(long, value_name = "CODE", default_value_t = 1)]
    pub urban_code: u8,

    /// Output value for non-urban cells
    #[arg(long, value_name = "CODE", default_value_t = 2)]
    pub non_urban_code: u8,

    /// Output value for nodata cells
    #[arg(long, value_name = "CODE", default_value_t = 0)]
    pub nodata_code: u8,

    /// Output compression (DEFLATE, LZW, ZSTD or NONE)
    #[arg(long, value_name = "NAME", default_value = "DEFLATE")]
    pub compress: String,

    /// Number of threads (default: all available)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn extract_config(&self) -> Result<ExtractConfig> {
        let ranges = ClassRanges::new(self.urban, self.non_urban)?;
        let output_codes = OutputCodes::new(self.urban_code, self.non_urban_code, self.nodata_code)?;
        Ok(ExtractConfig::new(ranges, output_codes).with_raw_nodata(self.nodata))
    }

    pub fn buffer_options(&self) -> BufferOptions {
        BufferOptions::new(self.buffer_dist, self.policy.into())
    }
}
