use crate::codes::{ClassRanges, LandClass};
use crate::error::{ExtractError, Result};

/// Historical nodata sentinel of grid-code CORINE rasters.
pub const DEFAULT_RAW_NODATA: i32 = 255;

/// Values written to the extract for each canonical class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCodes {
    pub urban: u8,
    pub non_urban: u8,
    pub nodata: u8,
}

impl OutputCodes {
    pub fn new(urban: u8, non_urban: u8, nodata: u8) -> Result<Self> {
        if urban == non_urban || urban == nodata || non_urban == nodata {
            return Err(ExtractError::Configuration(format!(
                "output codes must be distinct (urban={}, non-urban={}, nodata={})",
                urban, non_urban, nodata
            )));
        }
        Ok(Self {
            urban,
            non_urban,
            nodata,
        })
    }

    pub fn code_for(&self, class: LandClass) -> u8 {
        match class {
            LandClass::Urban => self.urban,
            LandClass::NonUrban => self.non_urban,
            LandClass::Nodata => self.nodata,
        }
    }
}

impl Default for OutputCodes {
    fn default() -> Self {
        Self {
            urban: 1,
            non_urban: 2,
            nodata: 0,
        }
    }
}

/// Everything the extraction needs besides the rasters themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub ranges: ClassRanges,
    pub output_codes: OutputCodes,
    /// Takes precedence over the raster's own nodata value.
    pub raw_nodata_override: Option<i32>,
    /// Used when neither an override nor a raster nodata value is present.
    pub fallback_raw_nodata: i32,
}

impl ExtractConfig {
    pub fn new(ranges: ClassRanges, output_codes: OutputCodes) -> Self {
        Self {
            ranges,
            output_codes,
            ..Self::default()
        }
    }

    pub fn with_raw_nodata(mut self, nodata: Option<i32>) -> Self {
        self.raw_nodata_override = nodata;
        self
    }

    /// Raw value treated as nodata for a raster that declares `raster_nodata`.
    pub fn raw_nodata(&self, raster_nodata: Option<i32>) -> i32 {
        self.raw_nodata_override
            .or(raster_nodata)
            .unwrap_or(self.fallback_raw_nodata)
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            ranges: ClassRanges::default(),
            output_codes: OutputCodes::default(),
            raw_nodata_override: None,
            fallback_raw_nodata: DEFAULT_RAW_NODATA,
        }
    }
}
