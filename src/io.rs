use crate::error::{ensure_same_shape, ExtractError, Result};
use crate::extract::OutputExtract;
use crate::raster::{GeoTransform, RasterGrid};
use gdal::cpl::CslStringList;
use gdal::raster::{Buffer, RasterBand};
use gdal::{Dataset, DriverManager};
use log::{debug, info};
use ndarray::Array2;

/// Read the first band of a raster as `i32` along with its nodata value.
fn read_band(path: &str) -> Result<(Dataset, Array2<i32>, Option<f64>)> {
    let dataset = Dataset::open(path)?;
    let (buffer, width, height, nodata) = {
        let rasterband: RasterBand = dataset.rasterband(1)?;
        let width = rasterband.x_size();
        let height = rasterband.y_size();
        debug!("Raster dimensions: {}x{}", width, height);

        let buffer = rasterband.read_as::<i32>((0, 0), (width, height), (width, height), None)?;
        (buffer, width, height, rasterband.no_data_value())
    };

    let data_vec: Vec<i32> = buffer.into_iter().collect();
    let data = Array2::from_shape_vec((height, width), data_vec)?;

    Ok((dataset, data, nodata))
}

/// Read input land-cover raster and metadata
pub fn read_input_raster(path: &str) -> Result<RasterGrid> {
    info!("Opening input raster: {}", path);
    let (dataset, data, nodata) = read_band(path)?;

    let geotransform = GeoTransform(dataset.geo_transform()?);
    debug!(
        "Pixel size: {:.6} x {:.6}",
        geotransform.pixel_width(),
        geotransform.pixel_height()
    );

    Ok(RasterGrid::new(
        data,
        geotransform,
        nodata.map(|v| v as i32),
        dataset.projection(),
    ))
}

/// Read a rasterized boundary: cells that are neither 0 nor the band's nodata are inside.
pub fn read_boundary_mask(path: &str, expected_shape: (usize, usize)) -> Result<Array2<bool>> {
    info!("Opening boundary raster: {}", path);
    let (_, data, nodata) = read_band(path)?;
    ensure_same_shape(expected_shape, data.dim())?;

    let nodata = nodata.map(|v| v as i32);
    let mask = data.mapv(|value| value != 0 && Some(value) != nodata);
    debug!("Boundary covers {} cells", mask.iter().filter(|&&v| v).count());
    Ok(mask)
}

/// Validate compression type
pub fn validate_compression(compression: &str) -> Result<()> {
    let valid_types = ["DEFLATE", "LZW", "ZSTD", "NONE"];
    if !valid_types.contains(&compression) {
        return Err(ExtractError::InvalidCompression(compression.to_string()));
    }
    Ok(())
}

/// Write the extract as a single-band u8 GeoTIFF
pub fn write_extract(path: &str, extract: &OutputExtract, compression: &str) -> Result<()> {
    validate_compression(compression)?;
    info!(
        "Writing extract of shape {}x{} to {}",
        extract.height, extract.width, path
    );

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut options = CslStringList::new();
    options.add_string(&format!("COMPRESS={}", compression))?;

    let mut dataset = driver.create_with_band_type_with_options::<u8, _>(
        path,
        extract.width,
        extract.height,
        1,
        &options,
    )?;
    dataset.set_geo_transform(&extract.geotransform.0)?;
    dataset.set_projection(&extract.projection)?;

    let mut raster_band = dataset.rasterband(1)?;
    let mut buffer = Buffer::new(
        (extract.width, extract.height),
        extract.data.iter().copied().collect::<Vec<u8>>(),
    );
    raster_band.write((0, 0), (extract.width, extract.height), &mut buffer)?;
    raster_band.set_no_data_value(Some(f64::from(extract.nodata)))?;

    info!("Successfully wrote extract to {}", path);
    Ok(())
}
