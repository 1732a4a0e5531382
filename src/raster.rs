use log::warn;
use ndarray::Array2;

/// Affine transform in GDAL order: `[x0, pixel_width, row_rotation, y0, col_rotation, pixel_height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    pub fn pixel_width(&self) -> f64 {
        self.0[1].abs()
    }

    pub fn pixel_height(&self) -> f64 {
        self.0[5].abs()
    }

    /// Geographic position of the top-left corner of cell `(row, col)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> (f64, f64) {
        let [x0, a, b, y0, d, e] = self.0;
        let (row, col) = (row as f64, col as f64);
        (x0 + col * a + row * b, y0 + col * d + row * e)
    }

    /// Transform of a sub-window: the origin moves to the window's top-left
    /// corner, every other term is kept.
    pub fn window_transform(&self, window: &Window) -> GeoTransform {
        let (x, y) = self.cell_origin(window.row_off, window.col_off);
        let [_, a, b, _, d, e] = self.0;
        GeoTransform([x, a, b, y, d, e])
    }
}

impl From<[f64; 6]> for GeoTransform {
    fn from(value: [f64; 6]) -> Self {
        GeoTransform(value)
    }
}

/// Rectangular block of cells in source-grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub row_off: usize,
    pub col_off: usize,
    pub height: usize,
    pub width: usize,
}

impl Window {
    pub fn row_end(&self) -> usize {
        self.row_off + self.height
    }

    pub fn col_end(&self) -> usize {
        self.col_off + self.width
    }
}

/// Single-band land-cover raster as handed over by the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    pub data: Array2<i32>,
    pub geotransform: GeoTransform,
    pub nodata: Option<i32>,
    /// Passed through to the extract untouched.
    pub projection: String,
}

impl RasterGrid {
    pub fn new(data: Array2<i32>, geotransform: GeoTransform, nodata: Option<i32>, projection: String) -> Self {
        Self {
            data,
            geotransform,
            nodata,
            projection,
        }
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Linear size of a cell, taken from the pixel width.
    pub fn resolution(&self) -> f64 {
        let (width, height) = (self.geotransform.pixel_width(), self.geotransform.pixel_height());
        if (width - height).abs() > 1e-9 {
            warn!(
                "Non-square pixels detected ({:.6} x {:.6}), using width as resolution",
                width, height
            );
        }
        width
    }
}
