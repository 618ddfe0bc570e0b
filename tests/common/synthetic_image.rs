use lsd_detector::Grid;

/// Horizontal gradient band: intensity ramps by `step` per row over rows
/// `y0..y0 + band`, constant above and below. The gradient field then holds
/// `band` rows of identical level-line angle spanning the full width.
pub fn band_image(width: usize, height: usize, y0: usize, band: usize, step: f64) -> Grid<f64> {
    bands_image(width, height, &[(y0, band)], step)
}

/// Several independent ramps, see [`band_image`].
pub fn bands_image(width: usize, height: usize, bands: &[(usize, usize)], step: f64) -> Grid<f64> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = Grid::new(width, height);
    for y in 0..height {
        let value: f64 = bands
            .iter()
            .map(|&(y0, band)| step * (y as f64 - y0 as f64).clamp(0.0, band as f64))
            .sum();
        for x in 0..width {
            img.set(x, y, value);
        }
    }
    img
}

/// Dark-to-bright step edge at row `edge_y`.
pub fn step_edge_u8(width: usize, height: usize, edge_y: usize, low: u8, high: u8) -> Vec<u8> {
    let mut img = vec![low; width * height];
    for px in img.iter_mut().skip(edge_y * width) {
        *px = high;
    }
    img
}

pub fn flat_image(width: usize, height: usize, value: f64) -> Grid<f64> {
    Grid::filled(width, height, value)
}
