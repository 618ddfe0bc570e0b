//! Owned single-channel grid in row-major layout (stride == width).
//!
//! Every stage of the detector reads and writes `Grid`s: intensities, the
//! gradient field and the used-pixel markers. Row access and a contiguous
//! slice are available through [`ImageView`].
use super::traits::{ImageView, ImageViewMut};
use super::u8::ImageU8;
use crate::error::LsdError;

#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    /// Grid width in pixels
    pub w: usize,
    /// Grid height in pixels
    pub h: usize,
    /// Number of elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<T>,
}

/// Intensity grid consumed by the detector.
pub type ImageF64 = Grid<f64>;

impl<T: Copy + Default> Grid<T> {
    /// Construct a default-initialized grid of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, T::default())
    }
}

impl<T: Copy> Grid<T> {
    pub fn filled(w: usize, h: usize, value: T) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Wrap an existing row-major buffer. Fails when `data.len() != w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<T>) -> Result<Self, LsdError> {
        if data.len() != w * h {
            return Err(LsdError::BufferSize {
                width: w,
                height: h,
                len: data.len(),
            });
        }
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Signed bounds check used by neighbourhood scans.
    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

impl Grid<f64> {
    /// Extract intensities from an 8-bit grayscale view, keeping the 0..255 range.
    ///
    /// The detector's gradient threshold is expressed in these units, so no
    /// normalisation to `[0, 1]` takes place.
    pub fn from_u8(gray: &ImageU8<'_>) -> Self {
        let mut out = Self::new(gray.w, gray.h);
        for y in 0..gray.h {
            let src = gray.row(y);
            let dst = out.row_mut(y);
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = f64::from(s);
            }
        }
        out
    }
}

impl<T: Copy> ImageView for Grid<T> {
    type Pixel = T;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[T]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl<T: Copy> ImageViewMut for Grid<T> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
