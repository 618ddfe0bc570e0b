use crate::error::LsdError;

/// Borrowed 8-bit grayscale view with an explicit row stride.
///
/// This is the pixel-value extraction contract with whatever decoded the
/// image: the detector never sees file formats, only rows of luma bytes.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Checked constructor: `stride >= w` and the buffer covers every row.
    pub fn new(w: usize, h: usize, stride: usize, data: &'a [u8]) -> Result<Self, LsdError> {
        let needed = if h == 0 { 0 } else { (h - 1) * stride + w };
        if stride < w || data.len() < needed {
            return Err(LsdError::BufferSize {
                width: w,
                height: h,
                len: data.len(),
            });
        }
        Ok(Self { w, h, stride, data })
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}
