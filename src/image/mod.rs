//! Grid storage shared by every detector stage, plus the 8-bit input view
//! and file helpers used by the command-line tool.

pub mod grid;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::grid::{Grid, ImageF64};
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
