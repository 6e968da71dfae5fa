pub mod color;
pub mod error;
pub mod file;
pub mod format;
pub(crate) mod pal_act;
pub(crate) mod pal_col;
pub(crate) mod pal_gpl;
pub(crate) mod pal_hex;
pub(crate) mod pal_json;
pub(crate) mod pal_pal;
pub mod palette;

pub const MAX_PALETTE_COLORS: usize = 256;

pub use pal_act::ActFormat;
pub use pal_col::ColFormat;
pub use pal_gpl::GplFormat;
pub use pal_hex::HexFormat;
pub use pal_json::JsonFormat;
pub use pal_pal::PalFormat;

/// Turns a parsed color list into loader output, treating an empty list as "no data".
pub(crate) fn non_empty(colors: Vec<color::Color>) -> Option<Vec<color::Color>> {
	if colors.is_empty() {
		None
	} else {
		Some(colors)
	}
}
