use std::io::{BufReader, Read};

use crate::palettes::color::Color;
use crate::palettes::error::PaletteError;
use crate::palettes::file::PaletteFile;
use crate::palettes::format::{PaletteLoader, PaletteSaver};
use crate::palettes::pal_hex::format_hex_color;
use crate::palettes::{non_empty, MAX_PALETTE_COLORS};

/// A JSON array of hexadecimal color strings.
pub struct JsonFormat;

impl JsonFormat {
	pub fn read_colors<R: Read>(reader: R) -> Result<Vec<Color>, PaletteError> {
		let colors: Vec<String> = serde_json::from_reader(reader)?;

		if colors.len() > MAX_PALETTE_COLORS {
			return Err(PaletteError::TooManyColors);
		}

		colors.iter().enumerate().map(|(i, c)| {
			c.parse::<Color>().map_err(|e| PaletteError::InvalidJsonEntry { index: i, msg: e.to_string() })
		}).collect::<Result<Vec<Color>, PaletteError>>()
	}

	pub fn write_colors(colors: &[Color]) -> Result<Vec<u8>, PaletteError> {
		if colors.len() > MAX_PALETTE_COLORS {
			return Err(PaletteError::TooManyColors);
		}

		let strings = colors.iter().map(|c| format!("#{}", format_hex_color(c))).collect::<Vec<String>>();
		Ok(serde_json::to_vec_pretty(&strings)?)
	}
}

impl PaletteLoader for JsonFormat {
	fn load(&self, file: &dyn PaletteFile) -> Result<Option<Vec<Color>>, PaletteError> {
		let data = file.read()?;
		Self::read_colors(BufReader::new(data.as_slice())).map(non_empty)
	}
}

impl PaletteSaver for JsonFormat {
	fn save(&self, colors: &[Color], file: &dyn PaletteFile) -> Result<(), PaletteError> {
		let data = Self::write_colors(colors)?;
		file.write(&data)?;
		Ok(())
	}
}
