use std::io::{BufRead, BufReader, Write};

use crate::palettes::color::Color;
use crate::palettes::error::PaletteError;
use crate::palettes::file::PaletteFile;
use crate::palettes::format::{PaletteLoader, PaletteSaver};
use crate::palettes::{non_empty, MAX_PALETTE_COLORS};

// https://github.com/aseprite/aseprite/blob/8323a555007e1db9670b098ce4b1b9c5f8b3d7ad/src/doc/file/hex_file.cpp

/// One `RRGGBB` (or `RRGGBBAA`) value per line.
pub struct HexFormat;

pub(crate) fn format_hex_color(c: &Color) -> String {
	let [r, g, b, a] = c.to_rgba8();
	if a == 255 {
		format!("{r:02X}{g:02X}{b:02X}")
	} else {
		format!("{r:02X}{g:02X}{b:02X}{a:02X}")
	}
}

impl HexFormat {
	pub fn read_colors<R: BufRead>(reader: R) -> Result<Vec<Color>, PaletteError> {
		let mut colors = Vec::new();

		for (i, line) in reader.lines().enumerate() {
			let line = line?;
			let trimmed_line = line.trim();
			if trimmed_line.is_empty() {
				continue;
			}

			let color = match trimmed_line.parse::<Color>() {
				Ok(color) => color,
				// anything else starting with # is a comment
				Err(_) if trimmed_line.starts_with('#') => continue,
				Err(_) => {
					return Err(PaletteError::InvalidTextLine { line: i + 1, msg: "Not a hexadecimal color value".to_string() });
				}
			};

			colors.push(color);

			if colors.len() > MAX_PALETTE_COLORS {
				return Err(PaletteError::TooManyColors);
			}
		}

		Ok(colors)
	}

	pub fn write_colors<W: Write>(colors: &[Color], mut writer: W) -> Result<(), PaletteError> {
		if colors.len() > MAX_PALETTE_COLORS {
			return Err(PaletteError::TooManyColors);
		}

		for c in colors {
			writeln!(writer, "{}", format_hex_color(c))?;
		}
		Ok(())
	}
}

impl PaletteLoader for HexFormat {
	fn load(&self, file: &dyn PaletteFile) -> Result<Option<Vec<Color>>, PaletteError> {
		let data = file.read()?;
		Self::read_colors(BufReader::new(data.as_slice())).map(non_empty)
	}
}

impl PaletteSaver for HexFormat {
	fn save(&self, colors: &[Color], file: &dyn PaletteFile) -> Result<(), PaletteError> {
		let mut buf = Vec::new();
		Self::write_colors(colors, &mut buf)?;
		file.write(&buf)?;
		Ok(())
	}
}
