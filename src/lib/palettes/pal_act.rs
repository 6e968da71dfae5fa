use std::io::{Cursor, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::palettes::color::Color;
use crate::palettes::error::PaletteError;
use crate::palettes::file::PaletteFile;
use crate::palettes::format::{PaletteLoader, PaletteSaver};
use crate::palettes::{non_empty, MAX_PALETTE_COLORS};

// https://github.com/aseprite/aseprite/blob/8323a555007e1db9670b098ce4b1b9c5f8b3d7ad/src/doc/file/act_file.cpp

const NO_TRANSPARENT_INDEX: u16 = 0xFFFF;

/// Adobe Color Table: 256 RGB triplets, optionally followed by a color count and a transparent index.
pub struct ActFormat;

impl ActFormat {
	pub fn read_colors(data: &[u8]) -> Result<Vec<Color>, PaletteError> {
		let size = data.len() as u64;
		let mut f = Cursor::new(data);

		let mut colors = Vec::with_capacity(MAX_PALETTE_COLORS);
		let mut buf = [0_u8; 3];
		for _ in 0..MAX_PALETTE_COLORS {
			f.read_exact(&mut buf)?;
			colors.push(Color::from(buf));
		}

		if f.position() < size {
			// the two bytes after the first 256 3-byte colors are a u16 containing the total number of colors
			let num_colors = f.read_u16::<BigEndian>()? as usize;

			if num_colors > MAX_PALETTE_COLORS {
				return Err(PaletteError::InvalidBinaryData {
					position: (f.position() - 2) as usize,
					msg: format!("Invalid footer value {num_colors:#X}"),
				});
			}

			colors.truncate(num_colors);
		}

		Ok(colors)
	}

	pub fn write_colors<W: Write>(colors: &[Color], mut writer: W) -> Result<(), PaletteError> {
		if colors.len() > MAX_PALETTE_COLORS {
			return Err(PaletteError::TooManyColors);
		}

		for c in colors {
			writer.write_all(&c.to_rgb8())?;
		}
		for _ in colors.len()..MAX_PALETTE_COLORS {
			writer.write_all(&[0, 0, 0])?;
		}

		writer.write_u16::<BigEndian>(colors.len() as u16)?;
		writer.write_u16::<BigEndian>(NO_TRANSPARENT_INDEX)?;
		Ok(())
	}
}

impl PaletteLoader for ActFormat {
	fn load(&self, file: &dyn PaletteFile) -> Result<Option<Vec<Color>>, PaletteError> {
		let data = file.read()?;
		Self::read_colors(&data).map(non_empty)
	}
}

impl PaletteSaver for ActFormat {
	fn save(&self, colors: &[Color], file: &dyn PaletteFile) -> Result<(), PaletteError> {
		let mut buf = Vec::with_capacity(MAX_PALETTE_COLORS * 3 + 4);
		Self::write_colors(colors, &mut buf)?;
		file.write(&buf)?;
		Ok(())
	}
}
