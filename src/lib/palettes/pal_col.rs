use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use crate::palettes::color::Color;
use crate::palettes::error::PaletteError;
use crate::palettes::file::PaletteFile;
use crate::palettes::format::PaletteLoader;
use crate::palettes::{non_empty, MAX_PALETTE_COLORS};

// https://github.com/aseprite/aseprite/blob/8323a555007e1db9670b098ce4b1b9c5f8b3d7ad/src/doc/file/col_file.cpp

const PRO_MAGIC: u16 = 0xB123;
const VGA_SIZE: usize = MAX_PALETTE_COLORS * 3;
const PRO_HEADER_SIZE: usize = 8;

/// Animator (768 bytes of 6-bit VGA values) and Animator Pro (header plus 8-bit RGB) palettes.
/// Read-only.
pub struct ColFormat;

impl ColFormat {
	pub fn read_colors(data: &[u8]) -> Result<Vec<Color>, PaletteError> {
		let size = data.len();
		let mut f = Cursor::new(data);

		let pro = size != VGA_SIZE;
		if pro && (size < PRO_HEADER_SIZE || (size - PRO_HEADER_SIZE) % 3 != 0) {
			debug!("{size} bytes is neither a VGA nor an Animator Pro palette");
			return Err(PaletteError::InvalidBinaryData { position: 0, msg: "Not an Animator COL file".to_string() });
		}

		let num_colors = if pro { (size - PRO_HEADER_SIZE) / 3 } else { MAX_PALETTE_COLORS };
		if num_colors > MAX_PALETTE_COLORS {
			return Err(PaletteError::TooManyColors);
		}

		if pro {
			f.seek(SeekFrom::Start(4))?; // skip file size

			let magic = f.read_u16::<LittleEndian>()?;
			if magic != PRO_MAGIC {
				return Err(PaletteError::InvalidBinaryData {
					position: (f.position() - 2) as usize,
					msg: format!("Invalid magic sequence {magic:#02X}"),
				});
			}

			let version = f.read_u16::<LittleEndian>()?;
			if version != 0 {
				return Err(PaletteError::InvalidBinaryData {
					position: (f.position() - 2) as usize,
					msg: format!("Invalid version {version:#02X}"),
				});
			}
		}

		let mut colors = Vec::with_capacity(num_colors);
		let mut buf = [0_u8; 3];
		for _ in 0..num_colors {
			f.read_exact(&mut buf)?;
			if pro {
				colors.push(Color::from(buf));
			} else {
				colors.push(Color::from_6bits(buf));
			}
		}

		Ok(colors)
	}
}

impl PaletteLoader for ColFormat {
	fn load(&self, file: &dyn PaletteFile) -> Result<Option<Vec<Color>>, PaletteError> {
		let data = file.read()?;
		Self::read_colors(&data).map(non_empty)
	}
}
