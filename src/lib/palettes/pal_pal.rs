use std::io::{BufRead, BufReader, Write};
use std::sync::LazyLock;

use regex::Regex;

use crate::palettes::color::Color;
use crate::palettes::error::PaletteError;
use crate::palettes::file::PaletteFile;
use crate::palettes::format::{PaletteLoader, PaletteSaver};
use crate::palettes::{non_empty, MAX_PALETTE_COLORS};

// https://github.com/aseprite/aseprite/blob/8323a555007e1db9670b098ce4b1b9c5f8b3d7ad/src/doc/file/pal_file.cpp

const PAL_MAGIC: &str = "JASC-PAL";
const PAL_VERSION: &str = "0100";

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?P<r>\d+)\s+(?P<g>\d+)\s+(?P<b>\d+)$").expect("PAL line regex is valid")
});

/// Paint Shop Pro's JASC palette format.
pub struct PalFormat;

impl PalFormat {
	pub fn read_colors<R: BufRead>(reader: &mut R) -> Result<Vec<Color>, PaletteError> {
		let mut colors = Vec::new();

		let mut magic = String::new();
		reader.read_line(&mut magic)?;
		if magic.trim() != PAL_MAGIC {
			return Err(PaletteError::InvalidTextLine {
				line: 1,
				msg: format!("Invalid magic sequence: \"{}\"", magic.trim()),
			});
		}

		let mut version = String::new();
		reader.read_line(&mut version)?;
		if version.trim() != PAL_VERSION {
			return Err(PaletteError::InvalidTextLine {
				line: 2,
				msg: format!("Invalid version: \"{}\"", version.trim()),
			});
		}

		// the line with the number of colors is redundant, the entries are counted instead
		let mut count = String::new();
		reader.read_line(&mut count)?;

		for (i, line) in reader.lines().enumerate() {
			let line_no = i + 4;
			let line = line?;
			let trimmed_line = line.trim();
			if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
				continue;
			}

			let groups = LINE_RE.captures(trimmed_line)
				.ok_or_else(|| PaletteError::InvalidTextLine { line: line_no, msg: "Malformed line".to_string() })?;

			let r = groups["r"].parse::<u8>().map_err(|_| PaletteError::InvalidTextLine { line: line_no, msg: "Invalid red value".to_string() })?;
			let g = groups["g"].parse::<u8>().map_err(|_| PaletteError::InvalidTextLine { line: line_no, msg: "Invalid green value".to_string() })?;
			let b = groups["b"].parse::<u8>().map_err(|_| PaletteError::InvalidTextLine { line: line_no, msg: "Invalid blue value".to_string() })?;

			colors.push(Color::from_rgb8(r, g, b));

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

		write!(writer, "{PAL_MAGIC}\r\n{PAL_VERSION}\r\n{}\r\n", colors.len())?;
		for c in colors {
			let [r, g, b] = c.to_rgb8();
			write!(writer, "{r} {g} {b}\r\n")?;
		}
		Ok(())
	}
}

impl PaletteLoader for PalFormat {
	fn load(&self, file: &dyn PaletteFile) -> Result<Option<Vec<Color>>, PaletteError> {
		let data = file.read()?;
		let mut reader = BufReader::new(data.as_slice());
		Self::read_colors(&mut reader).map(non_empty)
	}
}

impl PaletteSaver for PalFormat {
	fn save(&self, colors: &[Color], file: &dyn PaletteFile) -> Result<(), PaletteError> {
		let mut buf = Vec::new();
		Self::write_colors(colors, &mut buf)?;
		file.write(&buf)?;
		Ok(())
	}
}
