use std::io::{BufRead, BufReader, Write};
use std::sync::LazyLock;

use regex::Regex;

use crate::palettes::color::Color;
use crate::palettes::error::PaletteError;
use crate::palettes::file::PaletteFile;
use crate::palettes::format::{PaletteLoader, PaletteSaver};
use crate::palettes::{non_empty, MAX_PALETTE_COLORS};

// https://github.com/aseprite/aseprite/blob/8323a555007e1db9670b098ce4b1b9c5f8b3d7ad/src/doc/file/gpl_file.cpp

const GIMP_MAGIC: &str = "GIMP Palette";
const DEFAULT_NAME: &str = "Untitled";

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?P<r>\d+)\s+(?P<g>\d+)\s+(?P<b>\d+)(?:\s+(?P<rest>.*))?$").expect("GPL line regex is valid")
});

/// GIMP's text palette format. Entry names are ignored when reading.
pub struct GplFormat;

fn parse_channel(value: &str, line: usize, channel: &str) -> Result<u8, PaletteError> {
	value.parse::<u8>().map_err(|_| PaletteError::InvalidTextLine { line, msg: format!("Invalid {channel} value") })
}

impl GplFormat {
	pub fn read_colors<R: BufRead>(reader: &mut R) -> Result<Vec<Color>, PaletteError> {
		let mut colors = Vec::new();

		let mut magic = String::new();
		reader.read_line(&mut magic)?;
		if magic.trim() != GIMP_MAGIC {
			return Err(PaletteError::InvalidTextLine {
				line: 1,
				msg: format!("Invalid magic sequence: \"{}\"", magic.trim()),
			});
		}

		let mut has_alpha = false;
		for (i, line) in reader.lines().enumerate() {
			let line_no = i + 2;
			let line = line?;
			let trimmed_line = line.trim();
			if trimmed_line.starts_with('#') || trimmed_line.is_empty() ||
				trimmed_line.starts_with("Name:") || trimmed_line.starts_with("Columns:") {
				continue;
			}

			if let Some(channels) = trimmed_line.strip_prefix("Channels:") {
				has_alpha = channels.trim().eq_ignore_ascii_case("RGBA");
				continue;
			}

			let groups = LINE_RE.captures(trimmed_line)
				.ok_or_else(|| PaletteError::InvalidTextLine { line: line_no, msg: "Malformed line".to_string() })?;

			let r = parse_channel(&groups["r"], line_no, "red")?;
			let g = parse_channel(&groups["g"], line_no, "green")?;
			let b = parse_channel(&groups["b"], line_no, "blue")?;

			let mut a = 255;
			if has_alpha {
				// with RGBA channels the alpha value comes before the entry name
				let alpha = groups.name("rest")
					.and_then(|rest| rest.as_str().split_whitespace().next())
					.ok_or_else(|| PaletteError::InvalidTextLine { line: line_no, msg: "Missing alpha value".to_string() })?;
				a = parse_channel(alpha, line_no, "alpha")?;
			}

			colors.push(Color::from_rgba8(r, g, b, a));

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

		let has_alpha = colors.iter().any(|c| c.to_rgba8()[3] != 255);

		writeln!(writer, "{GIMP_MAGIC}")?;
		if has_alpha {
			writeln!(writer, "Channels: RGBA")?;
		}
		writeln!(writer, "Name: {DEFAULT_NAME}")?;
		writeln!(writer, "Columns: 0")?;
		writeln!(writer, "#")?;

		for c in colors {
			let [r, g, b, a] = c.to_rgba8();
			if has_alpha {
				writeln!(writer, "{r:>3} {g:>3} {b:>3} {a:>3}\t{DEFAULT_NAME}")?;
			} else {
				writeln!(writer, "{r:>3} {g:>3} {b:>3}\t{DEFAULT_NAME}")?;
			}
		}

		Ok(())
	}
}

impl PaletteLoader for GplFormat {
	fn load(&self, file: &dyn PaletteFile) -> Result<Option<Vec<Color>>, PaletteError> {
		let data = file.read()?;
		let mut reader = BufReader::new(data.as_slice());
		Self::read_colors(&mut reader).map(non_empty)
	}
}

impl PaletteSaver for GplFormat {
	fn save(&self, colors: &[Color], file: &dyn PaletteFile) -> Result<(), PaletteError> {
		let mut buf = Vec::new();
		Self::write_colors(colors, &mut buf)?;
		file.write(&buf)?;
		Ok(())
	}
}
