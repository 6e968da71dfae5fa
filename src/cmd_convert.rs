use anyhow::Result;
use palettes_rs::palettes::format::PaletteFormatManager;

use crate::commands::ConvertArgs;
use crate::common::{load_palette, save_palette};

pub(crate) fn palette_convert(args: &ConvertArgs) -> Result<()> {
	let formats = PaletteFormatManager::new();
	let pal = load_palette(&formats, &args.input)?;
	save_palette(&formats, &pal, &args.output)?;

	println!("Converted {} colors.", pal.len());
	Ok(())
}
