use anyhow::Result;
use palettes_rs::palettes::format::PaletteFormatManager;
use palettes_rs::palettes::palette::Palette;

use crate::commands::DefaultArgs;
use crate::common::{print_swatches, save_palette};

pub(crate) fn palette_default(args: &DefaultArgs) -> Result<()> {
	let pal = Palette::get_default();

	match &args.output {
		Some(output) => {
			let formats = PaletteFormatManager::new();
			save_palette(&formats, &pal, output)
		}
		None => {
			print_swatches(&pal);
			Ok(())
		}
	}
}
