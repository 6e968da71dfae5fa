use colored::Colorize;
use palettes_rs::palettes::format::{FormatResolver, PaletteFormatManager};

pub(crate) fn palette_formats() {
	let formats = PaletteFormatManager::new();

	for format in formats.formats() {
		let read = if format.is_write_only() { "-".dimmed() } else { "R".green() };
		let write = if format.is_read_only() { "-".dimmed() } else { "W".green() };
		let extensions = format.extensions().iter()
			.map(|e| format!(".{e}"))
			.collect::<Vec<String>>()
			.join(", ");

		println!("{read}{write} {:<22} {extensions}", format.name());
	}
}
