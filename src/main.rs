use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use humansize::DECIMAL;

use crate::cmd_convert::palette_convert;
use crate::cmd_default::palette_default;
use crate::cmd_edit::palette_edit;
use crate::cmd_formats::palette_formats;
use crate::cmd_show::palette_show;
use crate::commands::{Cli, Commands};
use crate::common::output_path;

mod cmd_convert;
mod cmd_default;
mod cmd_edit;
mod cmd_formats;
mod cmd_show;
mod commands;
mod common;
mod logger;

fn main() -> ExitCode {
	let cli = Cli::parse();
	logger::init(cli.debug);

	let output: PathBuf;

	let result = match &cli.command {
		Some(Commands::Convert(args)) => {
			output = args.output.clone();
			palette_convert(args)
		}
		Some(Commands::Edit(args)) => {
			output = output_path(&args.input, &args.output);
			palette_edit(args)
		}
		Some(Commands::Default(args)) => match &args.output {
			Some(path) => {
				output = path.clone();
				palette_default(args)
			}
			None => {
				return match palette_default(args) {
					Ok(_) => ExitCode::SUCCESS,
					Err(e) => {
						eprintln!("execution failed: {e:#}");
						ExitCode::FAILURE
					}
				}
			}
		},
		Some(Commands::Show(args)) => {
			return match palette_show(args) {
				Ok(_) => ExitCode::SUCCESS,
				Err(e) => {
					eprintln!("execution failed: {e:#}");
					ExitCode::FAILURE
				}
			}
		}
		Some(Commands::Formats) => {
			palette_formats();
			return ExitCode::SUCCESS;
		}
		None => {
			return ExitCode::FAILURE;
		}
	};

	match result {
		Ok(_) => {
			match fs::metadata(&output) {
				Ok(m) => {
					let size = humansize::format_size(m.len(), DECIMAL);
					println!("Output file size: {size}");
				}
				Err(err) => {
					eprintln!("Can't determine output file size: {err}");
				}
			}
			ExitCode::SUCCESS
		}
		Err(e) => {
			eprintln!("execution failed: {e:#}");
			ExitCode::FAILURE
		}
	}
}
