#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	core::num::NonZeroU32,
	pgttd_sprites::{initLogging, probe, writeSeedFile, Dimensions, Error, Palette, Pipeline, DEFAULT_SEED_PATH},
	std::{path::PathBuf, process},
};

/// Generate colored square sprite PNGs and write them as `sprites` INSERT statements.
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
	/// Path to write SQL insert statements
	#[clap(short, long, value_parser, default_value = DEFAULT_SEED_PATH)]
	output: PathBuf,

	/// TOML palette (`[[sprite]]` tables with `name` and `rgb`) used instead of red/green/blue
	#[clap(long, value_parser)]
	palette: Option<PathBuf>,

	/// Use the built-in 1x1 encoder even when the png crate is available
	#[clap(long)]
	minimal: bool,

	/// Side of the square sprites, overriding the encoder's default
	#[clap(long, value_parser)]
	size: Option<NonZeroU32>,
}

fn main() {
	initLogging();
	let Args { output, palette, minimal, size } = Args::parse();
	if let Err(err) = (|| -> Result<(), Error> {
		let palette = palette.as_deref().map_or_else(|| Ok(Palette::builtin()), Palette::load)?;
		let mut pipeline = Pipeline::new(probe(minimal));
		if let Some(side) = size {
			pipeline = pipeline.withDimensions(Dimensions::square(side));
		}
		log::info!("encoding {} sprites at {} with the {} encoder", palette.len(), pipeline.dimensions(), pipeline.sourceName());
		let count = writeSeedFile(&pipeline, &palette, &output)?;
		println!("Wrote {count} sprites to {}", output.display());
		Ok(())
	})() {
		log::error!("{err}");
		process::exit(1);
	}
}
