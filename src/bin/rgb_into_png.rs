#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	core::num::NonZeroU32,
	pgttd_sprites::{initLogging, probe, stdoutRaw, Dimensions, Rgb},
	std::{
		io::{BufWriter, Write},
		process,
	},
};

fn main() {
	#[derive(Parser)]
	struct Args {
		#[clap(value_parser)]
		r: u8,
		#[clap(value_parser)]
		g: u8,
		#[clap(value_parser)]
		b: u8,

		#[clap(long, value_parser)]
		width: Option<NonZeroU32>,
		#[clap(long, value_parser)]
		height: Option<NonZeroU32>,

		#[clap(long)]
		minimal: bool,
	}
	initLogging();
	let Args { r, g, b, width, height, minimal } = Args::parse();
	let source = probe(minimal);
	let dimensions = {
		let default = source.defaultDimensions();
		Dimensions::new(width.unwrap_or(default.width), height.unwrap_or(default.height))
	};
	let png = source.encode(Rgb::new(r, g, b), dimensions);
	let stdout = &mut BufWriter::new(stdoutRaw());
	if let Err(err) = stdout.write_all(&png).and_then(|()| stdout.flush()) {
		log::error!("stdout: {err}");
		process::exit(1);
	}
}
