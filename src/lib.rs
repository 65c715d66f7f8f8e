#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

pub mod error;
pub mod image;
pub mod palette;
pub mod seed;
pub mod sql;

pub use {
	error::{Error, PaletteError},
	image::{encode, probe, Dimensions, MinimalPng, PngSource},
	palette::{Palette, Rgb},
	seed::{writeSeedFile, Pipeline},
	sql::{buildStatement, escape},
};

use {
	const_format::concatcp,
	std::{fs::File, os},
};

pub const DEFAULT_SEED_PATH: &str = concatcp!(env!("CARGO_MANIFEST_DIR"), "/sql/seed_sprites.sql");

/// Logs to stderr at `info` unless `RUST_LOG` says otherwise.
pub fn initLogging() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
		.target(env_logger::Target::Stderr)
		.init();
}

#[cfg(unix)]
pub fn stdoutRaw() -> File {
	use os::unix::io::FromRawFd;
	unsafe { File::from_raw_fd(1) }
}

#[cfg(windows)]
pub fn stdoutRaw() -> File {
	use {
		os::windows::io::{AsRawHandle, FromRawHandle},
		std::io,
	};
	unsafe { File::from_raw_handle(io::stdout().as_raw_handle()) }
}
