use {
	std::{io, path::PathBuf},
	thiserror::Error,
};

/// Why a palette was refused.
#[derive(Debug, Error)]
pub enum PaletteError {
	#[error("malformed palette: {0}")]
	Syntax(#[from] toml::de::Error),

	#[error("sprite #{index} has an empty name")]
	EmptyName { index: usize },

	#[error("sprite name {0:?} appears more than once")]
	DuplicateName(String),
}

/// Failures at the file boundary. Each one carries the path it happened on.
#[derive(Debug, Error)]
pub enum Error {
	#[error("{path:?}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("{path:?}: {source}")]
	Palette {
		path: PathBuf,
		#[source]
		source: PaletteError,
	},
}

impl Error {
	#[must_use]
	pub fn path(&self) -> &std::path::Path {
		match self {
			Self::Io { path, .. } | Self::Palette { path, .. } => path,
		}
	}
}
