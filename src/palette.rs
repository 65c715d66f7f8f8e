use {
	crate::error::{Error, PaletteError},
	serde::Deserialize,
	std::{collections::HashSet, fs, path::Path},
};

pub const RGB_SIZE: usize = 3;

/// One 8-bit-per-channel color. Channels are `u8`, so nothing out of range ever gets this far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; RGB_SIZE]);

impl Rgb {
	pub const RED: Self = Self::new(255, 0, 0);
	pub const GREEN: Self = Self::new(0, 255, 0);
	pub const BLUE: Self = Self::new(0, 0, 255);

	#[must_use]
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self([r, g, b])
	}

	#[inline(always)]
	#[must_use]
	pub const fn channels(self) -> [u8; RGB_SIZE] {
		self.0
	}
}

impl From<[u8; RGB_SIZE]> for Rgb {
	fn from(channels: [u8; RGB_SIZE]) -> Self {
		Self(channels)
	}
}

/// Named sprite colors, in the order they were given. Names are non-empty and unique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
	entries: Vec<(String, Rgb)>,
}

#[derive(Deserialize)]
struct PaletteTOML {
	#[serde(rename = "sprite", default)]
	sprites: Vec<SpriteTOML>,
}

#[derive(Deserialize)]
struct SpriteTOML {
	name: String,
	rgb: Rgb,
}

impl Palette {
	#[must_use]
	pub fn builtin() -> Self {
		Self {
			entries: [("red", Rgb::RED), ("green", Rgb::GREEN), ("blue", Rgb::BLUE)]
				.map(|(name, rgb)| (name.to_owned(), rgb))
				.into(),
		}
	}

	pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, Rgb)>) -> Result<Self, PaletteError> {
		let (mut seen, mut palette) = (HashSet::new(), Self { entries: Vec::new() });
		for (index, (name, rgb)) in entries.into_iter().enumerate() {
			let name = name.into();
			if name.is_empty() {
				return Err(PaletteError::EmptyName { index });
			}
			if !seen.insert(name.clone()) {
				return Err(PaletteError::DuplicateName(name));
			}
			palette.entries.push((name, rgb));
		}
		Ok(palette)
	}

	pub fn fromTOML(text: &str) -> Result<Self, PaletteError> {
		let PaletteTOML { sprites } = toml::from_str(text)?;
		Self::new(sprites.into_iter().map(|SpriteTOML { name, rgb }| (name, rgb)))
	}

	pub fn load(path: &Path) -> Result<Self, Error> {
		let text = fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_owned(), source })?;
		Self::fromTOML(&text).map_err(|source| Error::Palette { path: path.to_owned(), source })
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, Rgb)> + '_ {
		self.entries.iter().map(|(name, rgb)| (name.as_str(), *rgb))
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<Rgb> {
		self.iter().find_map(|(n, rgb)| (n == name).then_some(rgb))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
