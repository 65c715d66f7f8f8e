use {
	crate::{
		error::Error,
		image::{Dimensions, PngSource},
		palette::Palette,
		sql,
	},
	base64::{engine::general_purpose::STANDARD, Engine},
	std::{
		ffi::OsString,
		fs,
		io::{self, Write},
		path::{Path, PathBuf},
	},
};

/// Turns a palette into `sprites` insert statements, one image source for the whole run.
pub struct Pipeline {
	source: Box<dyn PngSource>,
	dimensions: Dimensions,
}

impl Pipeline {
	#[must_use]
	pub fn new(source: Box<dyn PngSource>) -> Self {
		let dimensions = source.defaultDimensions();
		Self { source, dimensions }
	}

	#[must_use]
	pub fn withDimensions(mut self, dimensions: Dimensions) -> Self {
		self.dimensions = dimensions;
		self
	}

	#[must_use]
	pub fn dimensions(&self) -> Dimensions {
		self.dimensions
	}

	#[must_use]
	pub fn sourceName(&self) -> &'static str {
		self.source.name()
	}

	#[must_use]
	pub fn statements(&self, palette: &Palette) -> Vec<String> {
		palette
			.iter()
			.map(|(name, color)| {
				let png = self.source.encode(color, self.dimensions);
				log::debug!("{name}: {color:?} -> {} byte png", png.len());
				sql::buildStatement(name, &STANDARD.encode(png))
			})
			.collect()
	}

	/// Writes one line per palette entry and returns how many. Everything is rendered before
	/// the first byte reaches `writer`.
	pub fn run<W: Write + ?Sized>(&self, palette: &Palette, writer: &mut W) -> io::Result<usize> {
		let statements = self.statements(palette);
		let mut text = String::with_capacity(statements.iter().map(|statement| statement.len() + 1).sum());
		for statement in &statements {
			text.push_str(statement);
			text.push('\n');
		}
		writer.write_all(text.as_bytes())?;
		writer.flush()?;
		Ok(statements.len())
	}
}

/// Writes the seed file at `path`, creating missing directories. The file only appears once it
/// is complete.
pub fn writeSeedFile(pipeline: &Pipeline, palette: &Palette, path: &Path) -> Result<usize, Error> {
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		fs::create_dir_all(parent).map_err(ioError(parent))?;
	}
	let partial = partialPath(path);
	let count = fs::File::create(&partial)
		.and_then(|mut file| {
			let count = pipeline.run(palette, &mut file)?;
			file.sync_all()?;
			Ok(count)
		})
		.map_err(ioError(&partial));
	let count = match count {
		Ok(count) => count,
		Err(err) => {
			_ = fs::remove_file(&partial);
			return Err(err);
		}
	};
	fs::rename(&partial, path).map_err(|source| {
		_ = fs::remove_file(&partial);
		ioError(path)(source)
	})?;
	Ok(count)
}

fn ioError(path: &Path) -> impl FnOnce(io::Error) -> Error {
	let path = path.to_owned();
	move |source| Error::Io { path, source }
}

fn partialPath(path: &Path) -> PathBuf {
	let mut name = path.file_name().map_or_else(OsString::new, ToOwned::to_owned);
	name.push(".partial");
	path.with_file_name(name)
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		crate::{
			image::{probe, MinimalPng, SIGNATURE},
			palette::Rgb,
		},
	};

	fn payload(statement: &str) -> Vec<u8> {
		let literal = statement
			.strip_prefix("INSERT INTO sprites(name, image_base64) VALUES (")
			.and_then(|rest| rest.strip_suffix("');"))
			.and_then(|rest| rest.rsplit_once(", '"))
			.unwrap()
			.1;
		STANDARD.decode(literal).unwrap()
	}

	#[test]
	fn single_red_entry() {
		let palette = Palette::new([("red", Rgb::new(255, 0, 0))]).unwrap();
		let mut sink = Vec::new();
		let count = Pipeline::new(probe(true)).run(&palette, &mut sink).unwrap();
		assert_eq!(count, 1);

		let text = String::from_utf8(sink).unwrap();
		assert!(text.ends_with('\n'));
		let lines: Vec<_> = text.lines().collect();
		assert_eq!(lines.len(), 1);
		assert!(lines[0].starts_with("INSERT INTO sprites(name, image_base64) VALUES ('red', '"));
		let png = payload(lines[0]);
		assert!(png.starts_with(&SIGNATURE));
		assert_eq!(png, crate::image::encode(Rgb::RED, Dimensions::ONE));
	}

	#[test]
	fn statements_follow_palette_order() {
		let pipeline = Pipeline::new(Box::new(MinimalPng));
		let statements = pipeline.statements(&Palette::builtin());
		assert_eq!(statements.len(), 3);
		for (statement, name) in statements.iter().zip(["red", "green", "blue"]) {
			assert!(statement.contains(&format!("VALUES ('{name}', ")), "{statement}");
		}
	}

	#[test]
	fn dimensions_override_reaches_the_encoder() {
		let side = core::num::NonZeroU32::new(4).unwrap();
		let pipeline = Pipeline::new(Box::new(MinimalPng)).withDimensions(Dimensions::square(side));
		assert_eq!(pipeline.dimensions(), Dimensions::square(side));
		let statements = pipeline.statements(&Palette::builtin());
		assert_eq!(payload(&statements[2]), crate::image::encode(Rgb::BLUE, Dimensions::square(side)));
	}

	#[test]
	fn empty_palette_writes_nothing() {
		let mut sink = Vec::new();
		let palette = Palette::new(Vec::<(String, Rgb)>::new()).unwrap();
		assert_eq!(Pipeline::new(Box::new(MinimalPng)).run(&palette, &mut sink).unwrap(), 0);
		assert!(sink.is_empty());
	}

	#[test]
	fn write_failure_is_reported() {
		struct Broken;
		impl Write for Broken {
			fn write(&mut self, _: &[u8]) -> io::Result<usize> {
				Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
			}
			fn flush(&mut self) -> io::Result<()> {
				Ok(())
			}
		}
		let err = Pipeline::new(Box::new(MinimalPng)).run(&Palette::builtin(), &mut Broken).unwrap_err();
		assert_eq!(err.to_string(), "disk on fire");
	}

	#[test]
	fn partial_path_is_a_sibling() {
		assert_eq!(partialPath(Path::new("sql/seed_sprites.sql")), Path::new("sql/seed_sprites.sql.partial"));
	}
}
