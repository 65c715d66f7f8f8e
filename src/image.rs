//! Solid-color RGB PNGs.
//!
//! [`encode`] frames the file by hand: signature, `IHDR`, one or more `IDAT`, `IEND`.
//! Only zlib and CRC-32 come from libraries. [`PngCrate`] produces the same kind of
//! image through the `png` crate, and [`probe`] picks one of the two once per run.

use {
	crate::palette::{Rgb, RGB_SIZE},
	byteorder::{ByteOrder, BE},
	core::{fmt, num::NonZeroU32},
};

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

const BIT_DEPTH: u8 = 8;
// truecolor, no alpha
const COLOR_TYPE_RGB: u8 = 2;
const COMPRESSION_METHOD: u8 = 0;
const FILTER_METHOD: u8 = 0;
const INTERLACE_METHOD: u8 = 0;
const FILTER_NONE: u8 = 0;

const IHDR_LEN: usize = 13;
// length + tag + crc
const CHUNK_OVERHEAD: usize = 4 + 4 + 4;
const MAX_CHUNK_DATA_LEN: usize = (1 << 31) - 1;
const ZLIB_LEVEL: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
	pub width: NonZeroU32,
	pub height: NonZeroU32,
}

impl Dimensions {
	pub const ONE: Self = Self::square(NonZeroU32::MIN);

	#[must_use]
	pub const fn new(width: NonZeroU32, height: NonZeroU32) -> Self {
		Self { width, height }
	}

	#[must_use]
	pub const fn square(side: NonZeroU32) -> Self {
		Self { width: side, height: side }
	}
}

impl Default for Dimensions {
	fn default() -> Self {
		Self::ONE
	}
}

impl fmt::Display for Dimensions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}x{}", self.width, self.height)
	}
}

/// Something that can turn a color into a PNG file.
pub trait PngSource {
	fn name(&self) -> &'static str;

	/// Size used when the caller has no opinion.
	fn defaultDimensions(&self) -> Dimensions;

	fn encode(&self, color: Rgb, dimensions: Dimensions) -> Vec<u8>;
}

/// The hand-framed encoder. 1x1 unless told otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimalPng;

impl PngSource for MinimalPng {
	fn name(&self) -> &'static str {
		"minimal"
	}

	fn defaultDimensions(&self) -> Dimensions {
		Dimensions::ONE
	}

	fn encode(&self, color: Rgb, dimensions: Dimensions) -> Vec<u8> {
		encode(color, dimensions)
	}
}

#[cfg(feature = "png-crate")]
pub use self::pngCrate::PngCrate;

#[cfg(feature = "png-crate")]
mod pngCrate {
	use {
		super::{encode, scanlines, Dimensions, PngSource},
		crate::palette::Rgb,
		core::num::NonZeroU32,
		png::{BitDepth, ColorType, EncodingError},
	};

	/// Backed by the `png` crate, the way the bigger 16x16 sprites are made.
	#[derive(Clone, Copy, Debug, Default)]
	pub struct PngCrate;

	const SPRITE_SIDE: NonZeroU32 = match NonZeroU32::new(16) {
		Some(side) => side,
		None => unreachable!(),
	};

	impl PngSource for PngCrate {
		fn name(&self) -> &'static str {
			"png crate"
		}

		fn defaultDimensions(&self) -> Dimensions {
			Dimensions::square(SPRITE_SIDE)
		}

		fn encode(&self, color: Rgb, dimensions: Dimensions) -> Vec<u8> {
			encodeWithPngCrate(color, dimensions).unwrap_or_else(|err| {
				log::warn!("png crate could not encode {dimensions} {color:?} ({err}), using the minimal encoder");
				encode(color, dimensions)
			})
		}
	}

	fn encodeWithPngCrate(color: Rgb, dimensions: Dimensions) -> Result<Vec<u8>, EncodingError> {
		let data = scanlines(color, dimensions);
		let (width, height) = (dimensions.width.get(), dimensions.height.get());
		let mut pixels = Vec::with_capacity(data.len() - height as usize);
		// the png crate filters rows itself, so hand it bare pixels
		for row in data.chunks_exact(data.len() / height as usize) {
			pixels.extend_from_slice(&row[1..]);
		}
		let mut png = Vec::new();
		{
			let mut encoder = png::Encoder::new(&mut png, width, height);
			encoder.set_color(ColorType::Rgb);
			encoder.set_depth(BitDepth::Eight);
			let mut writer = encoder.write_header()?;
			writer.write_image_data(&pixels)?;
			writer.finish()?;
		}
		Ok(png)
	}
}

/// Picks the image source for this run. The `png` crate wins when it was compiled in
/// and `forceMinimal` is off.
#[must_use]
pub fn probe(forceMinimal: bool) -> Box<dyn PngSource> {
	#[cfg(feature = "png-crate")]
	if !forceMinimal {
		log::debug!("image source: png crate");
		return Box::new(PngCrate);
	}
	#[cfg(not(feature = "png-crate"))]
	if !forceMinimal {
		log::debug!("png crate not compiled in");
	}
	log::debug!("image source: minimal");
	Box::new(MinimalPng)
}

/// A complete PNG file where every pixel is `color`.
#[must_use]
pub fn encode(color: Rgb, dimensions: Dimensions) -> Vec<u8> {
	encodeChunked(color, dimensions, MAX_CHUNK_DATA_LEN)
}

/// [`encode`], with the compressed stream cut into `IDAT`s of at most `maxChunkLen` bytes.
fn encodeChunked(color: Rgb, dimensions: Dimensions, maxChunkLen: usize) -> Vec<u8> {
	debug_assert!((1..=MAX_CHUNK_DATA_LEN).contains(&maxChunkLen));
	let idat = miniz_oxide::deflate::compress_to_vec_zlib(&scanlines(color, dimensions), ZLIB_LEVEL);
	let numIDATs = idat.len().div_ceil(maxChunkLen).max(1);
	let mut png = Vec::with_capacity(
		SIGNATURE.len() + (2 + numIDATs) * CHUNK_OVERHEAD + IHDR_LEN + idat.len(),
	);
	png.extend_from_slice(&SIGNATURE);
	pushChunk(&mut png, b"IHDR", &ihdr(dimensions));
	for data in idat.chunks(maxChunkLen) {
		pushChunk(&mut png, b"IDAT", data);
	}
	pushChunk(&mut png, b"IEND", &[]);
	png
}

fn ihdr(Dimensions { width, height }: Dimensions) -> [u8; IHDR_LEN] {
	let mut ihdr = [0; IHDR_LEN];
	BE::write_u32(&mut ihdr[0..4], width.get());
	BE::write_u32(&mut ihdr[4..8], height.get());
	ihdr[8..].copy_from_slice(&[BIT_DEPTH, COLOR_TYPE_RGB, COMPRESSION_METHOD, FILTER_METHOD, INTERLACE_METHOD]);
	ihdr
}

/// Unfiltered image data: per row, a `0` filter byte then `width` copies of the color.
#[must_use]
pub fn scanlines(color: Rgb, Dimensions { width, height }: Dimensions) -> Vec<u8> {
	let (width, height) = (width.get() as usize, height.get() as usize);
	let rowLen = 1 + RGB_SIZE * width;
	let mut data = Vec::with_capacity(rowLen * height);
	for _ in 0..height {
		data.push(FILTER_NONE);
		for _ in 0..width {
			data.extend_from_slice(&color.channels());
		}
	}
	data
}

fn pushChunk(png: &mut Vec<u8>, tag: &[u8; 4], data: &[u8]) {
	let start = png.len();
	png.resize(start + CHUNK_OVERHEAD + data.len(), 0);
	let chunk = &mut png[start..];
	let (lengthTag, rest) = chunk.split_at_mut(8);
	// callers keep data within MAX_CHUNK_DATA_LEN, which fits in u32
	#[allow(clippy::cast_possible_truncation)]
	BE::write_u32(&mut lengthTag[..4], data.len() as u32);
	lengthTag[4..].copy_from_slice(tag);
	let (body, crc) = rest.split_at_mut(data.len());
	body.copy_from_slice(data);
	let mut hasher = crc32fast::Hasher::new();
	hasher.update(tag);
	hasher.update(data);
	BE::write_u32(crc, hasher.finalize());
}
