use {
	const_format::concatcp,
	core::fmt::Display,
	memchr::{memchr, memchr_iter},
};

pub const TABLE: &str = "sprites";
pub const NAME_COLUMN: &str = "name";
pub const IMAGE_COLUMN: &str = "image_base64";

const INSERT_PREFIX: &str = concatcp!("INSERT INTO ", TABLE, "(", NAME_COLUMN, ", ", IMAGE_COLUMN, ") VALUES (");
const INSERT_SUFFIX: &str = ");";

/// Quotes `value` as an SQL string literal, doubling any `'` inside.
///
/// Paths have no `Display`; pass `path.display()`.
#[must_use]
pub fn escape(value: impl Display) -> String {
	let text = value.to_string();
	let mut quoted = String::with_capacity(text.len() + memchr_iter(b'\'', text.as_bytes()).count() + 2);
	quoted.push('\'');
	let mut rest = text.as_str();
	while let Some(i) = memchr(b'\'', rest.as_bytes()) {
		quoted.push_str(&rest[..=i]);
		quoted.push('\'');
		rest = &rest[i + 1..];
	}
	quoted.push_str(rest);
	quoted.push('\'');
	quoted
}

/// `INSERT INTO sprites(name, image_base64) VALUES ('<name>', '<payload>');`
#[must_use]
pub fn buildStatement(name: &str, payload: &str) -> String {
	let (name, payload) = (escape(name), escape(payload));
	let mut statement =
		String::with_capacity(INSERT_PREFIX.len() + name.len() + 2 + payload.len() + INSERT_SUFFIX.len());
	statement.push_str(INSERT_PREFIX);
	statement.push_str(&name);
	statement.push_str(", ");
	statement.push_str(&payload);
	statement.push_str(INSERT_SUFFIX);
	statement
}
