#![allow(non_snake_case)]

use {
	pgttd_sprites::{buildStatement, encode, Dimensions, Palette},
	base64::{engine::general_purpose::STANDARD, Engine},
	std::{fs, process::Command},
	tempfile::tempdir,
};

const GENERATOR: &str = env!("CARGO_BIN_EXE_pgttd_sprites");

#[test]
fn generator_writes_the_seed_file_and_reports_it() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("out.sql");
	let output = Command::new(GENERATOR).arg("--output").arg(&path).arg("--minimal").output().unwrap();
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

	let stdout = String::from_utf8(output.stdout).unwrap();
	assert!(stdout.contains(&format!("Wrote 3 sprites to {}", path.display())), "{stdout}");

	let expected: String = Palette::builtin()
		.iter()
		.map(|(name, color)| buildStatement(name, &STANDARD.encode(encode(color, Dimensions::ONE))) + "\n")
		.collect();
	assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn generator_short_flag_and_palette_file() {
	let dir = tempdir().unwrap();
	let (palettePath, path) = (dir.path().join("palette.toml"), dir.path().join("nested").join("seed.sql"));
	fs::write(&palettePath, "[[sprite]]\nname = \"depot\"\nrgb = [1, 2, 3]\n").unwrap();
	let output =
		Command::new(GENERATOR).arg("-o").arg(&path).arg("--palette").arg(&palettePath).arg("--minimal").output().unwrap();
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
	assert!(String::from_utf8_lossy(&output.stdout).contains("Wrote 1 sprites to"));
	let text = fs::read_to_string(&path).unwrap();
	assert_eq!(text.lines().count(), 1);
	assert!(text.starts_with("INSERT INTO sprites(name, image_base64) VALUES ('depot', '"));
}

#[test]
fn generator_fails_on_unwritable_output() {
	let dir = tempdir().unwrap();
	let blocker = dir.path().join("not_a_dir");
	fs::write(&blocker, "").unwrap();
	let path = blocker.join("out.sql");

	let output =
		Command::new(GENERATOR).env("RUST_LOG", "error").arg("--output").arg(&path).arg("--minimal").output().unwrap();
	assert!(!output.status.success());
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("not_a_dir"));
	assert!(!String::from_utf8_lossy(&output.stdout).contains("Wrote"));
	assert!(!path.exists());
}

#[test]
fn generator_rejects_a_zero_size() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("out.sql");
	let output = Command::new(GENERATOR).arg("--output").arg(&path).arg("--size").arg("0").output().unwrap();
	assert!(!output.status.success());
	assert!(!path.exists());
}
