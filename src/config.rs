//! Optional `sstyle.toml` settings for file selection.
//!
//! Only which files get checked is configurable; the rule set and its thresholds are fixed.

use std::{
	fs,
	path::{Path, PathBuf},
};

use regex::Regex;
use serde::Deserialize;

use crate::prelude::*;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "sstyle.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
	#[serde(default)]
	files: FilesSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FilesSection {
	#[serde(default = "default_extensions")]
	extensions: Vec<String>,
	#[serde(default)]
	exclude: Vec<String>,
	#[serde(default = "default_skip_generated")]
	skip_generated: bool,
}
impl Default for FilesSection {
	fn default() -> Self {
		Self {
			extensions: default_extensions(),
			exclude: Vec::new(),
			skip_generated: default_skip_generated(),
		}
	}
}

/// Resolved settings with compiled exclude patterns.
#[derive(Debug)]
pub(crate) struct Config {
	pub(crate) extensions: Vec<String>,
	pub(crate) exclude: Vec<Regex>,
	pub(crate) skip_generated: bool,
}
impl Config {
	/// Loads `path`, or `sstyle.toml` from the working directory when present.
	pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
		let (path, required) = match path {
			Some(path) => (path.to_path_buf(), true),
			None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
		};

		if !required && !path.is_file() {
			tracing::debug!(path = %path.display(), "No config file found; using defaults.");

			return Self::from_file(ConfigFile::default());
		}

		let text = fs::read_to_string(&path)
			.map_err(|err| eyre::eyre!("Failed to read config {}: {err}.", path.display()))?;
		let config = Self::from_toml(&text)
			.map_err(|err| eyre::eyre!("Invalid config {}: {err}", path.display()))?;

		tracing::debug!(path = %path.display(), "Loaded config.");

		Ok(config)
	}

	pub(crate) fn from_toml(text: &str) -> Result<Self> {
		Self::from_file(toml::from_str(text)?)
	}

	fn from_file(file: ConfigFile) -> Result<Self> {
		let exclude = file
			.files
			.exclude
			.iter()
			.map(|pattern| {
				Regex::new(pattern)
					.map_err(|err| eyre::eyre!("Invalid exclude pattern `{pattern}`: {err}."))
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(Self {
			extensions: file.files.extensions,
			exclude,
			skip_generated: file.files.skip_generated,
		})
	}

	/// True when `path` has a configured extension and matches no exclude pattern.
	pub(crate) fn accepts(&self, path: &Path) -> bool {
		let has_extension = path
			.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| self.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)));
		let display = path.to_string_lossy().replace('\\', "/");

		has_extension && !self.exclude.iter().any(|pattern| pattern.is_match(&display))
	}
}

fn default_extensions() -> Vec<String> {
	vec!["cs".to_owned()]
}

fn default_skip_generated() -> bool {
	true
}
