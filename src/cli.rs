// crates.io
use clap::{
	Parser, Subcommand, ValueEnum,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};

// std
use std::{path::PathBuf, process::ExitCode};

// self
use crate::{
	config::Config,
	prelude::*,
	style::{self, RunSummary},
};

/// Command-line interface for the C# style checker.
#[derive(Debug, Parser)]
#[command(
	version = concat!(
		env!("CARGO_PKG_VERSION"),
		"-",
		env!("VERGEN_GIT_SHA"),
		"-",
		env!("VERGEN_CARGO_TARGET_TRIPLE"),
	),
	rename_all = "kebab",
	styles = styles(),
)]
pub(crate) struct Cli {
	/// Config file. Defaults to `sstyle.toml` in the working directory when present.
	#[arg(long, global = true, value_name = "PATH")]
	config: Option<PathBuf>,
	/// Report format.
	#[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
	format: OutputFormat,
	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Run style checks and report violations.
	Check {
		/// Optional C# files. Defaults to git-tracked files with the configured extensions.
		files: Vec<PathBuf>,
	},
	/// Apply all safe automatic fixes, then re-check.
	Fix {
		/// Optional C# files. Defaults to git-tracked files with the configured extensions.
		files: Vec<PathBuf>,
	},
	/// Print implemented rule IDs.
	Coverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
	Human,
	Json,
}

impl Cli {
	pub(crate) fn run(&self) -> Result<ExitCode> {
		match &self.command {
			Command::Check { files } => {
				let config = Config::load(self.config.as_deref())?;
				let summary = style::run_check(files, &config)?;

				self.print_summary(&summary, false)?;

				if summary.violation_count > 0 {
					eprintln!("\nFound {} style violation(s).", summary.violation_count);

					return Ok(ExitCode::FAILURE);
				}
			},
			Command::Fix { files } => {
				let config = Config::load(self.config.as_deref())?;
				let summary = style::run_fix(files, &config)?;

				self.print_summary(&summary, true)?;

				if summary.violation_count > 0 {
					eprintln!(
						"\nFound {} remaining style violation(s) after fix.",
						summary.violation_count
					);

					return Ok(ExitCode::FAILURE);
				}
			},
			Command::Coverage => style::print_coverage(),
		}

		Ok(ExitCode::SUCCESS)
	}

	fn print_summary(&self, summary: &RunSummary, fix_mode: bool) -> Result<()> {
		if self.format == OutputFormat::Json {
			println!("{}", serde_json::to_string_pretty(summary)?);

			return Ok(());
		}

		for violation in &summary.violations {
			println!("{}", violation.format());
		}

		if fix_mode {
			println!(
				"\nChecked {} file(s). Applied {} fix(es).",
				summary.file_count, summary.applied_fix_count
			);
		} else {
			println!("\nChecked {} file(s).", summary.file_count);
		}

		if summary.unfixable_count > 0 {
			println!("{} violation(s) require manual fixes.", summary.unfixable_count);
		}

		Ok(())
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Red.on_default() | Effects::BOLD)
		.usage(AnsiColor::Red.on_default() | Effects::BOLD)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}
