//! The command line interface.
use crate::check::{Verdict, run_all_checks};
use crate::input::read_data_files;
use crate::keys::{KeyLayout, write_coordinate_keys};
use crate::log;
use crate::report::write_report;
use crate::settings::{Settings, get_settings_file_path};
use ::log::info;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Check facility location model data for consistency before running the optimiser.
#[derive(Parser)]
#[command(version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Data files to check. Files are read in order and their contents combined.
    files: Vec<PathBuf>,
    /// Other commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Add coordinate join keys to a CSV file.
    Keys {
        /// The coordinate columns in the file.
        layout: KeyLayout,
        /// Path to the input CSV file.
        input: PathBuf,
        /// Path for the output CSV file.
        output: PathBuf,
        /// Whether to overwrite the output file if it already exists
        #[arg(long)]
        overwrite: bool,
    },
    /// Manage the program settings file.
    Settings {
        /// The available subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

/// Subcommands for settings
#[derive(Subcommand)]
enum SettingsSubcommands {
    /// Edit the program settings file
    Edit,
    /// Get the path to where the settings file is read from
    Path,
    /// Write the contents of a placeholder `settings.toml` to the console
    DumpDefault,
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Keys {
                layout,
                input,
                output,
                overwrite,
            } => handle_keys_command(layout, &input, &output, overwrite, None),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

impl SettingsSubcommands {
    /// Execute the supplied settings subcommand
    fn execute(self) -> Result<()> {
        let file_path = get_settings_file_path();
        match self {
            Self::Edit => {
                if !file_path.is_file() {
                    if let Some(dir_path) = file_path.parent() {
                        fs::create_dir_all(dir_path).with_context(|| {
                            format!("Failed to create directory: {}", dir_path.display())
                        })?;
                    }
                    fs::write(&file_path, Settings::default_file_contents())?;
                }

                println!("Opening settings file for editing: {}", file_path.display());
                edit::edit_file(&file_path)?;
            }
            Self::Path => println!("{}", file_path.display()),
            Self::DumpDefault => print!("{}", Settings::default_file_contents()),
        }

        Ok(())
    }
}

/// Parse CLI arguments and run the requested command, returning the exit code
pub fn run_cli() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            return Ok(parse_error_exit_code(&err));
        }
    };

    // Invoked as: `$ facloc --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(command) = cli.command {
        command.execute()?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.files.is_empty() {
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(ExitCode::FAILURE);
    }

    let verdict = handle_check_command(&cli.files, None)?;
    Ok(if verdict.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Load program settings, if not provided, and initialise the logger if needed
fn init_program(settings: Option<Settings>) -> Result<Settings> {
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    if !log::is_logger_initialised() {
        log::init(Some(&settings.log_level)).context("Failed to initialise logging.")?;
    }

    Ok(settings)
}

/// The exit code for a failure to parse the command line.
///
/// Requests for help or the version are reported through clap errors too, but aren't failures.
fn parse_error_exit_code(err: &clap::Error) -> ExitCode {
    if err.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Handle checking data files.
///
/// Every file is read before any check is run. The report is printed to stdout.
///
/// # Returns
///
/// The verdict of the checks, or an error if a file could not be read.
pub fn handle_check_command<P: AsRef<Path>>(
    file_paths: &[P],
    settings: Option<Settings>,
) -> Result<Verdict> {
    let settings = init_program(settings)?;

    let data = read_data_files(file_paths).context("Failed to load data.")?;
    info!("Loaded data from {} file(s)", file_paths.len());

    let findings = run_all_checks(&data);
    let verdict = write_report(&mut io::stdout().lock(), &findings, settings.show_info)?;

    Ok(verdict)
}

/// Handle the `keys` command.
pub fn handle_keys_command(
    layout: KeyLayout,
    input_path: &Path,
    output_path: &Path,
    overwrite: bool,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = init_program(settings)?;

    // Overwriting can also be enabled in the settings file
    write_coordinate_keys(input_path, output_path, layout, overwrite || settings.overwrite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_verify_cli() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["facloc", "--bogus", "model.dat"], ExitCode::FAILURE)]
    #[case(&["facloc", "keys", "sites"], ExitCode::FAILURE)]
    #[case(&["facloc", "--help"], ExitCode::SUCCESS)]
    #[case(&["facloc", "--version"], ExitCode::SUCCESS)]
    fn test_parse_error_exit_code(#[case] args: &[&str], #[case] expected: ExitCode) {
        let err = Cli::try_parse_from(args).err().unwrap();
        assert_eq!(parse_error_exit_code(&err), expected);
    }
}
