//! Command-line argument parsing for the `crush` tool.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit testing).
//!
//! Short options may be aggregated (e.g. `-d7v`). A bare `--` marks the end
//! of options; subsequent arguments are file paths regardless of a leading
//! `-`. Bad or unrecognised options return an `Err` whose message begins
//! with `"bad usage: "`.

use anyhow::{anyhow, Result};

use crate::block::types::{CLEVEL_DEFAULT, CLEVEL_OPT};
use crate::cli::constants::{display_level, set_display_level};
use crate::cli::help::{print_help, print_version};

/// Selected operation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OpMode {
    Compress,
    Decompress,
}

/// Options and filenames produced by the argument parsing loop.
#[derive(Debug)]
pub struct ParsedArgs {
    pub op_mode: OpMode,
    /// Compression level 5–10.
    pub c_level: i32,
    pub input_filename: Option<String>,
    pub output_filename: Option<String>,
    /// A `--help` / `--version` flag was handled; the caller should exit 0
    /// without performing any I/O.
    pub exit_early: bool,
    /// Program name, used in help output.
    pub exe_name: String,
}

/// Parse `std::env::args()`, skipping argv[0].
pub fn parse_args() -> Result<ParsedArgs> {
    let exe_name = std::env::args().next().unwrap_or_else(|| "crush".to_owned());
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&exe_name, &argv)
}

/// Parse an explicit argument list. `exe_name` is argv[0]; `argv` is
/// argv[1..].
pub fn parse_args_from(exe_name: &str, argv: &[String]) -> Result<ParsedArgs> {
    let mut op_mode = OpMode::Compress;
    let mut c_level: i32 = CLEVEL_DEFAULT;
    let mut input_filename: Option<String> = None;
    let mut output_filename: Option<String> = None;
    let mut exit_early = false;
    let mut no_more_options = false;

    let mut push_filename = |name: &str| -> Result<()> {
        if input_filename.is_none() {
            input_filename = Some(name.to_owned());
        } else if output_filename.is_none() {
            output_filename = Some(name.to_owned());
        } else {
            return Err(anyhow!("bad usage: unexpected extra argument '{}'", name));
        }
        Ok(())
    };

    for arg in argv {
        if no_more_options || !arg.starts_with('-') || arg == "-" {
            push_filename(arg)?;
            continue;
        }

        if let Some(long) = arg.strip_prefix("--") {
            match long {
                "" => no_more_options = true,
                "decompress" => op_mode = OpMode::Decompress,
                "optimal" => c_level = CLEVEL_OPT,
                "verbose" => set_display_level(display_level() + 1),
                "quiet" => set_display_level(display_level().saturating_sub(1)),
                "help" => {
                    print_help(exe_name);
                    exit_early = true;
                }
                "version" => {
                    print_version();
                    exit_early = true;
                }
                _ => return Err(anyhow!("bad usage: unknown option '--{}'", long)),
            }
            continue;
        }

        // Aggregated short options.
        for ch in arg[1..].chars() {
            match ch {
                '5'..='9' => c_level = ch as i32 - '0' as i32,
                'd' => op_mode = OpMode::Decompress,
                'v' => set_display_level(display_level() + 1),
                'q' => set_display_level(display_level().saturating_sub(1)),
                'h' => {
                    print_help(exe_name);
                    exit_early = true;
                }
                'V' => {
                    print_version();
                    exit_early = true;
                }
                _ => return Err(anyhow!("bad usage: unknown option '-{}'", ch)),
            }
        }
    }

    Ok(ParsedArgs {
        op_mode,
        c_level,
        input_filename,
        output_filename,
        exit_early,
        exe_name: exe_name.to_owned(),
    })
}
