//! Binary entry point for the `crush` command-line tool.
//!
//! Control flow: [`parse_args`] processes flags and filenames, then [`run`]
//! dispatches to file compression or decompression and returns the process
//! exit code (0 = success, non-zero = error).

use crush::cli::args::{parse_args, OpMode, ParsedArgs};
use crush::cli::help::print_usage;
use crush::displaylevel;
use crush::io::{compress_filename, decompress_filename};

/// Execute the operation selected by argument parsing.
fn run(args: ParsedArgs) -> i32 {
    displaylevel!(
        3,
        "*** {} v{}, {} ***\n",
        crush::cli::constants::COMPRESSOR_NAME,
        crush::CRUSH_VERSION_STRING,
        crush::cli::constants::FORMAT_CREDIT
    );

    let (input_filename, output_filename) = match (args.input_filename, args.output_filename) {
        (Some(i), Some(o)) => (i, o),
        _ => {
            displaylevel!(1, "crush: missing INFILE or OUTFILE\n");
            print_usage(&args.exe_name);
            return 1;
        }
    };

    let result = match args.op_mode {
        OpMode::Compress => {
            compress_filename(&input_filename, &output_filename, args.c_level).map(|_| ())
        }
        OpMode::Decompress => {
            decompress_filename(&input_filename, &output_filename).map(|_| ())
        }
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            displaylevel!(1, "crush: {}: {}\n", input_filename, e);
            1
        }
    }
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("crush: {}", e);
            std::process::exit(1);
        }
    };

    // Help / version flags already produced their output.
    if args.exit_early {
        std::process::exit(0);
    }

    std::process::exit(run(args));
}
