//! Usage and version text.

use crate::cli::constants::{COMPRESSOR_NAME, FORMAT_CREDIT};
use crate::displayout;

/// One-line usage summary, printed on bad usage and at the top of help.
pub fn print_usage(exe_name: &str) {
    displayout!("Usage: {} [options] INFILE OUTFILE\n", exe_name);
}

/// Full option listing for `-h` / `--help`.
pub fn print_help(exe_name: &str) {
    print_usage(exe_name);
    displayout!("\nOptions:\n");
    displayout!("  -5 ... -9    compression level 5 (fast, default) to 9 (slow)\n");
    displayout!("  --optimal    level 10: exhaustive parse, best ratio\n");
    displayout!("  -d, --decompress\n");
    displayout!("               decompress INFILE into OUTFILE\n");
    displayout!("  -v, --verbose\n");
    displayout!("               more output to stderr\n");
    displayout!("  -q, --quiet  suppress the statistics line\n");
    displayout!("  -h, --help   show this help and exit\n");
    displayout!("  -V, --version\n");
    displayout!("               show version and exit\n");
}

/// Version banner for `-V` / `--version`.
pub fn print_version() {
    displayout!(
        "{} v{} ({})\n",
        COMPRESSOR_NAME,
        crate::CRUSH_VERSION_STRING,
        FORMAT_CREDIT
    );
}
