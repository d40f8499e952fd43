//! Source and destination file helpers.

use std::fs::File;
use std::io;

/// Open an input file for reading.
pub fn open_src_file(path: &str) -> io::Result<File> {
    File::open(path)
}

/// Create (or truncate) an output file for writing.
pub fn open_dst_file(path: &str) -> io::Result<File> {
    File::create(path)
}
