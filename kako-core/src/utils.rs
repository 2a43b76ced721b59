//! Directory inspection helpers shared by the extractor and the cropper.

use std::fs;
use std::io;
use std::path::Path;

/// Counts the non-directory entries directly inside `dir`.
pub fn count_files(dir: &Path) -> io::Result<usize> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        if !entry?.file_type()?.is_dir() {
            count += 1;
        }
    }
    Ok(count)
}
