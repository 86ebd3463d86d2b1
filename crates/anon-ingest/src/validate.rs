//! Input file checks performed before any data is loaded.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Maximum input file size (2 GiB default).
pub const MAX_INPUT_FILE_SIZE: u64 = 2 * 1024 * 1024 * 1024;

pub(crate) fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check that the input exists, is a regular file, is non-empty and is not
/// larger than [`MAX_INPUT_FILE_SIZE`].
pub fn validate_input_file(path: &Path) -> Result<u64> {
    validate_input_file_with_limit(path, MAX_INPUT_FILE_SIZE)
}

/// Check the input file against a custom size limit. Returns the file size.
pub fn validate_input_file_with_limit(path: &Path, max_size: u64) -> Result<u64> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if !metadata.is_file() {
        return Err(IngestError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() == 0 {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(metadata.len())
}

/// Reject text files that start with a UTF-16 byte-order mark.
///
/// A UTF-8 BOM is acceptable; the CSV readers strip it.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}
