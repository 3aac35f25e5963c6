//! JSON documents read through `cap_std`.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::de::DeserializeOwned;

use super::CliError;

/// Read and deserialise a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_to_string(path: &Path) -> io::Result<String> {
    let (parent, file_name) = parent_and_file_name(path)?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    directory.read_to_string(Path::new(&file_name))
}

fn parent_and_file_name(path: &Path) -> io::Result<(PathBuf, OsString)> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} does not name a file", path.display()),
        )
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((parent, file_name.to_os_string()))
}
