use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{ReportError, Table};

/// Reads a whole source table from disk
pub fn read_table(path: &Path) -> Result<Table, ReportError> {
    let file = File::open(path)
        .map_err(|error| ReportError::file_not_found(path, error))?;

    Ok(Table::from_reader(BufReader::new(file))?)
}

/// An output file that was written completely, but not moved into place yet
///
/// Dropping it without [`Staged::commit`] removes the written data.
#[derive(Debug)]
pub struct Staged {
    file: NamedTempFile,
    path: PathBuf,
}

impl Staged {
    /// Writes the contents of a file next to its final location
    pub fn write<F>(path: &Path, write: F) -> Result<Self, ReportError>
        where F: FnOnce(&mut File) -> Result<(), csv::Error>
    {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)
            .map_err(|error| ReportError::file_not_found(dir, error))?;
        write(file.as_file_mut())?;

        Ok(Self { file, path: path.to_path_buf() })
    }

    /// Moves the file to its final location, replacing existing files
    pub fn commit(self) -> Result<(), ReportError> {
        let Self { file, path } = self;
        file.persist(&path)
            .map_err(|error| ReportError::file_not_found(path, error.error))?;

        Ok(())
    }
}
