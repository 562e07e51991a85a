//! File access helpers.

use std::fs::File;
use std::io;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::from_reader;

/// Reads a JSON-encoded type from a given file `path`.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, io::Error> {
    let file = open_buffered(path)?;
    Ok(from_reader(file)?)
}

pub trait ReadJsonFile<D> {
    fn read_json_file(path: impl AsRef<Path>) -> Result<D, io::Error>;
}

impl<D: DeserializeOwned> ReadJsonFile<D> for D {
    fn read_json_file(path: impl AsRef<Path>) -> Result<D, io::Error> {
        read_json(path)
    }
}

/// Opens `path` for buffered reading, naming the path in the error.
pub fn open_buffered(path: impl AsRef<Path>) -> Result<BufReader<File>, io::Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| with_path(err, path))?;
    Ok(BufReader::new(file))
}

/// Creates (or truncates) `path` for buffered writing, naming the path in the error.
pub fn create_buffered(path: impl AsRef<Path>) -> Result<BufWriter<File>, io::Error> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| with_path(err, path))?;
    Ok(BufWriter::new(file))
}

fn with_path(err: io::Error, path: &Path) -> io::Error {
    io::Error::new(err.kind(), format!("{}: {err}", path.display()))
}
