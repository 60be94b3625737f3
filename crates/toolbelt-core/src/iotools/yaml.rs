//! Single-document YAML load/dump.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{io_err, Result};

pub fn loads_yaml<T: DeserializeOwned>(s: &str) -> Result<T> {
    Ok(serde_yaml::from_str(s)?)
}

pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(io_err(path))?;
    Ok(serde_yaml::from_reader(BufReader::new(file))?)
}

pub fn dumps_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

pub fn dump_yaml<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(io_err(path))?;
    let mut w = BufWriter::new(file);
    serde_yaml::to_writer(&mut w, value)?;
    w.flush().map_err(io_err(path))
}
