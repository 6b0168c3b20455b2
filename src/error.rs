use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Error reading config {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
