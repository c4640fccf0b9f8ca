use crate::text::TextLocation;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures while loading, converting or saving a MIDI file.
///
/// `Read` and `Parse` are the two faces of a load failure and are always fatal, as is `Save`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read MIDI file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse MIDI file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: midly::Error,
    },
    #[error("cannot write MIDI file {}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum EncodingError {
    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),
    #[error("cannot encode text into {0}")]
    UnsupportedTarget(&'static str),
    #[error("{location} is not valid {encoding}")]
    Malformed {
        encoding: &'static str,
        location: TextLocation,
    },
    #[error("{location} contains characters not representable in {encoding}")]
    Unmappable {
        encoding: &'static str,
        location: TextLocation,
    },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DetectionError {
    #[error("no text to detect")]
    Empty,
    #[error("only ASCII text, any ASCII-compatible charset fits")]
    AsciiOnly,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
