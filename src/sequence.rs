use crate::error::{Error, Result};
use midly::Smf;
use std::path::Path;
use tracing::debug;

/// Reads the raw bytes of a Standard MIDI File.
///
/// The parsed [`Smf`] borrows from these bytes, so the caller keeps them alive for as long as
/// the sequence is in use.
pub fn read_midi_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })
}

pub fn parse_sequence<'a>(data: &'a [u8], path: &Path) -> Result<Smf<'a>> {
    let smf = Smf::parse(data).map_err(|source| Error::Parse {
        path: path.to_owned(),
        source,
    })?;
    debug!(
        "{} has {} tracks and {} events",
        path.display(),
        smf.tracks.len(),
        smf.tracks.iter().map(|track| track.len()).sum::<usize>()
    );
    Ok(smf)
}

pub fn save_sequence(smf: &Smf, path: &Path) -> Result<()> {
    smf.save(path).map_err(|source| Error::Save {
        path: path.to_owned(),
        source,
    })?;
    debug!("wrote {}", path.display());
    Ok(())
}
