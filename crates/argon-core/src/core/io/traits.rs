use crate::core::models::state::AtomicState;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Interface for reading and writing structure file formats.
///
/// Implementors handle the format-specific parsing and serialization; the
/// path-based helpers wrap them in buffered file handles.
pub trait StructureFile {
    /// Format-specific data carried alongside the parsed state (comments,
    /// per-atom symbols, layout flags) and needed to write it back out.
    type Metadata;

    type Error: Error + From<io::Error>;

    fn read_from(reader: &mut impl BufRead) -> Result<(AtomicState, Self::Metadata), Self::Error>;

    fn write_to(
        state: &AtomicState,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(AtomicState, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(
        state: &AtomicState,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(state, metadata, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
