use super::traits::StructureFile;
use crate::core::elements;
use crate::core::models::state::AtomicState;
use nalgebra::Vector3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Metadata required to reproduce an XYZ file from an [`AtomicState`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XyzMetadata {
    /// The free-form comment line (line two of the file).
    pub comment: String,
    /// Per-atom element symbols, in array order.
    pub symbols: Vec<String>,
    /// Distinct symbols in order of first appearance; index equals the
    /// species id assigned to the corresponding atoms.
    pub species_symbols: Vec<String>,
    /// Whether the file carried the extended charge/velocity columns.
    pub extended: bool,
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Expected {expected} atom records, found {found}")]
    AtomCountMismatch { expected: usize, found: usize },
    #[error("Metadata carries {symbols} symbols for {atoms} atoms")]
    SymbolCountMismatch { symbols: usize, atoms: usize },
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("invalid atom count (value: '{value}')")]
    InvalidCount { value: String },
    #[error("invalid number in {column} column (value: '{value}')")]
    InvalidFloat {
        column: &'static str,
        value: String,
    },
    #[error("atom record has {found} fields (expected 4, 5, or 8)")]
    UnsupportedFieldCount { found: usize },
}

/// XYZ structure files.
///
/// Plain records are `symbol x y z`; the extended form appends
/// `charge vx vy vz`. Masses are filled from the element database (with
/// its carbon-like fallback) and species ids are assigned per distinct
/// symbol in first-appearance order.
pub struct XyzFile;

impl XyzFile {
    fn parse_float(
        field: &str,
        column: &'static str,
        line: usize,
    ) -> Result<f64, XyzError> {
        field.parse::<f64>().map_err(|_| XyzError::Parse {
            line,
            kind: XyzParseErrorKind::InvalidFloat {
                column,
                value: field.to_string(),
            },
        })
    }
}

impl StructureFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<(AtomicState, Self::Metadata), Self::Error> {
        let mut lines = reader.lines();

        let count_line = lines.next().unwrap_or(Ok(String::new()))?;
        let expected: usize = count_line.trim().parse().map_err(|_| XyzError::Parse {
            line: 1,
            kind: XyzParseErrorKind::InvalidCount {
                value: count_line.trim().to_string(),
            },
        })?;

        let comment = lines.next().transpose()?.unwrap_or_default();

        let mut state = AtomicState::new(expected);
        let mut metadata = XyzMetadata {
            comment,
            ..Default::default()
        };

        let mut found = 0;
        for (offset, line_res) in lines.enumerate() {
            let line_num = offset + 3;
            let line = line_res?;
            if found == expected {
                break;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }

            if !matches!(fields.len(), 4 | 5 | 8) {
                return Err(XyzError::Parse {
                    line: line_num,
                    kind: XyzParseErrorKind::UnsupportedFieldCount {
                        found: fields.len(),
                    },
                });
            }

            let symbol = fields[0].to_string();
            state.positions[found] = Vector3::new(
                Self::parse_float(fields[1], "x", line_num)?,
                Self::parse_float(fields[2], "y", line_num)?,
                Self::parse_float(fields[3], "z", line_num)?,
            );
            if fields.len() >= 5 {
                state.charges[found] = Self::parse_float(fields[4], "charge", line_num)?;
                metadata.extended = true;
            }
            if fields.len() == 8 {
                state.velocities[found] = Vector3::new(
                    Self::parse_float(fields[5], "vx", line_num)?,
                    Self::parse_float(fields[6], "vy", line_num)?,
                    Self::parse_float(fields[7], "vz", line_num)?,
                );
            }

            state.masses[found] = elements::lookup(&symbol).mass;
            let species = match metadata.species_symbols.iter().position(|s| *s == symbol) {
                Some(idx) => idx,
                None => {
                    metadata.species_symbols.push(symbol.clone());
                    metadata.species_symbols.len() - 1
                }
            };
            state.species[found] = species;
            metadata.symbols.push(symbol);

            found += 1;
        }

        if found != expected {
            return Err(XyzError::AtomCountMismatch { expected, found });
        }

        Ok((state, metadata))
    }

    fn write_to(
        state: &AtomicState,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        if metadata.symbols.len() != state.len() {
            return Err(XyzError::SymbolCountMismatch {
                symbols: metadata.symbols.len(),
                atoms: state.len(),
            });
        }

        writeln!(writer, "{}", state.len())?;
        writeln!(writer, "{}", metadata.comment)?;
        for (idx, symbol) in metadata.symbols.iter().enumerate() {
            let r = state.positions[idx];
            write!(writer, "{symbol:<3} {:14.8} {:14.8} {:14.8}", r.x, r.y, r.z)?;
            if metadata.extended {
                let v = state.velocities[idx];
                write!(
                    writer,
                    " {:10.6} {:14.8} {:14.8} {:14.8}",
                    state.charges[idx], v.x, v.y, v.z
                )?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}
