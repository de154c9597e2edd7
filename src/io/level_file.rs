//! Reader and writer for level files.
//!
//! Level files carry named `f64` arrays between the exporter and the
//! evolution code: grid coordinates going in, exported fields coming out.
//!
//! # File Format
//!
//! ```text
//! $BEGIN_variables:
//! $variable = alpha : length = 4
//! <4 little-endian f64 values>
//! $variable = beta_x : length = 4
//! <4 little-endian f64 values>
//! ```
//!
//! Each binary payload is followed by a newline. Readers also accept files
//! without the trailing newline.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::buffer::FieldBuffer;
use crate::error::ExportError;
use crate::types::{Grid, Schema};

/// First line of every level file.
pub const LEVEL_FILE_HEADER: &str = "$BEGIN_variables:";

/// Error type for level file I/O.
#[derive(Debug, Error)]
pub enum LevelFileError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// First line is not the level file header
    #[error("missing $BEGIN_variables: header")]
    MissingHeader,

    /// Variable header line could not be parsed
    #[error("malformed variable header: {line:?}")]
    MalformedHeader { line: String },

    /// Variable payload ended early
    #[error("variable {name} truncated: expected {expected} values")]
    Truncated { name: String, expected: usize },

    /// Required variable is absent
    #[error("level file has no variable {0}")]
    MissingVariable(String),

    /// Coordinates do not form a valid grid
    #[error(transparent)]
    Grid(#[from] ExportError),
}

/// Named arrays in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelFile {
    variables: Vec<(String, Vec<f64>)>,
}

impl LevelFile {
    /// Create an empty level file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store grid coordinates as variables `x`, `y` and `z`.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut file = Self::new();
        file.insert("x", grid.x().to_vec());
        file.insert("y", grid.y().to_vec());
        file.insert("z", grid.z().to_vec());
        file
    }

    /// Store the fields of `schema` under their names, in schema order.
    pub fn from_fields(fields: &FieldBuffer, schema: Schema) -> Self {
        let mut file = Self::new();
        for &field in schema.fields() {
            file.insert(field.name(), fields.field(field).to_vec());
        }
        file
    }

    /// Add a variable. An existing variable of the same name is replaced in place.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        let name = name.into();
        match self.variables.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = values,
            None => self.variables.push((name, values)),
        }
    }

    /// Values of a variable.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.variables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Variable names in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate over `(name, values)` in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.variables.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Build a grid from variables `x`, `y` and `z`.
    ///
    /// # Errors
    /// `MissingVariable` if a coordinate is absent, `Grid` if their lengths differ.
    pub fn grid(&self) -> Result<Grid, LevelFileError> {
        let coordinate = |name: &str| {
            self.get(name)
                .map(<[f64]>::to_vec)
                .ok_or_else(|| LevelFileError::MissingVariable(name.to_string()))
        };
        Ok(Grid::new(coordinate("x")?, coordinate("y")?, coordinate("z")?)?)
    }

    /// Write in level file format.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), LevelFileError> {
        writeln!(writer, "{}", LEVEL_FILE_HEADER)?;
        for (name, values) in &self.variables {
            writeln!(writer, "$variable = {} : length = {}", name, values.len())?;
            let mut bytes = Vec::with_capacity(values.len() * 8);
            for v in values {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
            writer.write_all(&bytes)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Parse a variable header line into name and length.
fn parse_variable_header(line: &str) -> Result<(String, usize), LevelFileError> {
    let malformed = || LevelFileError::MalformedHeader {
        line: line.to_string(),
    };

    let (name_part, length_part) = line.split_once(" : ").ok_or_else(malformed)?;

    let name_kv: Vec<&str> = name_part.split(" = ").collect();
    if name_kv.len() != 2 {
        return Err(malformed());
    }
    let length_kv: Vec<&str> = length_part.split(" = ").collect();
    if length_kv.len() != 2 {
        return Err(malformed());
    }

    let length = length_kv[1].trim().parse().map_err(|_| malformed())?;
    Ok((name_kv[1].to_string(), length))
}

/// Parse a level file from a reader.
pub fn parse_level_file<R: BufRead>(mut reader: R) -> Result<LevelFile, LevelFileError> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    if trim_line(&line) != LEVEL_FILE_HEADER {
        return Err(LevelFileError::MissingHeader);
    }

    let mut file = LevelFile::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        let header = trim_line(&line);
        // Separator newline after a payload
        if header.is_empty() {
            continue;
        }

        let (name, length) = parse_variable_header(&header)?;
        let n_bytes = length
            .checked_mul(8)
            .ok_or_else(|| LevelFileError::MalformedHeader { line: header.clone() })?;

        // Allocation follows the bytes read, not the header length
        let mut bytes = Vec::new();
        reader.by_ref().take(n_bytes as u64).read_to_end(&mut bytes)?;
        if bytes.len() < n_bytes {
            return Err(LevelFileError::Truncated {
                name,
                expected: length,
            });
        }

        let values = bytes
            .chunks_exact(8)
            .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
            .collect();
        file.insert(name, values);
    }

    Ok(file)
}

fn trim_line(line: &[u8]) -> String {
    String::from_utf8_lossy(line)
        .trim_end_matches(&['\n', '\r'][..])
        .to_string()
}

/// Read a level file.
///
/// # Example
///
/// ```ignore
/// use fuka_export::io::read_level_file;
/// use std::path::Path;
///
/// let level = read_level_file(Path::new("level3.173"))?;
/// for (name, values) in level.iter() {
///     println!("{}: {} values", name, values.len());
/// }
/// ```
pub fn read_level_file(path: &Path) -> Result<LevelFile, LevelFileError> {
    let file = File::open(path)?;
    parse_level_file(BufReader::new(file))
}

/// Write a level file, replacing any existing file at `path`.
pub fn write_level_file(path: &Path, level: &LevelFile) -> Result<(), LevelFileError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    level.write_to(&mut writer)?;
    writer.flush()?;
    Ok(())
}
