//! Pretty JSON export
//!
//! Output shapes:
//!
//! ```text
//! index:   { term: { location: [position, ...] } }
//! counts:  { location: total }
//! results: { query: [ { "count": n, "score": 0.33333333, "where": location } ] }
//! ```
//!
//! Keys come out in ascending order, nesting is indented with tabs and
//! scores have exactly eight decimals.

use crate::table::ResultsTable;
use lexindex_core::{Error, Result};
use lexindex_engine::InvertedIndex;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Serializer;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Tab-indented `PrettyFormatter` with fixed eight-decimal floats.
struct ScoreFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl ScoreFormatter<'_> {
    fn new() -> Self {
        ScoreFormatter {
            pretty: PrettyFormatter::with_indent(b"\t"),
        }
    }
}

impl Formatter for ScoreFormatter<'_> {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        write!(writer, "{:.8}", value)
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_object_value(writer)
    }
}

fn to_writer<T, W>(value: &T, writer: W) -> Result<()>
where
    T: ?Sized + Serialize,
    W: Write,
{
    let mut ser = Serializer::with_formatter(writer, ScoreFormatter::new());
    value.serialize(&mut ser)?;
    Ok(())
}

fn to_string<T: ?Sized + Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    to_writer(value, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::invalid_input(e.to_string()))
}

fn to_file<T: ?Sized + Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    to_writer(value, &mut writer).map_err(|e| match e {
        Error::Serialization(source) if source.is_io() => Error::io(path, io::Error::from(source)),
        other => other,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| Error::io(path, e))?;
    debug!(target: "lexindex::export", path = %path.display(), "Wrote export");
    Ok(())
}

/// Term → location → positions as pretty JSON.
pub fn index_to_string(index: &InvertedIndex) -> Result<String> {
    to_string(index.term_map())
}

/// Write the term → location → positions structure to `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written.
pub fn write_index(index: &InvertedIndex, path: &Path) -> Result<()> {
    to_file(index.term_map(), path)
}

/// Location → token total as pretty JSON.
pub fn counts_to_string(index: &InvertedIndex) -> Result<String> {
    to_string(index.total_map())
}

/// Write the location → token total map to `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written.
pub fn write_counts(index: &InvertedIndex, path: &Path) -> Result<()> {
    to_file(index.total_map(), path)
}

/// Query → ranked results as pretty JSON.
pub fn results_to_string(table: &ResultsTable) -> Result<String> {
    to_string(table)
}

/// Write the results table to `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written.
pub fn write_results(table: &ResultsTable, path: &Path) -> Result<()> {
    to_file(table, path)
}
