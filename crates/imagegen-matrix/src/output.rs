use crate::matrix::MatrixEntry;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;

/// Write the matrix as a single-line JSON array for the CI orchestrator.
pub fn write_compact<W: Write>(entries: &[MatrixEntry], mut out: W) -> serde_json::Result<()> {
    serde_json::to_writer(&mut out, entries)?;
    writeln!(out).map_err(serde_json::Error::io)
}

/// Write the matrix as tab-indented JSON for humans reading CI logs.
pub fn write_pretty<W: Write>(entries: &[MatrixEntry], mut out: W) -> serde_json::Result<()> {
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
    entries.serialize(&mut serializer)?;
    writeln!(out).map_err(serde_json::Error::io)
}
