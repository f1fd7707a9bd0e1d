use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::snapshot::SimulationState;

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Export a snapshot as JSONL files in the given output directory.
///
/// Creates the output directory if it does not exist. Writes 3 files:
/// - `agents.jsonl`: one Agent per line, relationships inline
/// - `coalitions.jsonl`: one Coalition per line
/// - `metrics.jsonl`: the rolling metrics history, oldest first
pub fn flush_to_jsonl(state: &SimulationState, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(&output_dir.join("agents.jsonl"), state.agents.iter())?;
    write_jsonl(&output_dir.join("coalitions.jsonl"), state.coalitions.iter())?;
    write_jsonl(&output_dir.join("metrics.jsonl"), state.metrics.iter())?;

    Ok(())
}
