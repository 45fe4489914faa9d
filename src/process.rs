//! File-level driver: read, parse, sort, report, write.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::document::{Dispatch, DispatchOptions, dispatch};
use crate::error::DetsortError;
use crate::report;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    /// Shape dispatch result, including per-list statistics.
    pub dispatch: Dispatch,
    /// Size in bytes of the input file.
    pub original_size: u64,
    /// Size in bytes of the written file, when a write occurred.
    pub written_size: Option<u64>,
}

/// Process the file named by `config`, appending the report to `out`.
///
/// On error `out` may hold a partial report; callers discard it.
pub fn process_file(
    config: &Config,
    use_color: bool,
    out: &mut String,
) -> Result<FileOutcome, DetsortError> {
    let path = config.input.as_path();
    let bytes = std::fs::read(path).map_err(|e| DetsortError::io(path, e))?;
    let original_size = bytes.len() as u64;
    debug!(path = %path.display(), original_size, "read input");

    let mut doc = parse_document(path, &bytes)?;

    let opts = DispatchOptions {
        dry_run: config.dry_run,
        timestamp_key: &config.timestamp_key,
        list_key: &config.list_key,
    };
    let result = dispatch(&mut doc, &opts);

    let stats = match result {
        Dispatch::Unsupported { type_name } => {
            report::write_unsupported(out, path, type_name, use_color);
            return Ok(FileOutcome {
                dispatch: result,
                original_size,
                written_size: None,
            });
        }
        Dispatch::Sorted(ref stats) => stats,
    };
    report::write_stats(out, path, stats, original_size, use_color);

    let mut written_size = None;
    if config.dry_run {
        report::write_dry(out, use_color);
    } else if result.modified(config.dry_run) {
        let destination = config.destination();
        let size = write_document(destination, &doc)?;
        report::write_written(out, destination, size, use_color);
        written_size = Some(size);
    } else {
        report::write_unchanged(out, use_color);
    }

    Ok(FileOutcome {
        dispatch: result,
        original_size,
        written_size,
    })
}

fn parse_document(path: &Path, bytes: &[u8]) -> Result<Value, DetsortError> {
    serde_json::from_slice(bytes).map_err(|source| DetsortError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `doc` as 2-space indented JSON with non-ASCII kept verbatim.
///
/// Returns the size of the written file. The file is truncated first; an
/// interrupted write leaves it partial.
pub fn write_document(destination: &Path, doc: &Value) -> Result<u64, DetsortError> {
    let io_err = |e: std::io::Error| DetsortError::io(destination, e);

    let file = File::create(destination).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, doc).map_err(|e| io_err(e.into()))?;
    writer.flush().map_err(io_err)?;
    drop(writer);

    let size = std::fs::metadata(destination).map_err(io_err)?.len();
    debug!(destination = %destination.display(), size, "wrote document");
    Ok(size)
}
