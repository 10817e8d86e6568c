// ── Output writer ──
//
// Each table gets two streams, resource definitions and import bindings.
// Both are buffered for the whole table and flushed once in `finish`;
// nothing is written atomically.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CoreError;
use crate::table::Table;

/// Opens the pair of streams for a table.
pub trait TableSink {
    type Writer: Write;

    fn open(&mut self, table: Table) -> Result<TableStreams<Self::Writer>, CoreError>;
}

/// The definitions and import streams of one table.
pub struct TableStreams<W: Write> {
    definitions: W,
    definitions_path: PathBuf,
    imports: W,
    imports_path: PathBuf,
}

impl<W: Write> TableStreams<W> {
    pub fn new(
        definitions: W,
        definitions_path: PathBuf,
        imports: W,
        imports_path: PathBuf,
    ) -> Self {
        Self {
            definitions,
            definitions_path,
            imports,
            imports_path,
        }
    }

    /// Append a block, followed by a blank line.
    pub fn write_definition(&mut self, block: &str) -> Result<(), CoreError> {
        write_block(&mut self.definitions, &self.definitions_path, block)
    }

    pub fn write_import(&mut self, block: &str) -> Result<(), CoreError> {
        write_block(&mut self.imports, &self.imports_path, block)
    }

    /// Flush both streams and hand back the underlying writers.
    pub fn finish(mut self) -> Result<(W, W), CoreError> {
        self.definitions
            .flush()
            .map_err(|e| CoreError::write(&self.definitions_path, e))?;
        self.imports
            .flush()
            .map_err(|e| CoreError::write(&self.imports_path, e))?;
        Ok((self.definitions, self.imports))
    }
}

fn write_block<W: Write>(out: &mut W, path: &Path, block: &str) -> Result<(), CoreError> {
    out.write_all(block.as_bytes())
        .and_then(|()| out.write_all(b"\n"))
        .map_err(|e| CoreError::write(path, e))
}

/// Writes `<table>.tf` and `<table>_import.tf` under a directory, creating
/// it on first use.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn create(path: &Path) -> Result<BufWriter<File>, CoreError> {
        File::create(path)
            .map(BufWriter::new)
            .map_err(|e| CoreError::write(path, e))
    }
}

impl TableSink for FileSink {
    type Writer = BufWriter<File>;

    fn open(&mut self, table: Table) -> Result<TableStreams<Self::Writer>, CoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| CoreError::write(&self.dir, e))?;

        let definitions_path = self.dir.join(table.definitions_file());
        let imports_path = self.dir.join(table.imports_file());
        debug!(
            definitions = %definitions_path.display(),
            imports = %imports_path.display(),
            "opening table streams"
        );

        Ok(TableStreams::new(
            Self::create(&definitions_path)?,
            definitions_path,
            Self::create(&imports_path)?,
            imports_path,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blocks_are_separated_by_blank_lines() {
        let mut streams = TableStreams::new(
            Vec::new(),
            PathBuf::from("zone.tf"),
            Vec::new(),
            PathBuf::from("zone_import.tf"),
        );
        streams.write_definition("a {}\n").unwrap();
        streams.write_definition("b {}\n").unwrap();
        streams.write_import("import {}\n").unwrap();
        let (definitions, imports) = streams.finish().unwrap();
        assert_eq!(String::from_utf8(definitions).unwrap(), "a {}\n\nb {}\n\n");
        assert_eq!(String::from_utf8(imports).unwrap(), "import {}\n\n");
    }

    #[test]
    fn file_sink_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out").join("nested");
        let mut sink = FileSink::new(&dir);

        let mut streams = sink.open(Table::Zone).unwrap();
        streams.write_definition("zone\n").unwrap();
        streams.finish().unwrap();

        assert_eq!(fs::read_to_string(dir.join("zone.tf")).unwrap(), "zone\n\n");
        assert_eq!(fs::read_to_string(dir.join("zone_import.tf")).unwrap(), "");
    }

    #[test]
    fn unwritable_directory_reports_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "").unwrap();

        let mut sink = FileSink::new(blocker.join("out"));
        let err = sink.open(Table::Host).err().unwrap();
        assert!(matches!(err, CoreError::Write { .. }));
    }
}
