use csv::{Reader, ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::io::Read;

/// Tab-delimited reader configured for instrument exports: rows may have
/// differing field counts (trailer rows) and the first row holds column names.
pub fn tab_reader<R: Read>(source: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(source)
}

/// Column name to field index, built once from a header row.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Duplicate names resolve to the rightmost column.
    pub fn from_headers(headers: &StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_string(), idx))
            .collect();
        Self { positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Lenient access: absent column or short row yields an empty, trimmed field.
    pub fn field<'r>(&self, record: &'r StringRecord, name: &str) -> &'r str {
        self.position(name)
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .unwrap_or("")
    }

    /// Resolve every name, reporting the first one absent from the header.
    pub fn require<const N: usize>(&self, names: [&str; N]) -> Result<[usize; N], String> {
        let mut out = [0usize; N];
        for (slot, name) in out.iter_mut().zip(names) {
            *slot = self.position(name).ok_or_else(|| name.to_string())?;
        }
        Ok(out)
    }
}
