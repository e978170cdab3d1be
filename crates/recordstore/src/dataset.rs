use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::warn;

use crate::{FormField, Record, Value};

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("CSV parse error: {0}")]
    Parse(String),

    #[error("CSV serialization error: {0}")]
    Serialize(String),
}

/// All rows of the backing file, materialized in memory. The header is the
/// first line of the file; every row carries one value per column.
///
/// `headers` is the header line as written. `columns` holds the unique keys
/// rows are addressed by: a repeated header name gets a `_1`, `_2`, ...
/// suffix so no cell is shadowed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Dataset {
    pub fn parse(text: &str) -> Result<Self, CsvError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| CsvError::Parse(e.to_string()))?
            .iter()
            .map(|h| h.to_string())
            .collect();
        let columns = unique_keys(&headers);

        let mut rows = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let raw = result.map_err(|e| CsvError::Parse(e.to_string()))?;
            if raw.len() > columns.len() {
                warn!(row = i + 1, cells = raw.len(), columns = columns.len(), "dropping cells beyond header");
            }
            let mut rec = Record::new();
            for (idx, col) in columns.iter().enumerate() {
                let value = raw.get(idx).map(Value::parse).unwrap_or(Value::Null);
                rec.insert(col.clone(), value);
            }
            rows.push(rec);
        }

        Ok(Self { headers, columns, rows })
    }

    pub fn to_csv(&self) -> Result<String, CsvError> {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        if !self.headers.is_empty() {
            wtr.write_record(&self.headers)
                .map_err(|e| CsvError::Serialize(e.to_string()))?;
        }
        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|c| row.get(c).map(Value::to_cell).unwrap_or_default())
                .collect();
            wtr.write_record(&cells)
                .map_err(|e| CsvError::Serialize(e.to_string()))?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| CsvError::Serialize(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CsvError::Serialize(e.to_string()))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a record in header order. Fields are matched to columns by
    /// exact name, then case-insensitively, then through the form field's
    /// dataset column; anything left over becomes a new trailing column.
    pub fn push(&mut self, record: &Record) {
        let mut targets = Vec::with_capacity(record.len());
        for (name, value) in record.iter() {
            let idx = match self.resolve_column(name) {
                Some(idx) => idx,
                None => self.add_column(name),
            };
            targets.push((idx, value.clone()));
        }

        let mut row = Record::new();
        for col in &self.columns {
            row.insert(col.clone(), Value::Null);
        }
        for (idx, value) in targets {
            row.insert(self.columns[idx].clone(), value);
        }
        self.rows.push(row);
    }

    pub fn resolve_column(&self, name: &str) -> Option<usize> {
        if let Some(idx) = self.columns.iter().position(|c| c == name) {
            return Some(idx);
        }
        if let Some(idx) = self.columns.iter().position(|c| c.eq_ignore_ascii_case(name)) {
            return Some(idx);
        }
        let field = FormField::from_form_name(name)?;
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(field.column_name()))
    }

    fn add_column(&mut self, name: &str) -> usize {
        self.headers.push(name.to_string());
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.insert(name, Value::Null);
        }
        self.columns.len() - 1
    }
}

/// Suffixes repeated header names (`x`, `x_1`, `x_2`), skipping suffixed
/// names that already appear elsewhere in the header.
fn unique_keys(headers: &[String]) -> Vec<String> {
    let mut used: HashSet<String> = headers.iter().cloned().collect();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut keys = Vec::with_capacity(headers.len());

    for h in headers {
        let count = seen.entry(h.as_str()).or_insert(0);
        if *count == 0 {
            *count = 1;
            keys.push(h.clone());
            continue;
        }
        let mut candidate = format!("{h}_{count}");
        while used.contains(&candidate) {
            *count += 1;
            candidate = format!("{h}_{count}");
        }
        *count += 1;
        used.insert(candidate.clone());
        keys.push(candidate);
    }
    keys
}
