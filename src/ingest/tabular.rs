//! Heuristic conversion of tabular files into nested documents
//!
//! Single-table sources (CSV) are shaped by column heuristics: a
//! name/description table becomes one section keyed by the source filename,
//! a wider table is grouped by its first column, anything narrower lands
//! under an `items` key. Multi-sheet workbooks bypass the heuristics and
//! emit one top-level key per non-empty sheet. All parse failures are
//! absorbed into `None`.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use std::io::Cursor;
use tracing::warn;

/// Convert an uploaded tabular file by extension. JSON is not handled here:
/// it needs validation, not conversion.
pub fn convert(bytes: &[u8], filename: &str) -> Option<Value> {
    let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match extension.as_str() {
        "csv" => normalize_csv(bytes, &file_stem(filename)),
        "xlsx" | "xls" => normalize_workbook(bytes),
        _ => None,
    }
}

/// Filename without its final extension.
pub fn file_stem(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => filename.to_string(),
    }
}

/// Normalize a CSV table into a document. The first row is the header;
/// an empty table (no data rows) yields `None`.
pub fn normalize_csv(bytes: &[u8], stem: &str) -> Option<Value> {
    let mut reader = csv::ReaderBuilder::new().from_reader(bytes);

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(str::to_string).collect(),
        Err(e) => {
            warn!("CSV header parse failed: {}", e);
            return None;
        }
    };

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(record.iter().map(infer_scalar).collect()),
            Err(e) => {
                warn!("CSV row parse failed: {}", e);
                return None;
            }
        }
    }

    if headers.is_empty() || rows.is_empty() {
        return None;
    }

    Some(shape_table(&headers, rows, stem))
}

/// Apply the column heuristics to a parsed table.
fn shape_table(headers: &[String], rows: Vec<Vec<Value>>, stem: &str) -> Value {
    let mut document = Map::new();

    let has = |name: &str| headers.iter().any(|h| h == name);
    if has("name") && has("description") {
        // One section of row-records, keyed by the source filename.
        let records = rows
            .into_iter()
            .map(|row| row_record(headers, &row))
            .collect();
        document.insert(stem.to_string(), Value::Array(records));
    } else if headers.len() >= 2 {
        // Group by the first column, first-seen order, group column dropped.
        let mut groups: IndexMap<String, Vec<Value>> = IndexMap::new();
        for row in rows {
            let key = scalar_key(&row[0]);
            groups
                .entry(key)
                .or_default()
                .push(row_record(&headers[1..], &row[1..]));
        }
        for (key, records) in groups {
            document.insert(key, Value::Array(records));
        }
    } else {
        let records = rows
            .into_iter()
            .map(|row| row_record(headers, &row))
            .collect();
        document.insert("items".to_string(), Value::Array(records));
    }

    Value::Object(document)
}

/// Normalize a workbook: one top-level key per non-empty sheet, each sheet's
/// rows emitted as records with no further shaping.
pub fn normalize_workbook(bytes: &[u8]) -> Option<Value> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = match open_workbook_auto_from_rs(cursor) {
        Ok(workbook) => workbook,
        Err(e) => {
            warn!("workbook parse failed: {}", e);
            return None;
        }
    };

    let mut document = Map::new();
    for (sheet, range) in workbook.worksheets() {
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            continue;
        };
        let headers: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();

        let records: Vec<Value> = rows
            .map(|row| {
                let cells: Vec<Value> = row.iter().map(cell_value).collect();
                row_record(&headers, &cells)
            })
            .collect();

        if records.is_empty() {
            continue;
        }
        document.insert(sheet, Value::Array(records));
    }

    Some(Value::Object(document))
}

/// Zip headers and cells into one record, preserving column order. Rows
/// shorter than the header are padded with nulls.
fn row_record(headers: &[String], cells: &[Value]) -> Value {
    let mut record = Map::new();
    for (index, header) in headers.iter().enumerate() {
        let cell = cells.get(index).cloned().unwrap_or(Value::Null);
        record.insert(header.clone(), cell);
    }
    Value::Object(record)
}

/// Infer the JSON scalar for one CSV cell: empty cells become null, then
/// integer, float and boolean forms are tried before falling back to text.
fn infer_scalar(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::String(cell.to_string())
}

/// Grouping key form of a leading-column cell.
fn scalar_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// JSON form of a workbook cell.
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::String(other.to_string()),
    }
}
