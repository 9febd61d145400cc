//! CSV ingest and normalization.
//!
//! This module is responsible for turning a release-profile CSV into a clean,
//! validated `ObservationSeries`.
//!
//! Design goals:
//! - **Column selection** by zero-based index or header name (defaults: the
//!   first two columns, time then concentration)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (rows keep their acquisition order)
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use csv::StringRecord;
use tracing::warn;

use crate::domain::{ColumnSelector, DatasetStats, FitConfig, ObservationSeries};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: validated series + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub series: ObservationSeries,
    pub stats: DatasetStats,
    /// Header names of the selected time and concentration columns.
    pub time_label: String,
    pub concentration_label: String,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load the CSV named in the config.
pub fn load_observations(config: &FitConfig) -> Result<IngestedData, AppError> {
    let file = File::open(&config.csv_path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open CSV '{}': {e}", config.csv_path.display()),
        )
    })?;
    read_observations(file, &config.time_column, &config.concentration_column)
}

/// Read observations from any CSV source.
pub fn read_observations<R: Read>(
    source: R,
    time_column: &ColumnSelector,
    concentration_column: &ColumnSelector,
) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let time_idx = resolve_column(time_column, &headers, &header_map)?;
    let conc_idx = resolve_column(concentration_column, &headers, &header_map)?;
    if time_idx == conc_idx {
        return Err(AppError::new(
            2,
            "Time and concentration must be different columns.",
        ));
    }

    let mut time = Vec::new();
    let mut concentration = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, time_idx, conc_idx) {
            Ok(Some((t, c))) => {
                time.push(t);
                concentration.push(c);
            }
            Ok(None) => {} // blank row
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for err in &row_errors {
        warn!(line = err.line, "skipped row: {}", err.message);
    }

    let rows_used = time.len();
    if rows_used < ObservationSeries::MIN_POINTS {
        return Err(AppError::new(
            3,
            format!(
                "Need at least {} valid rows, found {rows_used} (of {rows_read} read).",
                ObservationSeries::MIN_POINTS
            ),
        ));
    }

    let series = ObservationSeries::new(time, concentration)?;
    let stats = series.stats();

    Ok(IngestedData {
        series,
        stats,
        time_label: column_label(&headers, time_idx),
        concentration_label: column_label(&headers, conc_idx),
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, name lookups fail on column 0.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_column(
    selector: &ColumnSelector,
    headers: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<usize, AppError> {
    match selector {
        ColumnSelector::Index(idx) if *idx < headers.len() => Ok(*idx),
        ColumnSelector::Index(idx) => Err(AppError::new(
            2,
            format!("Column #{idx} does not exist (CSV has {} columns).", headers.len()),
        )),
        ColumnSelector::Name(name) => header_map
            .get(&normalize_header_name(name))
            .copied()
            .ok_or_else(|| AppError::new(2, format!("Missing column: `{name}`"))),
    }
}

fn column_label(headers: &StringRecord, idx: usize) -> String {
    headers
        .get(idx)
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| format!("column {idx}"))
}

fn parse_row(record: &StringRecord, time_idx: usize, conc_idx: usize) -> Result<Option<(f64, f64)>, String> {
    let t = record.get(time_idx).unwrap_or("");
    let c = record.get(conc_idx).unwrap_or("");
    if t.is_empty() && c.is_empty() {
        return Ok(None);
    }

    let t = parse_value(t, "time")?;
    if t < 0.0 {
        return Err(format!("Negative time value '{t}'."));
    }
    let c = parse_value(c, "concentration")?;
    Ok(Some((t, c)))
}

fn parse_value(s: &str, what: &str) -> Result<f64, String> {
    if s.is_empty() {
        return Err(format!("Missing {what} value."));
    }
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid {what} value '{s}'."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite {what} value '{s}'."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str, t: &str, c: &str) -> Result<IngestedData, AppError> {
        read_observations(csv.as_bytes(), &t.parse().unwrap(), &c.parse().unwrap())
    }

    #[test]
    fn reads_first_two_columns_by_default() {
        let data = read("Time (h),Released (%)\n0,100\n1,80\n2,64\n", "0", "1").unwrap();
        assert_eq!(data.series.time(), &[0.0, 1.0, 2.0]);
        assert_eq!(data.series.concentration(), &[100.0, 80.0, 64.0]);
        assert_eq!(data.time_label, "Time (h)");
        assert_eq!(data.concentration_label, "Released (%)");
        assert_eq!(data.rows_used, 3);
        assert!(data.row_errors.is_empty());
    }

    #[test]
    fn selects_columns_by_header_name_with_bom() {
        let csv = "\u{feff}id,conc,time\na,5,0\nb,4,1\n";
        let data = read(csv, "TIME", "conc").unwrap();
        assert_eq!(data.series.time(), &[0.0, 1.0]);
        assert_eq!(data.series.concentration(), &[5.0, 4.0]);
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = "t,c\n0,10\n1,NaN\n2,abc\n,\n3,7\n4,inf\n";
        let data = read(csv, "0", "1").unwrap();
        assert_eq!(data.series.time(), &[0.0, 3.0]);
        assert_eq!(data.rows_read, 6);
        assert_eq!(data.rows_used, 2);
        let lines: Vec<usize> = data.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 7]);
        assert!(data.row_errors[0].message.contains("Non-finite concentration"));
    }

    #[test]
    fn negative_time_rows_are_skipped() {
        let data = read("t,c\n-1,12\n0,10\n2,7\n", "0", "1").unwrap();
        assert_eq!(data.series.time(), &[0.0, 2.0]);
        assert_eq!(data.row_errors.len(), 1);
        assert_eq!(data.row_errors[0].line, 2);
        assert!(data.row_errors[0].message.contains("Negative time"));
    }

    #[test]
    fn too_few_rows_is_a_data_error() {
        let err = read("t,c\n0,10\n", "0", "1").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_column_is_a_usage_error() {
        let err = read("t,c\n0,10\n1,9\n", "0", "released").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let err = read("t,c\n0,10\n1,9\n", "0", "5").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let err = read("t,c\n0,10\n1,9\n", "1", "c").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
