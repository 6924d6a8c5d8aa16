//! Serialization of a dataset for download.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::dataset::{ColumnData, Dataset};
use crate::error::{Result, ScrubError};

/// Write a dataset as delimited text with a header row.
///
/// Missing cells are written as the missing-marker so the file reads back
/// into the same dataset.
pub fn write_delimited<W: Write>(data: &Dataset, writer: W, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    if data.column_count() > 0 {
        writer.write_record(data.column_names())?;
        for row in data.rows() {
            writer.write_record(&row)?;
        }
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render a dataset as comma-separated text.
pub fn to_csv_string(data: &Dataset) -> Result<String> {
    let mut buffer = Vec::new();
    write_delimited(data, &mut buffer, b',')?;
    String::from_utf8(buffer).map_err(|e| ScrubError::Parse {
        row: 0,
        column: 0,
        message: format!("non UTF-8 output: {}", e),
    })
}

/// Write a dataset to a file as delimited text.
pub fn write_delimited_file(data: &Dataset, path: impl AsRef<Path>, delimiter: u8) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ScrubError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_delimited(data, file, delimiter)
}

/// Render a dataset as an array of JSON records with typed values.
pub fn to_json_records(data: &Dataset) -> Value {
    let records = (0..data.row_count())
        .map(|row| {
            let record: Map<String, Value> = data
                .columns()
                .iter()
                .map(|column| (column.name.clone(), json_cell(&column.data, row)))
                .collect();
            Value::Object(record)
        })
        .collect();
    Value::Array(records)
}

fn json_cell(data: &ColumnData, row: usize) -> Value {
    match data {
        ColumnData::Integer(values) => values[row].map(Value::from).unwrap_or(Value::Null),
        ColumnData::Decimal(values) => values[row]
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ColumnData::Text(_) | ColumnData::Date(_) => {
            data.value_string(row).map(Value::String).unwrap_or(Value::Null)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::text("name", vec![Some("Smith, J"), Some("Lee")]),
            Column::new("age", ColumnData::Integer(vec![Some(30), None])),
            Column::new("score", ColumnData::Decimal(vec![Some(2.5), Some(3.0)])),
        ])
        .unwrap()
    }

    #[test]
    fn test_csv_output() {
        let csv = to_csv_string(&sample()).unwrap();
        assert_eq!(csv, "name,age,score\n\"Smith, J\",30,2.5\nLee,NaN,3.0\n");
    }

    #[test]
    fn test_tsv_output() {
        let mut buffer = Vec::new();
        write_delimited(&sample(), &mut buffer, b'\t').unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("name\tage\tscore\n"));
    }

    #[test]
    fn test_json_records() {
        let json = to_json_records(&sample());
        assert_eq!(json[0]["name"], "Smith, J");
        assert_eq!(json[0]["age"], 30);
        assert_eq!(json[1]["age"], Value::Null);
        assert_eq!(json[1]["score"], 3.0);
    }
}
