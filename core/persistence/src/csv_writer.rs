// FILENAME: core\persistence\src\csv_writer.rs

use crate::{PersistenceError, EXPORT_COLUMNS};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use engine::{Region, SalesRecord};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes `records` as CSV: fixed columns, every field double-quoted,
/// embedded quotes doubled, one record per `\n`-terminated line.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<(), PersistenceError>
where
    W: Write,
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(EXPORT_COLUMNS)?;

    for record in records {
        csv_writer.write_record([
            record.name.clone(),
            record.platform.clone(),
            record.year.to_string(),
            record.genre.clone(),
            record.global().to_string(),
            record.sales(Region::NorthAmerica).to_string(),
            record.sales(Region::Europe).to_string(),
            record.sales(Region::Japan).to_string(),
            record.sales(Region::Other).to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Renders `records` to a CSV string.
pub fn export_csv<'a, I>(records: I) -> Result<String, PersistenceError>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    String::from_utf8(buffer).map_err(|e| PersistenceError::InvalidFormat(e.to_string()))
}

pub fn save_csv<'a, I>(path: &Path, records: I) -> Result<(), PersistenceError>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let file = File::create(path)?;
    write_csv(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{load_csv, parse_csv};

    fn sample_records() -> Vec<SalesRecord> {
        vec![
            SalesRecord::new("Madden \"NFL\" 2004", "PS2", 2003, "Sports")
                .with_global_sales(5.23)
                .with_regional_sales(4.26, 0.26, 0.01, 0.71),
            SalesRecord::new("Tetris, Deluxe", "GB", 1989, "Puzzle")
                .with_global_sales(30.26)
                .with_regional_sales(23.2, 2.26, 4.22, 0.58),
        ]
    }

    #[test]
    fn test_export_quotes_every_field() {
        let csv = export_csv(&sample_records()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("\"Name\",\"Platform\",\"Year\""));
        assert_eq!(
            lines[1],
            "\"Madden \"\"NFL\"\" 2004\",\"PS2\",\"2003\",\"Sports\",\"5.23\",\"4.26\",\"0.26\",\"0.01\",\"0.71\""
        );
        assert!(!csv.contains('\r'));
    }

    #[test]
    fn test_export_of_nothing_is_header_only() {
        let csv = export_csv(&Vec::<SalesRecord>::new()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_export_round_trip() {
        let records = sample_records();
        let csv = export_csv(&records).unwrap();
        let parsed = parse_csv(&csv).unwrap();

        assert_eq!(parsed.skipped_rows, 0);
        assert_eq!(parsed.records, records);
    }

    #[test]
    fn test_padded_names_survive_round_trip() {
        let records = vec![SalesRecord::new(" Halo ", "XB", 2001, "Shooter").with_global_sales(5.0)];
        let parsed = parse_csv(&export_csv(&records).unwrap()).unwrap();

        assert_eq!(parsed.records, records);
        assert_eq!(parsed.records[0].name, "Halo");
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");

        save_csv(&path, &sample_records()).unwrap();
        let loaded = load_csv(&path).unwrap();

        assert_eq!(loaded.records, sample_records());
    }

    #[test]
    fn test_export_sanitizes_malformed_figures() {
        let record = SalesRecord::new("A", "PC", 2000, "Misc")
            .with_global_sales(f64::NAN)
            .with_regional_sales(-1.0, 1.0, 0.0, 0.0);
        let csv = export_csv([&record]).unwrap();
        let parsed = parse_csv(&csv).unwrap();

        assert_eq!(parsed.records[0].global_sales, 0.0);
        assert_eq!(parsed.records[0].na_sales, 0.0);
        assert_eq!(parsed.records[0].eu_sales, 1.0);
    }
}
