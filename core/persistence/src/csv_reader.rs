// FILENAME: core\persistence\src\csv_reader.rs

use crate::{
    PersistenceError, EU_SALES_COLUMN, GENRE_COLUMN, GLOBAL_SALES_COLUMN, JP_SALES_COLUMN,
    NAME_COLUMN, NA_SALES_COLUMN, OTHER_SALES_COLUMN, PLATFORM_COLUMN, YEAR_COLUMN,
};
use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use engine::SalesRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Records read from a dataset, plus how many rows were rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDataset {
    pub records: Vec<SalesRecord>,
    pub skipped_rows: usize,
}

pub fn load_csv(path: &Path) -> Result<ParsedDataset, PersistenceError> {
    let file = File::open(path)?;
    read_csv(file)
}

pub fn parse_csv(text: &str) -> Result<ParsedDataset, PersistenceError> {
    read_csv(text.as_bytes())
}

/// Reads a headed CSV dataset.
///
/// Rows that are not valid UTF-8, lack a name, platform or genre, or have a
/// year that is not a number are skipped. Sales cells that are empty or
/// malformed become 0.
pub fn read_csv<R: Read>(reader: R) -> Result<ParsedDataset, PersistenceError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut dataset = ParsedDataset::default();
    for (row_idx, row) in csv_reader.byte_records().enumerate() {
        let row = row?;
        match decode_row(row).and_then(|row| columns.to_record(&row)) {
            Some(record) => dataset.records.push(record),
            None => {
                log::debug!("skipping malformed row {}", row_idx + 1);
                dataset.skipped_rows += 1;
            }
        }
    }

    if dataset.skipped_rows > 0 {
        log::warn!(
            "loaded {} records, skipped {} malformed rows",
            dataset.records.len(),
            dataset.skipped_rows
        );
    }

    Ok(dataset)
}

fn decode_row(row: ByteRecord) -> Option<StringRecord> {
    StringRecord::from_byte_record(row).ok()
}

/// Header positions of the dataset columns.
struct ColumnMap {
    name: usize,
    platform: usize,
    year: usize,
    genre: usize,
    global_sales: Option<usize>,
    na_sales: Option<usize>,
    eu_sales: Option<usize>,
    jp_sales: Option<usize>,
    other_sales: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, PersistenceError> {
        let find = |column: &str| headers.iter().position(|h| h == column);
        let require = |column: &str| {
            find(column).ok_or_else(|| PersistenceError::MissingColumn(column.to_string()))
        };

        Ok(ColumnMap {
            name: require(NAME_COLUMN)?,
            platform: require(PLATFORM_COLUMN)?,
            year: require(YEAR_COLUMN)?,
            genre: require(GENRE_COLUMN)?,
            global_sales: find(GLOBAL_SALES_COLUMN),
            na_sales: find(NA_SALES_COLUMN),
            eu_sales: find(EU_SALES_COLUMN),
            jp_sales: find(JP_SALES_COLUMN),
            other_sales: find(OTHER_SALES_COLUMN),
        })
    }

    fn to_record(&self, row: &StringRecord) -> Option<SalesRecord> {
        let text = |idx: usize| row.get(idx).filter(|value| !value.is_empty());
        let sales = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map_or(0.0, parse_sales);

        let name = text(self.name)?;
        let platform = text(self.platform)?;
        let genre = text(self.genre)?;
        let year = text(self.year).and_then(parse_year)?;

        Some(
            SalesRecord::new(name, platform, year, genre)
                .with_global_sales(sales(self.global_sales))
                .with_regional_sales(
                    sales(self.na_sales),
                    sales(self.eu_sales),
                    sales(self.jp_sales),
                    sales(self.other_sales),
                ),
        )
    }
}

/// Accepts integral years written either as "2006" or "2006.0".
fn parse_year(value: &str) -> Option<i32> {
    if let Ok(year) = value.parse::<i32>() {
        return Some(year);
    }
    let year = value.parse::<f64>().ok()?;
    if year.is_finite() && year.fract() == 0.0 && year.abs() <= i32::MAX as f64 {
        Some(year as i32)
    } else {
        None
    }
}

fn parse_sales(value: &str) -> f64 {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Rank,Name,Platform,Year,Genre,Publisher,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Global_Sales
1,Wii Sports,Wii,2006,Sports,Nintendo,41.49,29.02,3.77,8.46,82.74
2,\"Pokemon Red/Pokemon Blue\",GB,1996,Role-Playing,Nintendo,11.27,8.89,10.22,1,31.37
3,\"Madden \"\"NFL\"\" 2004\",PS2,2003.0,Sports,EA,4.26,0.26,0.01,0.71,5.23
";

    #[test]
    fn test_parse_sample() {
        let dataset = parse_csv(SAMPLE).unwrap();
        assert_eq!(dataset.skipped_rows, 0);
        assert_eq!(dataset.records.len(), 3);

        let first = &dataset.records[0];
        assert_eq!(first.name, "Wii Sports");
        assert_eq!(first.year, 2006);
        assert_eq!(first.global_sales, 82.74);
        assert_eq!(first.na_sales, 41.49);
        assert_eq!(first.other_sales, 8.46);

        assert_eq!(dataset.records[1].name, "Pokemon Red/Pokemon Blue");
        assert_eq!(dataset.records[2].name, "Madden \"NFL\" 2004");
        assert_eq!(dataset.records[2].year, 2003);
    }

    #[test]
    fn test_rows_missing_required_fields_are_skipped() {
        let text = "\
Name,Platform,Year,Genre,Global_Sales
Good,PC,2001,Strategy,1.5
,PC,2001,Strategy,1.0
NoYear,PC,N/A,Strategy,1.0
NoGenre,PC,2001,,1.0
";
        let dataset = parse_csv(text).unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.skipped_rows, 3);
        assert_eq!(dataset.records[0].name, "Good");
    }

    #[test]
    fn test_malformed_sales_default_to_zero() {
        let text = "\
Name,Platform,Year,Genre,Global_Sales,NA_Sales
A,PC,2001,Strategy,,abc
B,PC,2001,Strategy,-3,NaN
C,PC,2001,Strategy
";
        let dataset = parse_csv(text).unwrap();
        assert_eq!(dataset.records.len(), 3);
        for record in &dataset.records {
            assert_eq!(record.global_sales, 0.0);
            assert_eq!(record.na_sales, 0.0);
            assert_eq!(record.jp_sales, 0.0);
        }
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped() {
        let bytes: &[u8] = b"Name,Platform,Year,Genre,Global_Sales\n\
Good,PC,2001,Misc,1.0\n\
Caf\xe9,PC,2002,Misc,2.0\n\
Also Good,PC,2003,Misc,3.0\n";
        let dataset = read_csv(bytes).unwrap();

        assert_eq!(dataset.skipped_rows, 1);
        let names: Vec<&str> = dataset.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Good", "Also Good"]);
    }

    #[test]
    fn test_missing_required_column() {
        let err = parse_csv("Name,Platform,Genre\nA,PC,Misc\n").unwrap_err();
        assert!(matches!(err, PersistenceError::MissingColumn(ref c) if c == "Year"));
    }

    #[test]
    fn test_headers_are_trimmed() {
        let dataset = parse_csv(" Name , Platform ,Year, Genre \nA,PC, 1999 ,Misc\n").unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].year, 1999);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1985"), Some(1985));
        assert_eq!(parse_year("1985.0"), Some(1985));
        assert_eq!(parse_year("1985.5"), None);
        assert_eq!(parse_year("N/A"), None);
    }
}
