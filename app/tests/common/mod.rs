//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for dashboard integration tests.

#![allow(dead_code)]

use app_lib::{create_app_state, DashboardConfig, DashboardState};
use engine::{RecordStore, SalesRecord};

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: DashboardState,
}

impl TestHarness {
    /// Create a harness with an empty record store.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a harness over the sales fixture.
    pub fn with_sample_data() -> Self {
        Self::with_records(SalesFixture::records())
    }

    pub fn with_records(records: Vec<SalesRecord>) -> Self {
        Self::with_config(records, DashboardConfig::default())
    }

    pub fn with_config(records: Vec<SalesRecord>, config: DashboardConfig) -> Self {
        app_lib::logging::set_console_echo(false);
        TestHarness {
            state: create_app_state(RecordStore::new(records), config),
        }
    }

    /// Create a harness with `rows` generated records for paging tests.
    pub fn with_large_data(rows: usize) -> Self {
        let records = (0..rows)
            .map(|i| {
                SalesRecord::new(format!("Game {i}"), "PC", 2000 + (i % 10) as i32, "Misc")
                    .with_global_sales(1.0 + (i % 7) as f64)
                    .with_regional_sales(0.5, 0.25, 0.125, 0.125)
            })
            .collect();
        Self::with_records(records)
    }

    pub fn current_page(&self) -> usize {
        *self.state.current_page.lock().unwrap()
    }

    pub fn filtered_len(&self) -> usize {
        self.state.filtered.lock().unwrap().len()
    }

    pub fn filtered_names(&self) -> Vec<String> {
        self.state
            .filtered
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }
}

/// Sales data fixture for filter and chart tests.
pub struct SalesFixture;

impl SalesFixture {
    pub fn headers() -> Vec<&'static str> {
        vec![
            "Name", "Platform", "Year", "Genre", "Global_Sales", "NA_Sales", "EU_Sales",
            "JP_Sales", "Other_Sales",
        ]
    }

    /// (name, platform, year, genre, global, na, eu, jp, other)
    pub fn data() -> Vec<(&'static str, &'static str, i32, &'static str, f64, f64, f64, f64, f64)> {
        vec![
            ("Wii Sports", "Wii", 2006, "Sports", 82.74, 41.49, 29.02, 3.77, 8.46),
            ("Super Mario Bros.", "NES", 1985, "Platform", 40.24, 29.08, 3.58, 6.81, 0.77),
            ("Mario Kart Wii", "Wii", 2008, "Racing", 35.82, 15.85, 12.88, 3.79, 3.31),
            ("Wii Sports Resort", "Wii", 2009, "Sports", 33.0, 15.75, 11.01, 3.28, 2.96),
            ("Pokemon Red/Pokemon Blue", "GB", 1996, "Role-Playing", 31.37, 11.27, 8.89, 10.22, 1.0),
            ("Tetris", "GB", 1989, "Puzzle", 30.26, 23.2, 2.26, 4.22, 0.58),
            ("Grand Theft Auto V", "PS3", 2013, "Action", 21.4, 7.01, 9.27, 0.97, 4.14),
            ("Gran Turismo", "PS", 1997, "Racing", 10.95, 4.02, 3.87, 2.54, 0.52),
        ]
    }

    pub fn records() -> Vec<SalesRecord> {
        Self::data()
            .into_iter()
            .map(|(name, platform, year, genre, global, na, eu, jp, other)| {
                SalesRecord::new(name, platform, year, genre)
                    .with_global_sales(global)
                    .with_regional_sales(na, eu, jp, other)
            })
            .collect()
    }

    /// The fixture as a CSV document with the dataset's column layout.
    pub fn csv() -> String {
        let mut text = Self::headers().join(",");
        text.push('\n');
        for (name, platform, year, genre, global, na, eu, jp, other) in Self::data() {
            text.push_str(&format!(
                "\"{}\",{},{},{},{},{},{},{},{}\n",
                name, platform, year, genre, global, na, eu, jp, other
            ));
        }
        text
    }
}
