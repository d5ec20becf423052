//! CSV loading for the material dataset.
//!
//! Headers are matched after normalization (trimmed, lowercased, spaces and
//! hyphens turned into underscores), so `Material Type`, `material-type` and
//! `material_type` all resolve to [`Column::Material`]. Only the material
//! column is required. Rows whose values cannot be parsed are skipped with a
//! warning instead of failing the whole load.

use std::io::Read;
use std::path::Path;

use super::{MaterialRecord, MaterialTable};
use crate::error::{Result, SustainError};

/// Columns understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Material name (required)
    Material,
    /// Category
    Category,
    /// Free-text description
    Description,
    /// Recyclable flag
    Recyclable,
    /// Compostable flag
    Compostable,
    /// Carbon footprint
    CarbonFootprint,
    /// Water usage
    WaterUsage,
    /// Cost
    Cost,
}

impl Column {
    /// Every column in canonical order.
    pub const ALL: [Column; 8] = [
        Column::Material,
        Column::Category,
        Column::Description,
        Column::Recyclable,
        Column::Compostable,
        Column::CarbonFootprint,
        Column::WaterUsage,
        Column::Cost,
    ];

    /// Canonical (serialized) column name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Column::Material => "material",
            Column::Category => "category",
            Column::Description => "description",
            Column::Recyclable => "recyclable",
            Column::Compostable => "compostable",
            Column::CarbonFootprint => "carbon_footprint",
            Column::WaterUsage => "water_usage",
            Column::Cost => "cost",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Material => &["material", "material_type", "name"],
            Column::Category => &["category"],
            Column::Description => &["description", "text", "tags"],
            Column::Recyclable => &["recyclable"],
            Column::Compostable => &["compostable"],
            Column::CarbonFootprint => &["carbon_footprint", "co2_footprint"],
            Column::WaterUsage => &["water_usage"],
            Column::Cost => &["cost", "price"],
        }
    }

    /// Resolve a raw CSV header.
    ///
    /// # Examples
    ///
    /// ```
    /// use sustainrec::data::Column;
    ///
    /// assert_eq!(Column::from_header("Material Type"), Some(Column::Material));
    /// assert_eq!(Column::from_header(" Water-Usage "), Some(Column::WaterUsage));
    /// assert_eq!(Column::from_header("supplier"), None);
    /// ```
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        let normalized = normalize_header(header);
        Self::ALL
            .into_iter()
            .find(|col| col.aliases().contains(&normalized.as_str()))
    }

    fn slot(self) -> usize {
        self as usize
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Parse a boolean cell or query value.
///
/// Accepts `true/false`, `t/f`, `yes/no`, `y/n`, `1/0` and `1.0/0.0`, case-insensitively.
///
/// # Examples
///
/// ```
/// use sustainrec::data::parse_flag;
///
/// assert_eq!(parse_flag("Yes"), Some(true));
/// assert_eq!(parse_flag("0"), Some(false));
/// assert_eq!(parse_flag("maybe"), None);
/// ```
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Some(true),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

/// Parse a finite floating-point cell.
#[must_use]
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Header position of each known column.
#[derive(Debug, Clone, Default)]
struct ColumnMap {
    positions: [Option<usize>; 8],
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let mut map = Self::default();
        for (pos, header) in headers.iter().enumerate() {
            if let Some(col) = Column::from_header(header) {
                let slot = &mut map.positions[col.slot()];
                if slot.is_none() {
                    *slot = Some(pos);
                }
            }
        }

        if map.positions[Column::Material.slot()].is_none() {
            return Err(SustainError::MissingColumn {
                column: Column::Material.name().to_string(),
                available: headers.iter().map(ToString::to_string).collect(),
            });
        }

        Ok(map)
    }

    fn cell<'r>(&self, row: &'r csv::StringRecord, col: Column) -> Option<&'r str> {
        self.positions[col.slot()]
            .and_then(|pos| row.get(pos))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn flag(&self, row: &csv::StringRecord, col: Column) -> Result<bool> {
        match self.cell(row, col) {
            None => Ok(false),
            Some(raw) => parse_flag(raw).ok_or_else(|| {
                SustainError::validation(col.name(), format!("'{raw}' is not a boolean"))
            }),
        }
    }

    fn number(&self, row: &csv::StringRecord, col: Column) -> Result<f64> {
        match self.cell(row, col) {
            None => Ok(0.0),
            Some(raw) => parse_number(raw).ok_or_else(|| {
                SustainError::validation(col.name(), format!("'{raw}' is not a finite number"))
            }),
        }
    }

    fn record(&self, row: &csv::StringRecord) -> Result<MaterialRecord> {
        let material = self
            .cell(row, Column::Material)
            .ok_or_else(|| SustainError::validation(Column::Material.name(), "empty"))?;

        Ok(MaterialRecord {
            material: material.to_string(),
            category: self.cell(row, Column::Category).unwrap_or_default().to_string(),
            description: self
                .cell(row, Column::Description)
                .unwrap_or_default()
                .to_string(),
            recyclable: self.flag(row, Column::Recyclable)?,
            compostable: self.flag(row, Column::Compostable)?,
            carbon_footprint: self.number(row, Column::CarbonFootprint)?,
            water_usage: self.number(row, Column::WaterUsage)?,
            cost: self.number(row, Column::Cost)?,
        })
    }
}

/// CSV reader for [`MaterialTable`]s.
///
/// # Examples
///
/// ```
/// use sustainrec::data::CsvLoader;
///
/// let csv = "Material Type,Recyclable,Compostable\nPaper,true,true\nFoam,false,false\n";
/// let table = CsvLoader::new().read(csv.as_bytes()).expect("valid csv");
/// assert_eq!(table.len(), 2);
/// assert!(table.records()[0].compostable);
/// ```
#[derive(Debug, Clone)]
pub struct CsvLoader {
    delimiter: u8,
}

impl CsvLoader {
    /// Comma-delimited loader.
    #[must_use]
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Use a different field delimiter (e.g. `b';'` or `b'\t'`).
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load a dataset file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the header cannot be
    /// read, or the material column is missing.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<MaterialTable> {
        let file = std::fs::File::open(path.as_ref())?;
        self.read(file)
    }

    /// Load a dataset from any reader.
    ///
    /// # Errors
    ///
    /// Same as [`CsvLoader::load`], minus the file-open failure.
    pub fn read<R: Read>(&self, reader: R) -> Result<MaterialTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let columns = ColumnMap::resolve(&headers)?;

        let mut records = Vec::new();
        for (row_idx, row) in reader.records().enumerate() {
            // header is line 1
            let line = row_idx + 2;
            let parsed = row.map_err(SustainError::from).and_then(|r| columns.record(&r));
            match parsed {
                Ok(record) => records.push(record),
                Err(err) => tracing::warn!(line, error = %err, "skipping malformed dataset row"),
            }
        }

        Ok(MaterialTable::new(records))
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
