//! Star catalog records and loading
//!
//! Catalog files are CSV with one header row followed by records of
//! `magnitude, ra, dec` where the angles are in degrees. They are converted
//! to radians on load.

use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Bright-star catalog shipped with the crate, as an absolute path
pub const BUNDLED_CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/bright_stars.csv");

/// Errors that can occur while reading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog record {line} has {found} fields, expected 3")]
    FieldCount { line: u64, found: usize },
    #[error("catalog record {line}: cannot parse {field} value {value:?}")]
    Parse {
        line: u64,
        field: &'static str,
        value: String,
    },
}

/// A single star: magnitude and equatorial position in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarRecord {
    pub magnitude: f64,
    /// Right ascension in radians, `[0, 2π)`
    pub ra: f64,
    /// Declination in radians, `[-π/2, π/2]`
    pub dec: f64,
}

impl StarRecord {
    pub fn new(magnitude: f64, ra: f64, dec: f64) -> Self {
        Self { magnitude, ra, dec }
    }

    pub fn from_degrees(magnitude: f64, ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(magnitude, ra_deg.to_radians(), dec_deg.to_radians())
    }
}

/// Ordered, read-only collection of stars
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    stars: Vec<StarRecord>,
}

impl Catalog {
    pub fn new(stars: Vec<StarRecord>) -> Self {
        Self { stars }
    }

    pub fn stars(&self) -> &[StarRecord] {
        &self.stars
    }

    pub fn iter(&self) -> impl Iterator<Item = &StarRecord> {
        self.stars.iter()
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Read a catalog from CSV data. The first row is a header and is skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut stars = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() != 3 {
                return Err(CatalogError::FieldCount {
                    line,
                    found: record.len(),
                });
            }

            let field = |index: usize, name: &'static str| -> Result<f64, CatalogError> {
                let raw = &record[index];
                raw.parse().map_err(|_| CatalogError::Parse {
                    line,
                    field: name,
                    value: raw.to_string(),
                })
            };

            stars.push(StarRecord::from_degrees(
                field(0, "magnitude")?,
                field(1, "ra")?,
                field(2, "dec")?,
            ));
        }

        log::debug!("Loaded {} catalog stars", stars.len());
        Ok(Self { stars })
    }

    /// Read a CSV catalog from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?;
        let catalog = Self::from_reader(file)?;
        log::info!(
            "Loaded {} stars from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }
}

impl FromIterator<StarRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = StarRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a StarRecord;
    type IntoIter = std::slice::Iter<'a, StarRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.stars.iter()
    }
}
