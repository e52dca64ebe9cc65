// crates/skycast-core/src/loader.rs

//! # Data Loader
//!
//! Handles the physical layer (embedded bytes, files, decompression) and
//! hands parsed [`City`] records to [`CityIndex::build`].

use crate::error::{Result, SkycastError};
use crate::index::CityIndex;
use crate::model::City;
use once_cell::sync::OnceCell;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

static EMBEDDED_CITIES: &str = include_str!("../data/cities.json");

static EMBEDDED_INDEX: OnceCell<CityIndex> = OnceCell::new();

impl CityIndex {
    /// The index over the dataset compiled into the binary.
    ///
    /// Parsed on first use and shared for the rest of the process; it is never
    /// rebuilt or reloaded.
    pub fn embedded() -> Result<&'static CityIndex> {
        EMBEDDED_INDEX.get_or_try_init(|| Self::from_json_str(EMBEDDED_CITIES))
    }

    /// Parses a JSON array of `{ "id": .., "name": .. }` records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cities: Vec<City> = serde_json::from_str(json)?;
        Ok(Self::build(cities))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let cities: Vec<City> = serde_json::from_reader(reader)?;
        Ok(Self::build(cities))
    }

    /// Loads a dataset file. `.gz` files are decompressed when the `compact`
    /// feature is enabled.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = open_stream(path.as_ref())?;
        Self::from_reader(reader)
    }
}

// -----------------------------------------------------------------------
// INTERNAL TRANSPORT HELPER
// -----------------------------------------------------------------------

/// Opens a file, buffers it, and wraps it in a Gzip decoder for `.gz` paths.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        SkycastError::Dataset(format!("dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    let gzipped = path.extension().is_some_and(|ext| ext == "gz");

    if !gzipped {
        return Ok(Box::new(reader));
    }
    gunzip(reader, path)
}

#[cfg(feature = "compact")]
fn gunzip(reader: BufReader<File>, _path: &Path) -> Result<Box<dyn Read>> {
    use flate2::read::GzDecoder;
    Ok(Box::new(GzDecoder::new(reader)))
}

#[cfg(not(feature = "compact"))]
fn gunzip(_reader: BufReader<File>, path: &Path) -> Result<Box<dyn Read>> {
    Err(SkycastError::Dataset(format!(
        "{} is gzip-compressed but the 'compact' feature is disabled",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dataset_loads_once() {
        let a = CityIndex::embedded().unwrap();
        let b = CityIndex::embedded().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(a.len() > 100);
        assert!(a.cities().any(|c| c.name() == "London"));
        assert!(a.cities().any(|c| c.name() == "Tokyo"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = CityIndex::from_json_str(r#"[{"id": 1}]"#).unwrap_err();
        assert!(matches!(err, SkycastError::Json(_)));
    }

    #[test]
    fn missing_file_is_a_dataset_error() {
        let err = CityIndex::load_from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SkycastError::Dataset(_)));
    }

    #[test]
    fn loads_plain_json_file() {
        let path = std::env::temp_dir().join(format!("skycast-cities-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"id": 1, "name": "Oslo"}]"#).unwrap();

        let index = CityIndex::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(index.len(), 1);
    }

    #[cfg(feature = "compact")]
    #[test]
    fn loads_gzipped_json_file() {
        use flate2::{write::GzEncoder, Compression};
        use std::io::Write;

        let path =
            std::env::temp_dir().join(format!("skycast-cities-{}.json.gz", std::process::id()));
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder
            .write_all(br#"[{"id": 1, "name": "Oslo"}, {"id": 2, "name": "Bergen"}]"#)
            .unwrap();
        encoder.finish().unwrap();

        let index = CityIndex::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(index.len(), 2);
    }
}
