use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{Culture, Input};
use crate::utils::error::{FarmError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const CULTURE_HEADERS: [&str; 5] = [
    "name",
    "shape",
    "total_area",
    "subdivision_count",
    "area_per_subdivision",
];
pub const INPUT_HEADERS: [&str; 2] = ["name", "dose_per_area"];

/// Mirrors both stores to two CSV files. Every save rewrites each file in
/// place; there is no temp-file-and-rename step.
pub struct CsvPersistence<S: Storage> {
    storage: S,
    cultures_file: String,
    inputs_file: String,
}

impl<S: Storage> CsvPersistence<S> {
    pub fn new(storage: S, cultures_file: impl Into<String>, inputs_file: impl Into<String>) -> Self {
        Self {
            storage,
            cultures_file: cultures_file.into(),
            inputs_file: inputs_file.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Self {
        Self::new(storage, config.cultures_file(), config.inputs_file())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save_all(&self, cultures: &[Culture], inputs: &[Input]) -> Result<()> {
        let culture_data = encode(&CULTURE_HEADERS, cultures)?;
        self.storage.write_file(&self.cultures_file, &culture_data)?;

        let input_data = encode(&INPUT_HEADERS, inputs)?;
        self.storage.write_file(&self.inputs_file, &input_data)?;

        tracing::debug!(
            "Saved {} cultures to {} and {} inputs to {}",
            cultures.len(),
            self.cultures_file,
            inputs.len(),
            self.inputs_file
        );
        Ok(())
    }

    /// Reads whatever files exist. A missing file is an empty list; a file
    /// that fails to parse is an error.
    pub fn load_all(&self) -> Result<(Vec<Culture>, Vec<Input>)> {
        let mut cultures: Vec<Culture> = self.load_file(&self.cultures_file)?;
        for culture in &mut cultures {
            culture.recompute();
        }
        let inputs: Vec<Input> = self.load_file(&self.inputs_file)?;

        tracing::debug!(
            "Loaded {} cultures and {} inputs",
            cultures.len(),
            inputs.len()
        );
        Ok((cultures, inputs))
    }

    fn load_file<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        if !self.storage.exists(path) {
            tracing::debug!("{} not found, starting empty", path);
            return Ok(Vec::new());
        }

        let data = self.storage.read_file(path)?;
        decode(&data)
    }
}

fn encode<T: Serialize>(headers: &[&str], records: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // Written by hand so an empty store still produces a header row.
    writer.write_record(headers)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| FarmError::IoError(e.into_error()))
}

fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
