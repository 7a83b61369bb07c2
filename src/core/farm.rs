use crate::core::calculator;
use crate::core::culture_store::{CultureChange, CultureStore};
use crate::core::input_store::{InputChange, InputStore};
use crate::core::persistence::CsvPersistence;
use crate::core::Storage;
use crate::domain::model::{Application, Culture, Geometry, Input};
use crate::utils::error::Result;

/// Owns both stores and their files. Every mutating call rewrites both files
/// before returning; failed lookups leave memory and disk untouched.
pub struct Farm<S: Storage> {
    cultures: CultureStore,
    inputs: InputStore,
    persistence: CsvPersistence<S>,
}

impl<S: Storage> Farm<S> {
    /// Loads existing records. Unreadable files abort startup.
    pub fn open(persistence: CsvPersistence<S>) -> Result<Self> {
        let (cultures, inputs) = persistence.load_all()?;
        tracing::info!(
            "📂 Loaded {} cultures and {} inputs",
            cultures.len(),
            inputs.len()
        );

        Ok(Self {
            cultures: CultureStore::from_records(cultures),
            inputs: InputStore::from_records(inputs),
            persistence,
        })
    }

    pub fn cultures(&self) -> &CultureStore {
        &self.cultures
    }

    pub fn inputs(&self) -> &InputStore {
        &self.inputs
    }

    pub fn persistence(&self) -> &CsvPersistence<S> {
        &self.persistence
    }

    pub fn create_culture(
        &mut self,
        name: impl Into<String>,
        geometry: Geometry,
        subdivision_count: u32,
    ) -> Result<&Culture> {
        self.cultures.create(name, geometry, subdivision_count);
        self.save()?;
        self.cultures.get(self.cultures.len())
    }

    pub fn update_culture(&mut self, index: usize, change: CultureChange) -> Result<&Culture> {
        self.cultures.update(index, change)?;
        self.save()?;
        self.cultures.get(index)
    }

    pub fn delete_culture(&mut self, index: usize) -> Result<Culture> {
        let removed = self.cultures.delete(index)?;
        self.save()?;
        Ok(removed)
    }

    pub fn create_input(&mut self, name: impl Into<String>, dose_per_area: f64) -> Result<&Input> {
        self.inputs.create(name, dose_per_area);
        self.save()?;
        self.inputs.get(self.inputs.len())
    }

    pub fn update_input(&mut self, index: usize, change: InputChange) -> Result<&Input> {
        self.inputs.update(index, change)?;
        self.save()?;
        self.inputs.get(index)
    }

    pub fn delete_input(&mut self, index: usize) -> Result<Input> {
        let removed = self.inputs.delete(index)?;
        self.save()?;
        Ok(removed)
    }

    /// Read-only; nothing is written.
    pub fn apply(&self, culture_index: usize, input_index: usize) -> Result<Application> {
        let culture = self.cultures.get(culture_index)?;
        let input = self.inputs.get(input_index)?;
        Ok(calculator::calculate(culture, input))
    }

    pub fn save(&self) -> Result<()> {
        self.persistence
            .save_all(self.cultures.list(), self.inputs.list())
    }
}
