use crate::domain::model::{Culture, Geometry};
use crate::utils::error::Result;
use crate::utils::validation::check_index;

/// One field edit applied by [`CultureStore::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum CultureChange {
    Name(String),
    /// New shape and dimensions, or new dimensions for the current shape.
    Geometry(Geometry),
    Subdivisions(u32),
}

/// Insertion-ordered cultures. Indices taken by the public methods are
/// 1-based, matching the numbered listings shown to the user.
#[derive(Debug, Clone, Default)]
pub struct CultureStore {
    records: Vec<Culture>,
}

impl CultureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Culture>) -> Self {
        Self { records }
    }

    pub fn create(
        &mut self,
        name: impl Into<String>,
        geometry: Geometry,
        subdivision_count: u32,
    ) -> &Culture {
        self.records
            .push(Culture::new(name, geometry, subdivision_count));
        tracing::debug!("Culture #{} created", self.records.len());
        &self.records[self.records.len() - 1]
    }

    pub fn list(&self) -> &[Culture] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Result<&Culture> {
        let position = check_index(index, self.records.len())?;
        Ok(&self.records[position])
    }

    pub fn update(&mut self, index: usize, change: CultureChange) -> Result<&Culture> {
        let position = check_index(index, self.records.len())?;
        let culture = &mut self.records[position];
        match change {
            CultureChange::Name(name) => culture.set_name(name),
            CultureChange::Geometry(geometry) => culture.set_geometry(geometry),
            CultureChange::Subdivisions(count) => culture.set_subdivision_count(count),
        }
        tracing::debug!("Culture #{} updated", index);
        Ok(culture)
    }

    pub fn delete(&mut self, index: usize) -> Result<Culture> {
        let position = check_index(index, self.records.len())?;
        tracing::debug!("Culture #{} deleted", index);
        Ok(self.records.remove(position))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
