use crate::domain::model::Input;
use crate::utils::error::Result;
use crate::utils::validation::check_index;

#[derive(Debug, Clone, PartialEq)]
pub enum InputChange {
    Name(String),
    Dose(f64),
}

/// Insertion-ordered inputs, addressed by 1-based index.
#[derive(Debug, Clone, Default)]
pub struct InputStore {
    records: Vec<Input>,
}

impl InputStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Input>) -> Self {
        Self { records }
    }

    pub fn create(&mut self, name: impl Into<String>, dose_per_area: f64) -> &Input {
        self.records.push(Input::new(name, dose_per_area));
        tracing::debug!("Input #{} created", self.records.len());
        &self.records[self.records.len() - 1]
    }

    pub fn list(&self) -> &[Input] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Result<&Input> {
        let position = check_index(index, self.records.len())?;
        Ok(&self.records[position])
    }

    pub fn update(&mut self, index: usize, change: InputChange) -> Result<&Input> {
        let position = check_index(index, self.records.len())?;
        let input = &mut self.records[position];
        match change {
            InputChange::Name(name) => input.name = name,
            InputChange::Dose(dose) => input.dose_per_area = dose,
        }
        tracing::debug!("Input #{} updated", index);
        Ok(input)
    }

    pub fn delete(&mut self, index: usize) -> Result<Input> {
        let position = check_index(index, self.records.len())?;
        tracing::debug!("Input #{} deleted", index);
        Ok(self.records.remove(position))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
