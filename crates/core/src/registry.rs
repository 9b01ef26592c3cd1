//! Pet registry: the ordered in-memory list every interface works on.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::care::OverdueTask;
use crate::error::{PetCareError, Result};
use crate::pet::{Pet, PetId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetRegistry {
    pets: Vec<Pet>,
}

impl PetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap pets loaded from storage. Later duplicates of a name are kept,
    /// since the file may predate the uniqueness rule.
    pub fn from_pets(pets: Vec<Pet>) -> Self {
        Self { pets }
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    pub fn add_pet(&mut self, pet: Pet) -> Result<&Pet> {
        if self.find_by_name(&pet.name).is_some() {
            return Err(PetCareError::DuplicatePet(pet.name));
        }
        info!(pet = %pet.name, kind = pet.kind_name(), "Added pet");
        self.pets.push(pet);
        Ok(&self.pets[self.pets.len() - 1])
    }

    pub fn remove_pet(&mut self, id: PetId) -> Option<Pet> {
        let index = self.pets.iter().position(|p| p.id == id)?;
        let pet = self.pets.remove(index);
        info!(pet = %pet.name, "Removed pet");
        Some(pet)
    }

    /// Remove every pet carrying `name`, ignoring case.
    pub fn remove_by_name(&mut self, name: &str) -> Result<Vec<Pet>> {
        let wanted = name.trim();
        let (removed, kept): (Vec<Pet>, Vec<Pet>) = std::mem::take(&mut self.pets)
            .into_iter()
            .partition(|p| p.name.eq_ignore_ascii_case(wanted));
        self.pets = kept;
        if removed.is_empty() {
            return Err(PetCareError::PetNotFound(name.to_string()));
        }
        debug!(count = removed.len(), name = wanted, "Removed pets by name");
        Ok(removed)
    }

    pub fn get(&self, id: PetId) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PetId) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|p| p.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Pet> {
        let wanted = name.trim();
        self.pets.iter().find(|p| p.name.eq_ignore_ascii_case(wanted))
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Result<&mut Pet> {
        let wanted = name.trim();
        self.pets
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PetCareError::PetNotFound(name.to_string()))
    }

    /// Overdue tasks across all pets, in pet order then task order.
    pub fn all_overdue_tasks(&self, today: NaiveDate) -> Vec<OverdueTask> {
        self.pets
            .iter()
            .flat_map(|pet| pet.overdue_tasks(today))
            .collect()
    }
}
