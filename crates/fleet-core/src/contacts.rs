use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub id: Uuid,
    pub name: String,
    pub relation: String,
    pub phone: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("contact name must not be empty")]
    MissingName,
    #[error("contact phone must not be empty")]
    MissingPhone,
}

/// Notification targets for the SOS path. Validation only; no further logic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactRegistry {
    contacts: Vec<EmergencyContact>,
}

impl ContactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        name: &str,
        relation: &str,
        phone: &str,
    ) -> Result<EmergencyContact, ContactError> {
        if name.trim().is_empty() {
            return Err(ContactError::MissingName);
        }
        if phone.trim().is_empty() {
            return Err(ContactError::MissingPhone);
        }
        let contact = EmergencyContact {
            id: Uuid::new_v4(),
            name: name.to_string(),
            relation: relation.to_string(),
            phone: phone.to_string(),
        };
        self.contacts.push(contact.clone());
        Ok(contact)
    }

    /// Absent ids are a no-op.
    pub fn remove(&mut self, id: Uuid) {
        self.contacts.retain(|c| c.id != id);
    }

    pub fn list(&self) -> &[EmergencyContact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Comma-joined names for SOS notification text.
    pub fn joined_names(&self) -> String {
        self.contacts
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
