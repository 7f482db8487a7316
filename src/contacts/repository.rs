use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::domain::{Contact, ContactId};

/// Storage abstraction so the bootstrap pipeline can be exercised in
/// isolation from any concrete storage engine.
pub trait ContactRepository: Send + Sync {
    /// Persist one contact, returning the stored copy with its assigned id.
    fn save(&self, contact: Contact) -> Result<Contact, RepositoryError>;
    /// All stored contacts in insertion order.
    fn find_all(&self) -> Result<Vec<Contact>, RepositoryError>;
    fn delete_all(&self) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// In-memory store backing the service binary, the CLI, and the test suites.
#[derive(Default, Clone)]
pub struct InMemoryContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    sequence: Arc<AtomicU64>,
}

impl ContactRepository for InMemoryContactRepository {
    fn save(&self, mut contact: Contact) -> Result<Contact, RepositoryError> {
        let id = ContactId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        contact.id = Some(id);

        let mut guard = self.contacts.lock().expect("repository mutex poisoned");
        guard.push(contact.clone());
        Ok(contact)
    }

    fn find_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        let guard = self.contacts.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }

    fn delete_all(&self) -> Result<(), RepositoryError> {
        let mut guard = self.contacts.lock().expect("repository mutex poisoned");
        guard.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::domain::Gender;
    use chrono::NaiveDate;

    fn contact(name: &str) -> Contact {
        Contact::new(
            name.to_string(),
            NaiveDate::from_ymd_opt(1985, 3, 14).expect("valid date"),
            Gender::Female,
            "555-0101".to_string(),
            "12 Elm Street".to_string(),
        )
    }

    #[test]
    fn save_assigns_monotonic_ids() {
        let repository = InMemoryContactRepository::default();
        let first = repository.save(contact("Jane Doe")).expect("save succeeds");
        let second = repository.save(contact("John Smith")).expect("save succeeds");

        assert_eq!(first.id, Some(ContactId(1)));
        assert_eq!(second.id, Some(ContactId(2)));
    }

    #[test]
    fn find_all_preserves_insertion_order() {
        let repository = InMemoryContactRepository::default();
        repository.save(contact("Jane Doe")).expect("save succeeds");
        repository.save(contact("John Smith")).expect("save succeeds");

        let names: Vec<_> = repository
            .find_all()
            .expect("find_all succeeds")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Jane Doe", "John Smith"]);
    }

    #[test]
    fn delete_all_empties_the_store() {
        let repository = InMemoryContactRepository::default();
        repository.save(contact("Jane Doe")).expect("save succeeds");
        repository.delete_all().expect("delete_all succeeds");

        assert!(repository.find_all().expect("find_all succeeds").is_empty());
    }
}
