use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{EmployeeRepository, StoreError, StoreResult};
use crate::models::Employee;

/// In-memory employee table. Used by the tests and when the service is built
/// without the `postgres` feature.
#[derive(Default)]
pub struct MemoryRepository {
    table: RwLock<Table>,
}

#[derive(Default)]
struct Table {
    rows:    BTreeMap<i64, Employee>,
    last_id: i64,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row count. Panics if a writer panicked while holding the table lock.
    pub fn len(&self) -> usize {
        self.table.read().expect("employee table lock poisoned").rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EmployeeRepository for MemoryRepository {
    fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.values().find(|e| e.email == email).cloned())
    }

    fn find_all(&self) -> StoreResult<Vec<Employee>> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.values().cloned().collect())
    }

    fn save(&self, mut employee: Employee) -> StoreResult<Employee> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        if employee.is_persisted() {
            // ids are never handed out twice, even after an explicit-id upsert
            table.last_id = table.last_id.max(employee.id);
        } else {
            table.last_id += 1;
            employee.id = table.last_id;
        }
        table.rows.insert(employee.id, employee.clone());
        Ok(employee)
    }

    fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        table.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_assigns_increasing_ids() {
        let repo = MemoryRepository::new();
        let first = repo.save(Employee::draft("Ambar", "Adhikari", "ambar@cts.com")).unwrap();
        let second = repo.save(Employee::draft("MS", "Adhikari", "MS@rt.com")).unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(repo.find_all().unwrap(), vec![first, second]);
    }

    #[test]
    fn save_with_id_updates_in_place() {
        let repo = MemoryRepository::new();
        let mut saved = repo.save(Employee::draft("Ambar", "Adhikari", "ambar@cts.com")).unwrap();
        saved.email = "ram@gmail.com".to_string();

        let updated = repo.save(saved.clone()).unwrap();
        assert_eq!(updated, saved);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find_by_email("ram@gmail.com").unwrap(), Some(saved));
        assert_eq!(repo.find_by_email("ambar@cts.com").unwrap(), None);
    }

    #[test]
    fn poisoned_table_is_reported() {
        let repo = MemoryRepository::new();
        repo.save(Employee::draft("Ambar", "Adhikari", "ambar@cts.com")).unwrap();

        let poisoned = std::thread::scope(|s| {
            s.spawn(|| {
                let _guard = repo.table.write().unwrap();
                panic!("writer died");
            })
            .join()
        });
        assert!(poisoned.is_err());

        assert!(matches!(repo.find_all(), Err(StoreError::Poisoned)));
        let counted = std::panic::catch_unwind(|| repo.len());
        assert!(counted.is_err());
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let repo = MemoryRepository::new();
        let first = repo.save(Employee::draft("Ambar", "Adhikari", "ambar@cts.com")).unwrap();
        repo.delete_by_id(first.id).unwrap();

        assert_eq!(repo.find_by_id(first.id).unwrap(), None);
        assert!(repo.is_empty());

        let second = repo.save(Employee::draft("MS", "Adhikari", "MS@rt.com")).unwrap();
        assert_ne!(second.id, first.id);
    }
}
