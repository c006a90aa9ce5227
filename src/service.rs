use std::sync::Arc;

use log::{info, warn};

use crate::models::Employee;
use crate::store::{EmployeeRepository, StoreError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    DuplicateResource(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    fn not_found(id: i64) -> Self {
        ServiceError::NotFound(format!("Employee not found with given id : {}", id))
    }
}

/// Business rules in front of the record store: email uniqueness on create and
/// existence checks on lookup and delete.
///
/// The uniqueness check and the insert are two separate store calls, so two
/// concurrent creates with the same email can both succeed.
pub struct EmployeeService {
    repository: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        EmployeeService { repository }
    }

    pub fn create(&self, mut candidate: Employee) -> ServiceResult<Employee> {
        if self.repository.find_by_email(&candidate.email)?.is_some() {
            warn!("rejected duplicate employee email {}", candidate.email);
            return Err(ServiceError::DuplicateResource(format!(
                "Employee already exist with given email : {}",
                candidate.email
            )));
        }

        candidate.id = 0;
        let saved = self.repository.save(candidate)?;
        info!("created employee {}", saved.id);
        Ok(saved)
    }

    pub fn list(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.repository.find_all()?)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Employee> {
        self.repository
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::not_found(id))
    }

    /// Persists a record the caller already fetched and modified. Neither
    /// existence nor email uniqueness is checked again here.
    pub fn update(&self, existing: Employee) -> ServiceResult<Employee> {
        let saved = self.repository.save(existing)?;
        info!("updated employee {}", saved.id);
        Ok(saved)
    }

    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        if self.repository.find_by_id(id)?.is_none() {
            return Err(ServiceError::not_found(id));
        }
        self.repository.delete_by_id(id)?;
        info!("deleted employee {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryRepository, StoreResult};

    fn service() -> (Arc<MemoryRepository>, EmployeeService) {
        let repo = Arc::new(MemoryRepository::new());
        (repo.clone(), EmployeeService::new(repo))
    }

    fn ambar() -> Employee {
        Employee::draft("Ambar", "Adhikari", "ambar@cts.com")
    }

    #[test]
    fn create_assigns_an_id_and_keeps_fields() {
        let (_, service) = service();
        let saved = service.create(ambar()).unwrap();

        assert!(saved.id > 0);
        assert_eq!(saved.first_name, "Ambar");
        assert_eq!(saved.last_name, "Adhikari");
        assert_eq!(saved.email, "ambar@cts.com");
    }

    #[test]
    fn create_rejects_duplicate_email_without_writing() {
        let (repo, service) = service();
        service.create(ambar()).unwrap();

        let err = service
            .create(Employee::draft("Other", "Person", "ambar@cts.com"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateResource(_)));
        assert_eq!(err.to_string(), "Employee already exist with given email : ambar@cts.com");
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn create_ignores_caller_supplied_id() {
        let (repo, service) = service();
        let saved = service.create(Employee { id: 500, ..ambar() }).unwrap();

        assert_eq!(saved.id, 1);
        assert_eq!(repo.find_by_id(500).unwrap(), None);
    }

    #[test]
    fn list_returns_every_record() {
        let (_, service) = service();
        assert!(service.list().unwrap().is_empty());

        service.create(ambar()).unwrap();
        service.create(Employee::draft("MS", "Adhikari", "MS@rt.com")).unwrap();
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn get_by_id_reports_missing_records() {
        let (_, service) = service();
        let saved = service.create(ambar()).unwrap();

        assert_eq!(service.get_by_id(saved.id).unwrap(), saved);

        let err = service.get_by_id(99).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "Employee not found with given id : 99");
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let (_, service) = service();
        let mut existing = service.create(ambar()).unwrap();
        existing.first_name = "Ram".to_string();
        existing.last_name = "Jadhav".to_string();
        existing.email = "ram@gmail.com".to_string();

        let updated = service.update(existing.clone()).unwrap();
        assert_eq!(updated, existing);
        assert_eq!(service.get_by_id(existing.id).unwrap().email, "ram@gmail.com");
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn delete_removes_existing_and_rejects_missing() {
        let (repo, service) = service();
        let saved = service.create(ambar()).unwrap();

        service.delete(saved.id).unwrap();
        assert!(matches!(service.get_by_id(saved.id), Err(ServiceError::NotFound(_))));

        assert!(matches!(service.delete(saved.id), Err(ServiceError::NotFound(_))));
        assert!(repo.is_empty());
    }

    struct BrokenRepository;

    impl EmployeeRepository for BrokenRepository {
        fn find_by_id(&self, _: i64) -> StoreResult<Option<Employee>> {
            Err(StoreError::Connection("refused".to_string()))
        }

        fn find_by_email(&self, _: &str) -> StoreResult<Option<Employee>> {
            Err(StoreError::Connection("refused".to_string()))
        }

        fn find_all(&self) -> StoreResult<Vec<Employee>> {
            Err(StoreError::Connection("refused".to_string()))
        }

        fn save(&self, _: Employee) -> StoreResult<Employee> {
            Err(StoreError::Connection("refused".to_string()))
        }

        fn delete_by_id(&self, _: i64) -> StoreResult<()> {
            Err(StoreError::Connection("refused".to_string()))
        }
    }

    #[test]
    fn store_failures_propagate() {
        let service = EmployeeService::new(Arc::new(BrokenRepository));

        assert!(matches!(service.create(ambar()), Err(ServiceError::Store(_))));
        assert!(matches!(service.get_by_id(1), Err(ServiceError::Store(_))));
        assert!(matches!(service.delete(1), Err(ServiceError::Store(_))));
    }
}
