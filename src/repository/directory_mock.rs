#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::TravelError;

use super::directory::{
    AccountStatus, AdminRecord, DirectoryRepository, EmployeeRecord, ManagerRecord,
};

/// In-memory directory for tests. Usernames are unique per role table, as in
/// the real store.
#[derive(Clone, Default)]
pub struct MockDirectoryRepository {
    pub admins: Arc<Mutex<Vec<AdminRecord>>>,
    pub managers: Arc<Mutex<Vec<ManagerRecord>>>,
    pub employees: Arc<Mutex<Vec<EmployeeRecord>>>,
}

impl MockDirectoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> i64) -> i64 {
    items.iter().map(id_of).max().unwrap_or(0) + 1
}

#[async_trait]
impl DirectoryRepository for MockDirectoryRepository {
    async fn find_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminRecord>, TravelError> {
        let admins = self.admins.lock().unwrap();
        Ok(admins.iter().find(|a| a.username == username).cloned())
    }

    async fn find_manager_by_username(
        &self,
        username: &str,
    ) -> Result<Option<ManagerRecord>, TravelError> {
        let managers = self.managers.lock().unwrap();
        Ok(managers.iter().find(|m| m.username == username).cloned())
    }

    async fn find_employee_by_username(
        &self,
        username: &str,
    ) -> Result<Option<EmployeeRecord>, TravelError> {
        let employees = self.employees.lock().unwrap();
        Ok(employees.iter().find(|e| e.username == username).cloned())
    }

    async fn find_admin_by_id(&self, id: i64) -> Result<Option<AdminRecord>, TravelError> {
        let admins = self.admins.lock().unwrap();
        Ok(admins.iter().find(|a| a.id == id).cloned())
    }

    async fn find_manager_by_id(&self, id: i64) -> Result<Option<ManagerRecord>, TravelError> {
        let managers = self.managers.lock().unwrap();
        Ok(managers.iter().find(|m| m.id == id).cloned())
    }

    async fn find_employee_by_id(&self, id: i64) -> Result<Option<EmployeeRecord>, TravelError> {
        let employees = self.employees.lock().unwrap();
        Ok(employees.iter().find(|e| e.id == id).cloned())
    }

    async fn create_admin(
        &self,
        username: &str,
        hashed_password: &str,
    ) -> Result<AdminRecord, TravelError> {
        let mut admins = self.admins.lock().unwrap();
        if admins.iter().any(|a| a.username == username) {
            return Err(TravelError::UsernameTaken);
        }
        let admin = AdminRecord {
            id: next_id(&admins, |a| a.id),
            username: username.to_owned(),
            hashed_password: hashed_password.to_owned(),
        };
        admins.push(admin.clone());
        Ok(admin)
    }

    async fn create_manager(
        &self,
        username: &str,
        email: &str,
        hashed_password: &str,
    ) -> Result<ManagerRecord, TravelError> {
        let mut managers = self.managers.lock().unwrap();
        if managers.iter().any(|m| m.username == username) {
            return Err(TravelError::UsernameTaken);
        }
        let manager = ManagerRecord {
            id: next_id(&managers, |m| m.id),
            username: username.to_owned(),
            email: email.to_owned(),
            status: AccountStatus::Active,
            hashed_password: hashed_password.to_owned(),
        };
        managers.push(manager.clone());
        Ok(manager)
    }

    async fn create_employee(
        &self,
        username: &str,
        email: &str,
        manager_id: i64,
        date_of_joining: NaiveDate,
        hashed_password: &str,
    ) -> Result<EmployeeRecord, TravelError> {
        {
            let managers = self.managers.lock().unwrap();
            if !managers.iter().any(|m| m.id == manager_id) {
                return Err(TravelError::NotFound);
            }
        }
        let mut employees = self.employees.lock().unwrap();
        if employees.iter().any(|e| e.username == username) {
            return Err(TravelError::UsernameTaken);
        }
        let employee = EmployeeRecord {
            id: next_id(&employees, |e| e.id),
            manager_id,
            username: username.to_owned(),
            email: email.to_owned(),
            date_of_joining,
            status: AccountStatus::Active,
            hashed_password: hashed_password.to_owned(),
        };
        employees.push(employee.clone());
        Ok(employee)
    }

    async fn list_managers(&self) -> Result<Vec<ManagerRecord>, TravelError> {
        Ok(self.managers.lock().unwrap().clone())
    }

    async fn list_employees(&self) -> Result<Vec<EmployeeRecord>, TravelError> {
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn search_employees(&self, fragment: &str) -> Result<Vec<EmployeeRecord>, TravelError> {
        let fragment = fragment.to_lowercase();
        let employees = self.employees.lock().unwrap();
        Ok(employees
            .iter()
            .filter(|e| e.username.to_lowercase().contains(&fragment))
            .cloned()
            .collect())
    }
}
