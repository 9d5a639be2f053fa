use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::TravelError;

/// Account activity flag. Provisioned accounts start `Active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Inactive => "Inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(AccountStatus::Active),
            "Inactive" => Some(AccountStatus::Inactive),
            _ => None,
        }
    }
}

/// Admin account: global oversight, no ownership relations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminRecord {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}

/// Manager account: reviews tickets of the employees reporting to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub status: AccountStatus,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}

/// Employee account: reports to exactly one manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: i64,
    pub manager_id: i64,
    pub username: String,
    pub email: String,
    pub date_of_joining: NaiveDate,
    pub status: AccountStatus,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}

/// Storage abstraction for the three role-specific account tables.
///
/// Usernames are unique within each role table. Creation fails with
/// `UsernameTaken` on conflict; `create_employee` fails with `NotFound` when
/// the referenced manager does not exist.
#[async_trait]
pub trait DirectoryRepository {
    async fn find_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminRecord>, TravelError>;
    async fn find_manager_by_username(
        &self,
        username: &str,
    ) -> Result<Option<ManagerRecord>, TravelError>;
    async fn find_employee_by_username(
        &self,
        username: &str,
    ) -> Result<Option<EmployeeRecord>, TravelError>;

    async fn find_admin_by_id(&self, id: i64) -> Result<Option<AdminRecord>, TravelError>;
    async fn find_manager_by_id(&self, id: i64) -> Result<Option<ManagerRecord>, TravelError>;
    async fn find_employee_by_id(&self, id: i64) -> Result<Option<EmployeeRecord>, TravelError>;

    async fn create_admin(
        &self,
        username: &str,
        hashed_password: &str,
    ) -> Result<AdminRecord, TravelError>;

    async fn create_manager(
        &self,
        username: &str,
        email: &str,
        hashed_password: &str,
    ) -> Result<ManagerRecord, TravelError>;

    async fn create_employee(
        &self,
        username: &str,
        email: &str,
        manager_id: i64,
        date_of_joining: NaiveDate,
        hashed_password: &str,
    ) -> Result<EmployeeRecord, TravelError>;

    async fn list_managers(&self) -> Result<Vec<ManagerRecord>, TravelError>;
    async fn list_employees(&self) -> Result<Vec<EmployeeRecord>, TravelError>;

    /// Employees whose username contains the fragment, case-insensitive.
    async fn search_employees(&self, fragment: &str) -> Result<Vec<EmployeeRecord>, TravelError>;
}
