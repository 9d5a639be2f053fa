use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};

use crate::repository::{AccountStatus, AdminRecord, EmployeeRecord, ManagerRecord};
use crate::{DirectoryRepository, TravelError};

#[derive(Clone)]
pub struct SqliteDirectoryRepository {
    pool: SqlitePool,
}

impl SqliteDirectoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn db_error(operation: &str, e: sqlx::Error) -> TravelError {
    if let sqlx::Error::Database(ref db) = e {
        if db.is_unique_violation() {
            return TravelError::UsernameTaken;
        }
    }
    log::error!(target: "waypoint", "msg=\"database error\", operation=\"{operation}\", error=\"{e}\"");
    TravelError::DatabaseError(e.to_string())
}

fn parse_status(raw: &str) -> Result<AccountStatus, TravelError> {
    AccountStatus::parse(raw)
        .ok_or_else(|| TravelError::DatabaseError(format!("unknown account status '{raw}'")))
}

#[derive(FromRow)]
struct AdminRow {
    id: i64,
    username: String,
    hashed_password: String,
}

impl From<AdminRow> for AdminRecord {
    fn from(row: AdminRow) -> Self {
        AdminRecord {
            id: row.id,
            username: row.username,
            hashed_password: row.hashed_password,
        }
    }
}

#[derive(FromRow)]
struct ManagerRow {
    id: i64,
    username: String,
    email: String,
    status: String,
    hashed_password: String,
}

impl TryFrom<ManagerRow> for ManagerRecord {
    type Error = TravelError;

    fn try_from(row: ManagerRow) -> Result<Self, Self::Error> {
        Ok(ManagerRecord {
            id: row.id,
            username: row.username,
            email: row.email,
            status: parse_status(&row.status)?,
            hashed_password: row.hashed_password,
        })
    }
}

#[derive(FromRow)]
struct EmployeeRow {
    id: i64,
    manager_id: i64,
    username: String,
    email: String,
    date_of_joining: NaiveDate,
    status: String,
    hashed_password: String,
}

impl TryFrom<EmployeeRow> for EmployeeRecord {
    type Error = TravelError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(EmployeeRecord {
            id: row.id,
            manager_id: row.manager_id,
            username: row.username,
            email: row.email,
            date_of_joining: row.date_of_joining,
            status: parse_status(&row.status)?,
            hashed_password: row.hashed_password,
        })
    }
}

const MANAGER_COLUMNS: &str = "id, username, email, status, hashed_password";
const EMPLOYEE_COLUMNS: &str =
    "id, manager_id, username, email, date_of_joining, status, hashed_password";

#[async_trait]
impl DirectoryRepository for SqliteDirectoryRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminRecord>, TravelError> {
        let row: Option<AdminRow> =
            sqlx::query_as("SELECT id, username, hashed_password FROM admins WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find_admin_by_username", e))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_manager_by_username(
        &self,
        username: &str,
    ) -> Result<Option<ManagerRecord>, TravelError> {
        let row: Option<ManagerRow> = sqlx::query_as(&format!(
            "SELECT {MANAGER_COLUMNS} FROM managers WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find_manager_by_username", e))?;

        row.map(TryInto::try_into).transpose()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_employee_by_username(
        &self,
        username: &str,
    ) -> Result<Option<EmployeeRecord>, TravelError> {
        let row: Option<EmployeeRow> = sqlx::query_as(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find_employee_by_username", e))?;

        row.map(TryInto::try_into).transpose()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_admin_by_id(&self, id: i64) -> Result<Option<AdminRecord>, TravelError> {
        let row: Option<AdminRow> =
            sqlx::query_as("SELECT id, username, hashed_password FROM admins WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find_admin_by_id", e))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_manager_by_id(&self, id: i64) -> Result<Option<ManagerRecord>, TravelError> {
        let row: Option<ManagerRow> =
            sqlx::query_as(&format!("SELECT {MANAGER_COLUMNS} FROM managers WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find_manager_by_id", e))?;

        row.map(TryInto::try_into).transpose()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_employee_by_id(&self, id: i64) -> Result<Option<EmployeeRecord>, TravelError> {
        let row: Option<EmployeeRow> = sqlx::query_as(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find_employee_by_id", e))?;

        row.map(TryInto::try_into).transpose()
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, hashed_password), err)
    )]
    async fn create_admin(
        &self,
        username: &str,
        hashed_password: &str,
    ) -> Result<AdminRecord, TravelError> {
        let row: AdminRow = sqlx::query_as(
            "INSERT INTO admins (username, hashed_password) VALUES (?, ?)
             RETURNING id, username, hashed_password",
        )
        .bind(username)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("create_admin", e))?;

        Ok(row.into())
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, hashed_password), err)
    )]
    async fn create_manager(
        &self,
        username: &str,
        email: &str,
        hashed_password: &str,
    ) -> Result<ManagerRecord, TravelError> {
        let row: ManagerRow = sqlx::query_as(&format!(
            "INSERT INTO managers (username, email, hashed_password) VALUES (?, ?, ?)
             RETURNING {MANAGER_COLUMNS}"
        ))
        .bind(username)
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("create_manager", e))?;

        row.try_into()
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, hashed_password), err)
    )]
    async fn create_employee(
        &self,
        username: &str,
        email: &str,
        manager_id: i64,
        date_of_joining: NaiveDate,
        hashed_password: &str,
    ) -> Result<EmployeeRecord, TravelError> {
        // The FK would catch this too, but a distinct NotFound beats a
        // generic constraint failure.
        let manager_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM managers WHERE id = ?)")
                .bind(manager_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("create_employee", e))?;
        if !manager_exists {
            return Err(TravelError::NotFound);
        }

        let row: EmployeeRow = sqlx::query_as(&format!(
            "INSERT INTO employees (manager_id, username, email, date_of_joining, hashed_password)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {EMPLOYEE_COLUMNS}"
        ))
        .bind(manager_id)
        .bind(username)
        .bind(email)
        .bind(date_of_joining)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("create_employee", e))?;

        row.try_into()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn list_managers(&self) -> Result<Vec<ManagerRecord>, TravelError> {
        let rows: Vec<ManagerRow> =
            sqlx::query_as(&format!("SELECT {MANAGER_COLUMNS} FROM managers ORDER BY id"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("list_managers", e))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn list_employees(&self) -> Result<Vec<EmployeeRecord>, TravelError> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list_employees", e))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn search_employees(&self, fragment: &str) -> Result<Vec<EmployeeRecord>, TravelError> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees
             WHERE instr(lower(username), ?) > 0 ORDER BY id"
        ))
        .bind(fragment.to_lowercase())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("search_employees", e))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
