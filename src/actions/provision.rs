use chrono::Utc;

use crate::crypto::hash_password;
use crate::notify::{send_best_effort, EmailMessage, Notifier};
use crate::repository::{AdminRecord, DirectoryRepository, EmployeeRecord, ManagerRecord};
use crate::secret::SecretString;
use crate::validators::{validate_email, validate_password, validate_username};
use crate::TravelError;

/// Provisions an admin account.
pub struct CreateAdminAction<D> {
    directory: D,
}

impl<D: DirectoryRepository> CreateAdminAction<D> {
    pub fn new(directory: D) -> Self {
        CreateAdminAction { directory }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_admin", skip_all, err)
    )]
    pub async fn execute(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AdminRecord, TravelError> {
        validate_username(username)?;
        validate_password(password.expose_secret())?;

        let hashed = hash_password(password.expose_secret())?;
        let admin = self.directory.create_admin(username, &hashed).await?;

        log::info!(
            target: "waypoint",
            "msg=\"admin created\", admin_id={}, username=\"{username}\"",
            admin.id
        );
        Ok(admin)
    }
}

/// Provisions a manager account and emails the account details.
pub struct CreateManagerAction<D, N> {
    directory: D,
    notifier: N,
}

impl<D: DirectoryRepository, N: Notifier> CreateManagerAction<D, N> {
    pub fn new(directory: D, notifier: N) -> Self {
        CreateManagerAction {
            directory,
            notifier,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_manager", skip_all, err)
    )]
    pub async fn execute(
        &self,
        username: &str,
        password: &SecretString,
        email: &str,
    ) -> Result<ManagerRecord, TravelError> {
        validate_username(username)?;
        validate_password(password.expose_secret())?;
        validate_email(email)?;

        let hashed = hash_password(password.expose_secret())?;
        let manager = self
            .directory
            .create_manager(username, email, &hashed)
            .await?;

        send_best_effort(
            &self.notifier,
            EmailMessage {
                to: manager.email.clone(),
                subject: "Waypoint account created".to_owned(),
                body: format!(
                    "{username}, your account was created successfully. Manager id is {}.",
                    manager.id
                ),
            },
        )
        .await;

        log::info!(
            target: "waypoint",
            "msg=\"manager created\", manager_id={}, username=\"{username}\"",
            manager.id
        );
        Ok(manager)
    }
}

/// Provisions an employee account under an existing manager and emails the
/// account details. `date_of_joining` is stamped with today's date.
pub struct CreateEmployeeAction<D, N> {
    directory: D,
    notifier: N,
}

impl<D: DirectoryRepository, N: Notifier> CreateEmployeeAction<D, N> {
    pub fn new(directory: D, notifier: N) -> Self {
        CreateEmployeeAction {
            directory,
            notifier,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_employee", skip_all, err)
    )]
    pub async fn execute(
        &self,
        username: &str,
        password: &SecretString,
        email: &str,
        manager_id: i64,
    ) -> Result<EmployeeRecord, TravelError> {
        validate_username(username)?;
        validate_password(password.expose_secret())?;
        validate_email(email)?;

        let hashed = hash_password(password.expose_secret())?;
        let date_of_joining = Utc::now().date_naive();
        let employee = self
            .directory
            .create_employee(username, email, manager_id, date_of_joining, &hashed)
            .await?;

        send_best_effort(
            &self.notifier,
            EmailMessage {
                to: employee.email.clone(),
                subject: "Waypoint account created".to_owned(),
                body: format!(
                    "{username}, your account was created successfully. Employee id is {}.",
                    employee.id
                ),
            },
        )
        .await;

        log::info!(
            target: "waypoint",
            "msg=\"employee created\", employee_id={}, manager_id={manager_id}, username=\"{username}\"",
            employee.id
        );
        Ok(employee)
    }
}
