use std::sync::Arc;

use sitestock_auth::{Role, UserRecord};
use sitestock_core::{DomainError, DomainResult};
use sitestock_ledger::{apply_quantity_change, ItemAction, Project, Resource};
use sitestock_store::{Collection, InMemoryCollection, StoreError};

/// Upper bound on read-reconcile-write attempts before giving up.
///
/// Each retry re-reads the record, so a retry only loses to a *different*
/// concurrent writer; exhaustion means sustained contention on one key.
const MAX_WRITE_ATTEMPTS: u32 = 5;

/// Persistence collections behind the HTTP handlers.
///
/// Constructed once at process start and injected into handlers; mutations
/// go through conditional replaces so concurrent writers cannot silently
/// clobber each other's validated state.
pub struct AppServices {
    users: Arc<dyn Collection<UserRecord>>,
    projects: Arc<dyn Collection<Project>>,
    resources: Arc<dyn Collection<Resource>>,
}

/// Wire up the in-memory store.
pub fn build_services() -> AppServices {
    AppServices {
        users: Arc::new(InMemoryCollection::<UserRecord>::new()),
        projects: Arc::new(InMemoryCollection::<Project>::new()),
        resources: Arc::new(InMemoryCollection::<Resource>::new()),
    }
}

impl AppServices {
    // ---- users ----

    pub fn register_user(
        &self,
        username: &str,
        password: &str,
        role: Option<String>,
    ) -> DomainResult<()> {
        let record = UserRecord::register(username, password, role.map(Role::new))?;
        let key = record.username.clone();
        self.users.insert(&key, record).map_err(|e| match e {
            StoreError::DuplicateKey(_) => DomainError::conflict("user already exists"),
            other => store_error(other),
        })?;
        tracing::info!(username, "user registered");
        Ok(())
    }

    pub fn login(&self, username: &str, password: &str) -> DomainResult<()> {
        // Unknown user and wrong password produce the same error.
        let stored = self
            .users
            .get(username)
            .map_err(store_error)?
            .ok_or(DomainError::Unauthorized)?;
        stored.doc.authenticate(password)
    }

    // ---- projects ----

    pub fn list_projects(&self) -> DomainResult<Vec<Project>> {
        self.projects.list().map_err(store_error)
    }

    pub fn create_project(&self, name: &str) -> DomainResult<()> {
        let project = Project::new(name)?;
        self.projects.insert(name, project).map_err(|e| match e {
            StoreError::DuplicateKey(_) => {
                DomainError::conflict(format!("project '{name}' already exists"))
            }
            other => store_error(other),
        })?;
        tracing::info!(project = name, "project created");
        Ok(())
    }

    pub fn update_inventory(
        &self,
        project_name: &str,
        item_name: &str,
        action: ItemAction,
        quantity: i64,
    ) -> DomainResult<()> {
        self.with_retries(|attempt| {
            let stored = self
                .projects
                .get(project_name)
                .map_err(store_error)?
                .ok_or_else(|| {
                    DomainError::not_found(format!("project '{project_name}' not found"))
                })?;

            let mut project = stored.doc;
            project.update_inventory(item_name, action, quantity)?;

            match self.projects.replace(project_name, stored.version, project) {
                Ok(_) => {
                    tracing::info!(
                        project = project_name,
                        item = item_name,
                        %action,
                        quantity,
                        "inventory updated"
                    );
                    Ok(Retry::Done(()))
                }
                Err(StoreError::VersionMismatch { .. }) => {
                    tracing::warn!(project = project_name, attempt, "lost inventory write race; retrying");
                    Ok(Retry::Again)
                }
                Err(other) => Err(store_error(other)),
            }
        })
    }

    // ---- resources ----

    pub fn list_resources(&self) -> DomainResult<Vec<Resource>> {
        self.resources.list().map_err(store_error)
    }

    pub fn create_resource(&self, name: &str, max_units: i64) -> DomainResult<()> {
        let resource = Resource::new(name, max_units)?;
        self.resources.insert(name, resource).map_err(|e| match e {
            StoreError::DuplicateKey(_) => {
                DomainError::conflict(format!("resource '{name}' already exists"))
            }
            other => store_error(other),
        })?;
        tracing::info!(resource = name, max_units, "resource created");
        Ok(())
    }

    pub fn set_required_quantity(&self, name: &str, quantity: i64) -> DomainResult<()> {
        self.with_retries(|attempt| {
            let stored = self.resource_by_name(name)?;
            let mut resource = stored.doc;
            resource.required_quantity = Some(quantity);

            match self.resources.replace(name, stored.version, resource) {
                Ok(_) => Ok(Retry::Done(())),
                Err(StoreError::VersionMismatch { .. }) => {
                    tracing::warn!(resource = name, attempt, "lost required-quantity write race; retrying");
                    Ok(Retry::Again)
                }
                Err(other) => Err(store_error(other)),
            }
        })
    }

    pub fn adjust_quantity(&self, name: &str, change: i64) -> DomainResult<i64> {
        self.with_retries(|attempt| {
            let stored = self.resource_by_name(name)?;
            let mut resource = stored.doc;
            let adjusted = apply_quantity_change(&resource, change)?;
            resource.available_quantity = adjusted;

            match self.resources.replace(name, stored.version, resource) {
                Ok(_) => {
                    tracing::info!(resource = name, change, available = adjusted, "quantity adjusted");
                    Ok(Retry::Done(adjusted))
                }
                Err(StoreError::VersionMismatch { .. }) => {
                    tracing::warn!(resource = name, attempt, "lost quantity write race; retrying");
                    Ok(Retry::Again)
                }
                Err(other) => Err(store_error(other)),
            }
        })
    }

    fn resource_by_name(
        &self,
        name: &str,
    ) -> DomainResult<sitestock_store::Versioned<Resource>> {
        self.resources
            .get(name)
            .map_err(store_error)?
            .ok_or_else(|| DomainError::not_found(format!("resource '{name}' not found")))
    }

    /// Run one read-reconcile-write attempt until it commits or the retry
    /// limit is hit. Domain failures abort immediately; only version
    /// conflicts are retried.
    fn with_retries<T>(
        &self,
        mut attempt_fn: impl FnMut(u32) -> DomainResult<Retry<T>>,
    ) -> DomainResult<T> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            match attempt_fn(attempt)? {
                Retry::Done(value) => return Ok(value),
                Retry::Again => continue,
            }
        }
        Err(DomainError::conflict(
            "write contention: too many concurrent updates, try again",
        ))
    }
}

enum Retry<T> {
    Done(T),
    Again,
}

fn store_error(err: StoreError) -> DomainError {
    match err {
        StoreError::DuplicateKey(key) => DomainError::conflict(format!("'{key}' already exists")),
        StoreError::VersionMismatch { key, .. } => {
            DomainError::conflict(format!("concurrent update on '{key}'"))
        }
        StoreError::MissingKey(key) => DomainError::not_found(format!("'{key}' not found")),
        StoreError::Backend(msg) => DomainError::internal(msg),
    }
}
