//! Directory records and storage.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed length of a user name, in characters.
const NAME_LEN: std::ops::RangeInclusive<usize> = 2..=20;

/// Errors raised by directory operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// Input failed validation.
    #[error("{0}")]
    Invalid(String),

    /// Another user already registered this email.
    #[error("That email is taken. Please choose a different one.")]
    EmailTaken,

    /// No record with the given id.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Record kind, e.g. "Team".
        kind: &'static str,
        /// Requested id.
        id: u64,
    },
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub date_added: DateTime<Utc>,
}

/// A team record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub certification: String,
}

/// Fields accepted when creating or replacing a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TeamDraft {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub certification: String,
}

impl TeamDraft {
    fn validate(&self) -> Result<(), DirectoryError> {
        if self.name.trim().is_empty() {
            return Err(DirectoryError::Invalid("Team name is required".into()));
        }
        Ok(())
    }
}

/// Thread-safe directory. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    inner: Arc<DirectoryInner>,
}

#[derive(Debug, Default)]
struct DirectoryInner {
    /// Names listed ahead of registered users.
    seed_members: Vec<String>,
    users: RwLock<UserTable>,
    teams: RwLock<TeamTable>,
}

/// Users in registration order.
#[derive(Debug, Default)]
struct UserTable {
    rows: Vec<User>,
    last_id: u64,
}

/// Teams keyed by id. Ids only grow, so key order is creation order.
#[derive(Debug, Default)]
struct TeamTable {
    by_id: BTreeMap<u64, Team>,
    last_id: u64,
}

impl Directory {
    /// Create a directory whose member list starts with `seed_members`.
    pub fn new(seed_members: Vec<String>) -> Self {
        Self {
            inner: Arc::new(DirectoryInner {
                seed_members,
                ..DirectoryInner::default()
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────

    /// Register a user. Emails are unique, compared case-insensitively.
    pub fn register(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<User, DirectoryError> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();

        if !NAME_LEN.contains(&name.chars().count()) {
            return Err(DirectoryError::Invalid(format!(
                "Name must be between {} and {} characters",
                NAME_LEN.start(),
                NAME_LEN.end()
            )));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(DirectoryError::Invalid("A valid email is required".into()));
        }

        let mut users = self
            .inner
            .users
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if users.rows.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(DirectoryError::EmailTaken);
        }

        users.last_id += 1;
        let user = User {
            id: users.last_id,
            name,
            email,
            date_added: Utc::now(),
        };
        users.rows.push(user.clone());

        tracing::info!(
            name: "directory.user.registered",
            user_id = user.id,
            registered = users.rows.len(),
            "User added"
        );
        Ok(user)
    }

    /// Display names for the roster: seed members, then users in
    /// registration order.
    pub fn members(&self) -> Vec<String> {
        let users = self
            .inner
            .users
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        self.inner
            .seed_members
            .iter()
            .cloned()
            .chain(users.rows.iter().map(|u| u.name.clone()))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Teams
    // ─────────────────────────────────────────────────────────────────────

    /// All teams in creation order.
    pub fn list_teams(&self) -> Vec<Team> {
        self.inner
            .teams
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_id
            .values()
            .cloned()
            .collect()
    }

    /// Fetch one team.
    pub fn get_team(&self, id: u64) -> Result<Team, DirectoryError> {
        self.inner
            .teams
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| team_not_found(id))
    }

    /// Create a team.
    pub fn create_team(&self, draft: TeamDraft) -> Result<Team, DirectoryError> {
        draft.validate()?;
        let mut table = self
            .inner
            .teams
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        table.last_id += 1;
        let team = Team {
            id: table.last_id,
            name: draft.name.trim().to_string(),
            bio: draft.bio,
            certification: draft.certification,
        };
        table.by_id.insert(team.id, team.clone());

        tracing::info!("Created team: {} ({})", team.name, team.id);
        Ok(team)
    }

    /// Replace a team's fields.
    pub fn update_team(&self, id: u64, draft: TeamDraft) -> Result<Team, DirectoryError> {
        draft.validate()?;
        let mut table = self
            .inner
            .teams
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let team = table.by_id.get_mut(&id).ok_or_else(|| team_not_found(id))?;
        team.name = draft.name.trim().to_string();
        team.bio = draft.bio;
        team.certification = draft.certification;
        Ok(team.clone())
    }

    /// Delete a team, returning it.
    pub fn delete_team(&self, id: u64) -> Result<Team, DirectoryError> {
        let mut table = self
            .inner
            .teams
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let team = table.by_id.remove(&id).ok_or_else(|| team_not_found(id))?;

        tracing::info!("Deleted team: {}", id);
        Ok(team)
    }
}

fn team_not_found(id: u64) -> DirectoryError {
    DirectoryError::NotFound { kind: "Team", id }
}
