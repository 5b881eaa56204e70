//! The authenticated principal handed to every domain action.
//!
//! Authentication itself (tokens, sessions) lives in the identity service;
//! by the time a request reaches the engine it has already been resolved to
//! an `Actor`. Actions only perform ownership and role checks against it.

use serde::{Deserialize, Serialize};

use crate::common::error::DomainError;
use crate::common::UserId;

/// Role of an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Interviewer,
    Candidate,
}

/// An authenticated caller: resolved identity plus role.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn interviewer(id: UserId) -> Self {
        Self::new(id, Role::Interviewer)
    }

    pub fn candidate(id: UserId) -> Self {
        Self::new(id, Role::Candidate)
    }

    /// Require the interviewer role.
    pub fn require_interviewer(&self) -> Result<UserId, DomainError> {
        match self.role {
            Role::Interviewer => Ok(self.id),
            Role::Candidate => Err(DomainError::forbidden(
                "only interviewers may manage schedules",
            )),
        }
    }

    /// Require the candidate role.
    pub fn require_candidate(&self) -> Result<UserId, DomainError> {
        match self.role {
            Role::Candidate => Ok(self.id),
            Role::Interviewer => Err(DomainError::forbidden("only candidates may book slots")),
        }
    }

    /// Require that the caller owns the given entity.
    pub fn require_owner(&self, owner_id: UserId, entity: &str) -> Result<(), DomainError> {
        if self.id == owner_id {
            Ok(())
        } else {
            Err(DomainError::forbidden(format!(
                "caller does not own this {entity}"
            )))
        }
    }
}
