// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ownership policy applied uniformly by every repository.

use crate::middleware::auth::AuthUser;
use crate::models::{Interview, JobApplication, JobDocument, Profile};

/// What the caller wants to do with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Update,
    Delete,
    /// Link a new or existing child record (interview, document) to an application
    Attach,
}

/// A record subject to the policy.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Application(&'a JobApplication),
    Interview(&'a Interview),
    Document(&'a JobDocument),
    Profile(&'a Profile),
}

impl Resource<'_> {
    fn owner_id(&self) -> u64 {
        match self {
            Resource::Application(a) => a.owner_id,
            Resource::Interview(i) => i.owner_id,
            Resource::Document(d) => d.owner_id,
            Resource::Profile(p) => p.user_id,
        }
    }
}

/// Users may do anything with their own records and nothing with anyone
/// else's. Child records are owned through their application; `owner_id`
/// on interviews and documents is copied from it at attach time.
pub fn can(identity: &AuthUser, action: Action, resource: Resource<'_>) -> bool {
    let allowed = resource.owner_id() == identity.user_id;
    if !allowed {
        tracing::debug!(
            user_id = identity.user_id,
            action = ?action,
            "Ownership check denied"
        );
    }
    allowed
}
