// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeSet;

use internal_error::InternalError;
use thiserror::Error;

use crate::{DatasetId, IdentityId, LinkedIdentity, ServiceAccountId, Whitelist};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Transforms the whitelist feed plus the current authorization state into a
/// new, consistent state and a structured report. Re-running with an
/// unchanged feed and store is a no-op: every update result carries empty
/// deltas and the removal set is unchanged.
#[async_trait::async_trait]
pub trait AccessControlUpdater: Send + Sync {
    async fn process(&self, whitelist: &Whitelist) -> Result<AccessUpdateReport, AccessUpdateError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Resolution of one external login against the identity store. Zero or
/// multiple linked claimants are data-quality conditions that quarantine the
/// whole group, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResolution {
    /// No identity has completed the linking flow for this login
    Unlinked,
    /// More than one identity claims to be linked: ambiguous authority, do
    /// not guess which one is real. Identities in ascending creation order.
    Conflict(Vec<LinkedIdentity>),
    /// Exactly one linked identity, safe to reconcile
    Linked(LinkedIdentity),
}

impl LoginResolution {
    pub fn resolve(claimants: impl IntoIterator<Item = LinkedIdentity>) -> Self {
        let mut linked: Vec<_> = claimants.into_iter().filter(|i| i.linked).collect();
        match linked.len() {
            0 => Self::Unlinked,
            1 => Self::Linked(linked.pop().unwrap()),
            _ => Self::Conflict(linked),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Authorization delta applied for one identity. Appended to the report for
/// every uniquely resolved identity, including when both sets are empty, so
/// callers get a complete per-identity audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUpdateResult {
    pub identity_id: IdentityId,
    pub added: BTreeSet<DatasetId>,
    pub revoked: BTreeSet<DatasetId>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessUpdateReport {
    /// Logins whose group was left untouched (no linked identity, or a
    /// linking conflict)
    pub skipped_logins: BTreeSet<String>,
    /// Every identity involved in a linking conflict, as
    /// `(external_login, identity_id)` in ascending creation order
    pub duplicate_linked_identities: Vec<(String, IdentityId)>,
    pub update_results: Vec<IdentityUpdateResult>,
    /// Service accounts whose removal exposure was detected after the
    /// update, recomputed against the fresh authorization state
    pub service_account_remove_set: BTreeSet<ServiceAccountId>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum AccessUpdateError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
