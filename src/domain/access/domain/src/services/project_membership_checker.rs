// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{DatasetId, ProjectId, ServiceAccount, ServiceAccountId};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Determines, for every active service account, whether it keeps its cloud
/// ACL membership. Each run evaluates from scratch; there is no persisted
/// pending-removal state, and the downstream ACL-mutation collaborator owns
/// the actual transition to removed.
#[async_trait::async_trait]
pub trait ProjectMembershipChecker: Send + Sync {
    async fn process(&self) -> Result<MembershipCheckReport, MembershipCheckError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One service account to be evicted from its dataset's ACL group. Equality
/// is structural: two entries built independently from the same triple
/// compare equal, which is what deduplication and assertions rely on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AclRemovalEntry {
    pub project_id: ProjectId,
    pub account_id: ServiceAccountId,
    pub acl_group: String,
}

impl AclRemovalEntry {
    pub fn from_account(account: &ServiceAccount, acl_group: impl Into<String>) -> Self {
        Self {
            project_id: account.project_id.clone(),
            account_id: account.id.clone(),
            acl_group: acl_group.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipCheckReport {
    /// Accounts exempt from removal because their dataset is public
    pub skipped_service_accounts: Vec<ServiceAccountId>,
    pub acl_remove_list: Vec<AclRemovalEntry>,
    /// Datasets that could not be resolved (missing reference data or ACL
    /// mapping); the affected entries are excluded rather than guessed at
    pub unknown_datasets: Vec<DatasetId>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum MembershipCheckError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
