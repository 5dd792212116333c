// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashSet;

use internal_error::InternalError;
use thiserror::Error;

use crate::{Dataset, DatasetId, IdentityId, ProjectId, ServiceAccount};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Read-only reference data consumed by the membership check: datasets,
/// projects, and the service accounts scoped to them.
#[async_trait::async_trait]
pub trait ReferenceDataRepository: Send + Sync {
    async fn dataset_info(&self, dataset_id: &DatasetId) -> Result<Dataset, GetDatasetError>;

    /// Active service accounts only, in a stable order.
    async fn active_service_accounts(
        &self,
    ) -> Result<Vec<ServiceAccount>, ListServiceAccountsError>;

    /// Members of the project; empty set for an unknown project.
    async fn project_members(
        &self,
        project_id: &ProjectId,
    ) -> Result<HashSet<IdentityId>, GetProjectMembersError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetDatasetError {
    #[error(transparent)]
    NotFound(DatasetNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Dataset not found: '{dataset_id}'")]
pub struct DatasetNotFoundError {
    pub dataset_id: DatasetId,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ListServiceAccountsError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetProjectMembersError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
