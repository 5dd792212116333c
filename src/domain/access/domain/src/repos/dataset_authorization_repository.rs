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

use crate::{DatasetId, IdentityId};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Store of per-identity dataset authorizations, the only state the
/// reconciliation passes mutate. Callers must guarantee single-flight
/// execution: two concurrent passes could observe the same stale state and
/// issue conflicting deltas.
#[async_trait::async_trait]
pub trait DatasetAuthorizationRepository: Send + Sync {
    async fn current_authorizations(
        &self,
        identity_id: IdentityId,
    ) -> Result<HashSet<DatasetId>, GetAuthorizationsError>;

    async fn create_authorization(
        &self,
        identity_id: IdentityId,
        dataset_id: &DatasetId,
    ) -> Result<(), CreateAuthorizationError>;

    async fn delete_authorization(
        &self,
        identity_id: IdentityId,
        dataset_id: &DatasetId,
    ) -> Result<(), DeleteAuthorizationError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetAuthorizationsError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CreateAuthorizationError {
    #[error(transparent)]
    Duplicate(AuthorizationAlreadyExistsError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Identity '{identity_id}' already holds an authorization for dataset '{dataset_id}'")]
pub struct AuthorizationAlreadyExistsError {
    pub identity_id: IdentityId,
    pub dataset_id: DatasetId,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum DeleteAuthorizationError {
    #[error(transparent)]
    NotFound(AuthorizationNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Identity '{identity_id}' holds no authorization for dataset '{dataset_id}'")]
pub struct AuthorizationNotFoundError {
    pub identity_id: IdentityId,
    pub dataset_id: DatasetId,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
