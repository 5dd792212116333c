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

use crate::LinkedIdentity;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Read-only view over the identity store. The linking flow that mutates
/// these records is a separate system; within one reconciliation pass the
/// results must come from a single consistent snapshot.
#[async_trait::async_trait]
pub trait LinkedIdentityRepository: Send + Sync {
    /// Returns every identity claiming the external login, linked or not,
    /// in ascending creation order.
    async fn find_linked_identities(
        &self,
        external_login: &str,
    ) -> Result<Vec<LinkedIdentity>, FindLinkedIdentitiesError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FindLinkedIdentitiesError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
