// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use dill::*;
use kamu_access::{
    AuthorizationAlreadyExistsError,
    AuthorizationNotFoundError,
    CreateAuthorizationError,
    DatasetAuthorizationRepository,
    DatasetId,
    DeleteAuthorizationError,
    GetAuthorizationsError,
    IdentityId,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryDatasetAuthorizationRepository {
    state: Arc<Mutex<State>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    authorizations: HashMap<IdentityId, HashSet<DatasetId>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn DatasetAuthorizationRepository)]
#[scope(Singleton)]
impl InMemoryDatasetAuthorizationRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl DatasetAuthorizationRepository for InMemoryDatasetAuthorizationRepository {
    async fn current_authorizations(
        &self,
        identity_id: IdentityId,
    ) -> Result<HashSet<DatasetId>, GetAuthorizationsError> {
        let guard = self.state.lock().unwrap();
        Ok(guard
            .authorizations
            .get(&identity_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_authorization(
        &self,
        identity_id: IdentityId,
        dataset_id: &DatasetId,
    ) -> Result<(), CreateAuthorizationError> {
        let mut guard = self.state.lock().unwrap();
        let granted = guard.authorizations.entry(identity_id).or_default();
        if !granted.insert(dataset_id.clone()) {
            return Err(CreateAuthorizationError::Duplicate(
                AuthorizationAlreadyExistsError {
                    identity_id,
                    dataset_id: dataset_id.clone(),
                },
            ));
        }
        Ok(())
    }

    async fn delete_authorization(
        &self,
        identity_id: IdentityId,
        dataset_id: &DatasetId,
    ) -> Result<(), DeleteAuthorizationError> {
        let mut guard = self.state.lock().unwrap();
        let removed = guard
            .authorizations
            .get_mut(&identity_id)
            .is_some_and(|granted| granted.remove(dataset_id));
        if !removed {
            return Err(DeleteAuthorizationError::NotFound(
                AuthorizationNotFoundError {
                    identity_id,
                    dataset_id: dataset_id.clone(),
                },
            ));
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
