// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{Arc, Mutex};

use dill::*;
use kamu_access::{FindLinkedIdentitiesError, LinkedIdentity, LinkedIdentityRepository};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryLinkedIdentityRepository {
    state: Arc<Mutex<State>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Insertion order doubles as creation order, which the repository contract
// requires from `find_linked_identities`
#[derive(Default)]
struct State {
    identities: Vec<LinkedIdentity>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn LinkedIdentityRepository)]
#[scope(Singleton)]
impl InMemoryLinkedIdentityRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

impl InMemoryLinkedIdentityRepository {
    pub fn add_identity(&self, identity: LinkedIdentity) {
        let mut guard = self.state.lock().unwrap();
        guard.identities.push(identity);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl LinkedIdentityRepository for InMemoryLinkedIdentityRepository {
    async fn find_linked_identities(
        &self,
        external_login: &str,
    ) -> Result<Vec<LinkedIdentity>, FindLinkedIdentitiesError> {
        let guard = self.state.lock().unwrap();
        Ok(guard
            .identities
            .iter()
            .filter(|i| i.external_login == external_login)
            .cloned()
            .collect())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
