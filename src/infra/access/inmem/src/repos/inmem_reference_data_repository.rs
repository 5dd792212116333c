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
    Dataset,
    DatasetId,
    DatasetNotFoundError,
    GetDatasetError,
    GetProjectMembersError,
    IdentityId,
    ListServiceAccountsError,
    Project,
    ProjectId,
    ReferenceDataRepository,
    ServiceAccount,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryReferenceDataRepository {
    state: Arc<Mutex<State>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    datasets: HashMap<DatasetId, Dataset>,
    projects: HashMap<ProjectId, Project>,
    // Declaration order is preserved so `active_service_accounts` is stable
    service_accounts: Vec<ServiceAccount>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn ReferenceDataRepository)]
#[scope(Singleton)]
impl InMemoryReferenceDataRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

impl InMemoryReferenceDataRepository {
    pub fn add_dataset(&self, dataset: Dataset) {
        let mut guard = self.state.lock().unwrap();
        guard.datasets.insert(dataset.id.clone(), dataset);
    }

    pub fn add_project(&self, project: Project) {
        let mut guard = self.state.lock().unwrap();
        guard.projects.insert(project.id.clone(), project);
    }

    pub fn add_service_account(&self, account: ServiceAccount) {
        let mut guard = self.state.lock().unwrap();
        guard.service_accounts.push(account);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ReferenceDataRepository for InMemoryReferenceDataRepository {
    async fn dataset_info(&self, dataset_id: &DatasetId) -> Result<Dataset, GetDatasetError> {
        let guard = self.state.lock().unwrap();
        if let Some(dataset) = guard.datasets.get(dataset_id) {
            Ok(dataset.clone())
        } else {
            Err(GetDatasetError::NotFound(DatasetNotFoundError {
                dataset_id: dataset_id.clone(),
            }))
        }
    }

    async fn active_service_accounts(
        &self,
    ) -> Result<Vec<ServiceAccount>, ListServiceAccountsError> {
        let guard = self.state.lock().unwrap();
        Ok(guard
            .service_accounts
            .iter()
            .filter(|sa| sa.active)
            .cloned()
            .collect())
    }

    async fn project_members(
        &self,
        project_id: &ProjectId,
    ) -> Result<HashSet<IdentityId>, GetProjectMembersError> {
        let guard = self.state.lock().unwrap();
        Ok(guard
            .projects
            .get(project_id)
            .map(|p| p.member_identity_ids.clone())
            .unwrap_or_default())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
