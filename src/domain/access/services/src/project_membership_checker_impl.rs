// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use dill::{component, interface};
use internal_error::ResultIntoInternal;
use kamu_access::{
    AclRemovalEntry,
    DatasetAclMap,
    DatasetAuthorizationRepository,
    GetDatasetError,
    MembershipCheckError,
    MembershipCheckReport,
    ProjectMembershipChecker,
    ReferenceDataRepository,
    ServiceAccount,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ProjectMembershipCheckerImpl {
    reference_repo: Arc<dyn ReferenceDataRepository>,
    authorization_repo: Arc<dyn DatasetAuthorizationRepository>,
    dataset_acl_map: Arc<DatasetAclMap>,
}

#[component(pub)]
#[interface(dyn ProjectMembershipChecker)]
impl ProjectMembershipCheckerImpl {
    pub fn new(
        reference_repo: Arc<dyn ReferenceDataRepository>,
        authorization_repo: Arc<dyn DatasetAuthorizationRepository>,
        dataset_acl_map: Arc<DatasetAclMap>,
    ) -> Self {
        Self {
            reference_repo,
            authorization_repo,
            dataset_acl_map,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl ProjectMembershipCheckerImpl {
    async fn has_authorized_member(
        &self,
        account: &ServiceAccount,
    ) -> Result<bool, MembershipCheckError> {
        let members = self
            .reference_repo
            .project_members(&account.project_id)
            .await
            .int_err()?;

        for member in members {
            let authorizations = self
                .authorization_repo
                .current_authorizations(member)
                .await
                .int_err()?;
            if authorizations.contains(&account.dataset_id) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ProjectMembershipChecker for ProjectMembershipCheckerImpl {
    #[tracing::instrument(level = "info", skip_all)]
    async fn process(&self) -> Result<MembershipCheckReport, MembershipCheckError> {
        let mut report = MembershipCheckReport::default();

        for account in self
            .reference_repo
            .active_service_accounts()
            .await
            .int_err()?
        {
            let dataset = match self.reference_repo.dataset_info(&account.dataset_id).await {
                Ok(dataset) => dataset,
                Err(GetDatasetError::NotFound(e)) => {
                    tracing::warn!(
                        account_id = %account.id,
                        dataset_id = %e.dataset_id,
                        "Service account references a dataset missing from reference data, skipping",
                    );
                    report.unknown_datasets.push(e.dataset_id);
                    continue;
                }
                Err(GetDatasetError::Internal(e)) => return Err(e.into()),
            };

            if dataset.is_public {
                report.skipped_service_accounts.push(account.id.clone());
                continue;
            }

            if self.has_authorized_member(&account).await? {
                continue;
            }

            // Without an ACL group the entry cannot be acted on; exclude it
            // rather than mutate blindly
            match self.dataset_acl_map.lookup(&account.dataset_id) {
                Ok(acl) => {
                    report
                        .acl_remove_list
                        .push(AclRemovalEntry::from_account(&account, acl.acl_group.as_str()));
                }
                Err(e) => {
                    tracing::warn!(
                        account_id = %account.id,
                        dataset_id = %e.dataset_id,
                        "No ACL mapping for dataset, excluding removal entry",
                    );
                    report.unknown_datasets.push(e.dataset_id);
                }
            }
        }

        tracing::info!(
            skipped = report.skipped_service_accounts.len(),
            removals = report.acl_remove_list.len(),
            "Project membership check complete",
        );

        Ok(report)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
