// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dill::{component, interface};
use internal_error::ResultIntoInternal;
use kamu_access::{
    AccessControlUpdater,
    AccessUpdateError,
    AccessUpdateReport,
    DatasetAuthorizationRepository,
    DatasetId,
    IdentityUpdateResult,
    LinkedIdentity,
    LinkedIdentityRepository,
    LoginResolution,
    MembershipCheckError,
    ProjectMembershipChecker,
    Whitelist,
    WhitelistEntry,
};
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct AccessControlUpdaterImpl {
    identity_repo: Arc<dyn LinkedIdentityRepository>,
    authorization_repo: Arc<dyn DatasetAuthorizationRepository>,
    membership_checker: Arc<dyn ProjectMembershipChecker>,
    time_source: Arc<dyn SystemTimeSource>,
}

#[component(pub)]
#[interface(dyn AccessControlUpdater)]
impl AccessControlUpdaterImpl {
    pub fn new(
        identity_repo: Arc<dyn LinkedIdentityRepository>,
        authorization_repo: Arc<dyn DatasetAuthorizationRepository>,
        membership_checker: Arc<dyn ProjectMembershipChecker>,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> Self {
        Self {
            identity_repo,
            authorization_repo,
            membership_checker,
            time_source,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl AccessControlUpdaterImpl {
    /// Diffs the currently valid subset of one identity's feed entries
    /// against its stored authorizations and applies the delta. Creates and
    /// deletes for one identity form a single unit of application.
    async fn reconcile_identity(
        &self,
        identity: &LinkedIdentity,
        entries: &[&WhitelistEntry],
        now: DateTime<Utc>,
    ) -> Result<IdentityUpdateResult, AccessUpdateError> {
        let desired: BTreeSet<DatasetId> = entries
            .iter()
            .filter(|e| e.is_currently_valid(now))
            .map(|e| e.dataset_id.clone())
            .collect();

        let current: HashSet<DatasetId> = self
            .authorization_repo
            .current_authorizations(identity.id)
            .await
            .int_err()?;

        let added: BTreeSet<DatasetId> = desired
            .iter()
            .filter(|d| !current.contains(*d))
            .cloned()
            .collect();
        let revoked: BTreeSet<DatasetId> = current
            .iter()
            .filter(|d| !desired.contains(*d))
            .cloned()
            .collect();

        for dataset_id in &added {
            self.authorization_repo
                .create_authorization(identity.id, dataset_id)
                .await
                .int_err()?;
        }
        for dataset_id in &revoked {
            self.authorization_repo
                .delete_authorization(identity.id, dataset_id)
                .await
                .int_err()?;
        }

        tracing::debug!(
            identity_id = %identity.id,
            added = added.len(),
            revoked = revoked.len(),
            "Reconciled identity authorizations",
        );

        Ok(IdentityUpdateResult {
            identity_id: identity.id,
            added,
            revoked,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl AccessControlUpdater for AccessControlUpdaterImpl {
    #[tracing::instrument(level = "info", skip_all)]
    async fn process(
        &self,
        whitelist: &Whitelist,
    ) -> Result<AccessUpdateReport, AccessUpdateError> {
        let now = self.time_source.now();
        let mut report = AccessUpdateReport::default();

        for (login, entries) in whitelist.entries_by_login() {
            let claimants = self
                .identity_repo
                .find_linked_identities(login)
                .await
                .int_err()?;

            match LoginResolution::resolve(claimants) {
                LoginResolution::Unlinked => {
                    report.skipped_logins.insert(login.to_string());
                }
                LoginResolution::Conflict(identities) => {
                    tracing::warn!(
                        external_login = login,
                        count = identities.len(),
                        "Multiple linked identities claim one login, leaving group untouched",
                    );
                    report.skipped_logins.insert(login.to_string());
                    for identity in identities {
                        report
                            .duplicate_linked_identities
                            .push((login.to_string(), identity.id));
                    }
                }
                LoginResolution::Linked(identity) => {
                    let result = self.reconcile_identity(&identity, &entries, now).await?;
                    report.update_results.push(result);
                }
            }
        }

        // Removal exposure is recomputed against the state this pass just
        // produced, not the state it started from
        let membership = match self.membership_checker.process().await {
            Ok(m) => m,
            Err(MembershipCheckError::Internal(e)) => return Err(e.into()),
        };
        report.service_account_remove_set = membership
            .acl_remove_list
            .into_iter()
            .map(|entry| entry.account_id)
            .collect();

        tracing::info!(
            updated_identities = report.update_results.len(),
            skipped_logins = report.skipped_logins.len(),
            removal_candidates = report.service_account_remove_set.len(),
            "Access control update pass complete",
        );

        Ok(report)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
