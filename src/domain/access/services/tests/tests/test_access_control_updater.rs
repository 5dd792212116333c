// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{BTreeSet, HashSet};

use kamu_access::*;

use crate::tests::harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_no_linked_identity_skips_login() {
    let harness = ReconciliationHarness::new();
    harness.identity_repo().add_identity(identity(1, "USERNAME1", false));

    let whitelist = parse_feed(&format!("{FEED_HEADER}\n{FEED_ROW_USERNAME1}\n"));
    let report = harness.updater().process(&whitelist).await.unwrap();

    pretty_assertions::assert_eq!(
        report.skipped_logins,
        BTreeSet::from(["USERNAME1".to_string()])
    );
    assert!(report.update_results.is_empty());
    assert!(report.duplicate_linked_identities.is_empty());
    assert!(report.service_account_remove_set.is_empty());

    // The group was left untouched
    assert!(harness.authorizations_of(IdentityId::new(1)).await.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_one_linked_identity_gets_authorization() {
    let harness = ReconciliationHarness::new();
    harness.identity_repo().add_identity(identity(1, "USERNAME1", false));
    harness.identity_repo().add_identity(identity(2, "USERNAME1", true));

    let whitelist = parse_feed(&format!("{FEED_HEADER}\n{FEED_ROW_USERNAME1}\n"));
    let report = harness.updater().process(&whitelist).await.unwrap();

    assert!(report.skipped_logins.is_empty());
    pretty_assertions::assert_eq!(
        report.update_results,
        [IdentityUpdateResult {
            identity_id: IdentityId::new(2),
            added: BTreeSet::from([DatasetId::new_unchecked("phs000123")]),
            revoked: BTreeSet::new(),
        }]
    );
    assert!(report.service_account_remove_set.is_empty());

    pretty_assertions::assert_eq!(
        harness.authorizations_of(IdentityId::new(2)).await,
        HashSet::from([DatasetId::new_unchecked("phs000123")])
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_multiple_linked_identities_are_quarantined() {
    let harness = ReconciliationHarness::new();
    harness.identity_repo().add_identity(identity(1, "USERNAME1", false));
    harness.identity_repo().add_identity(identity(2, "USERNAME1", true));
    harness.identity_repo().add_identity(identity(3, "USERNAME1", true));

    let whitelist = parse_feed(&format!("{FEED_HEADER}\n{FEED_ROW_USERNAME1}\n"));
    let report = harness.updater().process(&whitelist).await.unwrap();

    // The login is skipped exactly once, and every linked claimant is
    // reported in creation order
    pretty_assertions::assert_eq!(
        report.skipped_logins,
        BTreeSet::from(["USERNAME1".to_string()])
    );
    pretty_assertions::assert_eq!(
        report.duplicate_linked_identities,
        [
            ("USERNAME1".to_string(), IdentityId::new(2)),
            ("USERNAME1".to_string(), IdentityId::new(3)),
        ]
    );
    assert!(report.update_results.is_empty());

    // Ambiguous authority: no mutations for either claimant
    assert!(harness.authorizations_of(IdentityId::new(2)).await.is_empty());
    assert!(harness.authorizations_of(IdentityId::new(3)).await.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_expired_entry_is_not_granted_but_still_audited() {
    let harness = ReconciliationHarness::new();
    harness.identity_repo().add_identity(identity(1, "USERNAME1", true));

    let expired_row = FEED_ROW_USERNAME1.replace("2017-06-11 00:00:00.000", "2015-01-01 00:00:00.000");
    let whitelist = parse_feed(&format!("{FEED_HEADER}\n{expired_row}\n"));
    let report = harness.updater().process(&whitelist).await.unwrap();

    // A resolved identity always produces an update result, even a no-op one
    pretty_assertions::assert_eq!(
        report.update_results,
        [IdentityUpdateResult {
            identity_id: IdentityId::new(1),
            added: BTreeSet::new(),
            revoked: BTreeSet::new(),
        }]
    );
    assert!(harness.authorizations_of(IdentityId::new(1)).await.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_lapsed_authorization_is_revoked() {
    let harness = ReconciliationHarness::new();
    harness.identity_repo().add_identity(identity(1, "USERNAME1", true));
    harness.grant(IdentityId::new(1), "phs000456").await;

    // The feed now lists only an expired entry for a different dataset than
    // the one stored, so everything stored must be revoked
    let expired_row = FEED_ROW_USERNAME1
        .replace("phs000123.v1.p1.c1", "phs000456.v1.p1.c1")
        .replace("2017-06-11 00:00:00.000", "2015-01-01 00:00:00.000");
    let whitelist = parse_feed(&format!("{FEED_HEADER}\n{expired_row}\n"));
    let report = harness.updater().process(&whitelist).await.unwrap();

    pretty_assertions::assert_eq!(
        report.update_results,
        [IdentityUpdateResult {
            identity_id: IdentityId::new(1),
            added: BTreeSet::new(),
            revoked: BTreeSet::from([DatasetId::new_unchecked("phs000456")]),
        }]
    );
    assert!(harness.authorizations_of(IdentityId::new(1)).await.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_reconciliation_is_idempotent() {
    let harness = ReconciliationHarness::new();
    harness.identity_repo().add_identity(identity(1, "USERNAME1", true));
    harness.grant(IdentityId::new(1), "phs000456").await;

    let whitelist = parse_feed(&format!("{FEED_HEADER}\n{FEED_ROW_USERNAME1}\n"));

    let first = harness.updater().process(&whitelist).await.unwrap();
    pretty_assertions::assert_eq!(
        first.update_results,
        [IdentityUpdateResult {
            identity_id: IdentityId::new(1),
            added: BTreeSet::from([DatasetId::new_unchecked("phs000123")]),
            revoked: BTreeSet::from([DatasetId::new_unchecked("phs000456")]),
        }]
    );

    // Unchanged feed, unchanged store: the second run must be a pure no-op
    let second = harness.updater().process(&whitelist).await.unwrap();
    pretty_assertions::assert_eq!(
        second.update_results,
        [IdentityUpdateResult {
            identity_id: IdentityId::new(1),
            added: BTreeSet::new(),
            revoked: BTreeSet::new(),
        }]
    );
    pretty_assertions::assert_eq!(
        second.service_account_remove_set,
        first.service_account_remove_set
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_removal_exposure_uses_freshly_updated_state() {
    let harness = ReconciliationHarness::new();
    harness.identity_repo().add_identity(identity(1, "USERNAME1", true));

    let reference = harness.reference_repo();
    reference.add_dataset(dataset("phs000123", true));
    reference.add_dataset(dataset("phs000456", false));
    reference.add_project(project("project_123", &[1]));
    reference.add_service_account(service_account("abc_123", "project_123", "phs000123"));
    reference.add_service_account(service_account("account_456", "project_123", "phs000456"));

    // The feed authorizes phs000123 only; nobody in the project is left
    // holding phs000456, so its account surfaces in the remove set
    let whitelist = parse_feed(&format!("{FEED_HEADER}\n{FEED_ROW_USERNAME1}\n"));
    let report = harness.updater().process(&whitelist).await.unwrap();

    pretty_assertions::assert_eq!(
        report.service_account_remove_set,
        BTreeSet::from([ServiceAccountId::new("account_456")])
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_independent_logins_are_reconciled_independently() {
    let harness = ReconciliationHarness::new();
    harness.identity_repo().add_identity(identity(1, "USERNAME1", true));
    harness.identity_repo().add_identity(identity(2, "USERNAME2", true));
    harness.identity_repo().add_identity(identity(3, "USERNAME2", true));

    let row_2 = FEED_ROW_USERNAME1.replace("USERNAME1", "USERNAME2");
    let whitelist = parse_feed(&format!("{FEED_HEADER}\n{FEED_ROW_USERNAME1}\n{row_2}\n"));
    let report = harness.updater().process(&whitelist).await.unwrap();

    // USERNAME2 conflicts, but USERNAME1 is still applied
    pretty_assertions::assert_eq!(
        report.skipped_logins,
        BTreeSet::from(["USERNAME2".to_string()])
    );
    pretty_assertions::assert_eq!(
        report.update_results,
        [IdentityUpdateResult {
            identity_id: IdentityId::new(1),
            added: BTreeSet::from([DatasetId::new_unchecked("phs000123")]),
            revoked: BTreeSet::new(),
        }]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
