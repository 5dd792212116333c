// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{TimeZone, Utc};
use kamu_access::{IdentityId, LinkedIdentity, LoginResolution};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn identity(id: u64, linked: bool) -> LinkedIdentity {
    LinkedIdentity {
        id: IdentityId::new(id),
        external_login: "USERNAME1".to_string(),
        linked,
        dataset_access_eligible: true,
        created_at: Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::seconds(i64::try_from(id).unwrap()),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_no_claimants_is_unlinked() {
    assert_eq!(LoginResolution::resolve([]), LoginResolution::Unlinked);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_unlinked_claimants_are_ignored() {
    assert_eq!(
        LoginResolution::resolve([identity(1, false), identity(2, false)]),
        LoginResolution::Unlinked
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_single_linked_claimant_wins() {
    assert_eq!(
        LoginResolution::resolve([identity(1, false), identity(2, true)]),
        LoginResolution::Linked(identity(2, true))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_multiple_linked_claimants_conflict_in_creation_order() {
    assert_eq!(
        LoginResolution::resolve([identity(1, false), identity(2, true), identity(3, true)]),
        LoginResolution::Conflict(vec![identity(2, true), identity(3, true)])
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
