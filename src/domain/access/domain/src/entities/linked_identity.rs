// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};

use crate::IdentityId;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// An internal account claiming ownership of one external research-access
/// login. `linked` is set only after the out-of-scope verification flow
/// succeeds; at most one identity may be linked per login at any instant,
/// and violations of that rule are quarantined by the reconciliation pass
/// rather than resolved by guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedIdentity {
    pub id: IdentityId,
    pub external_login: String,
    pub linked: bool,
    /// Upstream dataset-authorization eligibility flag. Read-only to the
    /// reconciliation core; carried for audit consumers.
    pub dataset_access_eligible: bool,
    pub created_at: DateTime<Utc>,
}
