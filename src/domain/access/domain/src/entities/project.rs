// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashSet;

use crate::{IdentityId, ProjectId};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A cloud project that may hold service accounts. Read-only to the
/// reconciliation core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub member_identity_ids: HashSet<IdentityId>,
}
