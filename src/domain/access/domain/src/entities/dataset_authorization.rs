// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{DatasetId, IdentityId};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Grant of dataset access to one identity. The only state the
/// reconciliation passes mutate: for a correctly linked identity these rows
/// are derivable from the currently valid subset of its whitelist entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetAuthorization {
    pub identity_id: IdentityId,
    pub dataset_id: DatasetId,
}
