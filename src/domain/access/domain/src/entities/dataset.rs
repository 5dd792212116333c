// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::DatasetId;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// An access-controlled data collection. Static reference data for the
/// duration of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub id: DatasetId,
    pub display_name: String,
    pub acl_group: String,
    /// Service accounts tied to a public dataset are permanently exempt
    /// from ACL removal.
    pub is_public: bool,
}
