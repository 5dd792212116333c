// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{DatasetId, ProjectId, ServiceAccountId};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A cloud credential scoped to one dataset within one project. Its ACL
/// membership is mutated by a downstream collaborator using the output of
/// the membership check; the core only decides whether it keeps membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccount {
    pub id: ServiceAccountId,
    pub project_id: ProjectId,
    pub dataset_id: DatasetId,
    pub active: bool,
}
