// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::DatasetId;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Configuration source for [`DatasetAclMap`]: accession → ACL metadata.
/// Loaded from external configuration once per reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DatasetAclConfig(pub BTreeMap<String, DatasetAclEntry>);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetAclEntry {
    pub display_name: String,
    pub parent_study: String,
    pub acl_group: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Immutable mapping from dataset accession to its access-control group and
/// study metadata.
#[derive(Debug, Clone)]
pub struct DatasetAclMap {
    entries: BTreeMap<DatasetId, DatasetAclEntry>,
}

impl DatasetAclMap {
    pub fn new(config: DatasetAclConfig) -> Self {
        Self {
            entries: config
                .0
                .into_iter()
                .map(|(accession, entry)| (DatasetId::new_unchecked(accession), entry))
                .collect(),
        }
    }

    pub fn lookup(&self, dataset_id: &DatasetId) -> Result<&DatasetAclEntry, UnknownDatasetError> {
        self.entries
            .get(dataset_id)
            .ok_or_else(|| UnknownDatasetError {
                dataset_id: dataset_id.clone(),
            })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Dataset '{dataset_id}' has no ACL mapping")]
pub struct UnknownDatasetError {
    pub dataset_id: DatasetId,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
