// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod dataset;
mod dataset_acl_map;
mod dataset_authorization;
mod ids;
mod linked_identity;
mod project;
mod service_account;
mod whitelist;

pub use dataset::*;
pub use dataset_acl_map::*;
pub use dataset_authorization::*;
pub use ids::*;
pub use linked_identity::*;
pub use project::*;
pub use service_account::*;
pub use whitelist::*;
