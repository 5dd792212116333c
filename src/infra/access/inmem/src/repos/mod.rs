// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod inmem_dataset_authorization_repository;
mod inmem_linked_identity_repository;
mod inmem_reference_data_repository;

pub use inmem_dataset_authorization_repository::*;
pub use inmem_linked_identity_repository::*;
pub use inmem_reference_data_repository::*;
