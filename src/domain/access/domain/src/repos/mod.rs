// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod dataset_authorization_repository;
mod linked_identity_repository;
mod reference_data_repository;

pub use dataset_authorization_repository::*;
pub use linked_identity_repository::*;
pub use reference_data_repository::*;
