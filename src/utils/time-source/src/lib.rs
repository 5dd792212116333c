// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Mutex;

use chrono::{DateTime, SubsecRound, Utc};
use dill::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Abstracts the system time source
pub trait SystemTimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SystemTimeSourceDefault;

#[component(pub)]
#[interface(dyn SystemTimeSource)]
impl SystemTimeSourceDefault {
    pub fn new() -> Self {
        Self
    }
}

impl SystemTimeSource for SystemTimeSourceDefault {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().round_subsecs(6)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Time source that always returns the instant it was pinned to. Pin a new
/// value with [`SystemTimeSourceStub::set`] to advance it mid-test.
pub struct SystemTimeSourceStub {
    t: Mutex<Option<DateTime<Utc>>>,
}

#[component(pub)]
#[interface(dyn SystemTimeSource)]
#[scope(Singleton)]
impl SystemTimeSourceStub {
    pub fn new() -> Self {
        Self {
            t: Mutex::new(None),
        }
    }

    pub fn new_set(t: DateTime<Utc>) -> Self {
        Self {
            t: Mutex::new(Some(t)),
        }
    }

    pub fn set(&self, t: DateTime<Utc>) {
        *self.t.lock().unwrap() = Some(t);
    }

    pub fn unset(&self) {
        *self.t.lock().unwrap() = None;
    }
}

impl SystemTimeSource for SystemTimeSourceStub {
    fn now(&self) -> DateTime<Utc> {
        match *self.t.lock().unwrap() {
            None => Utc::now().round_subsecs(6),
            Some(t) => t,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
