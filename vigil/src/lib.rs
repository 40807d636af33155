// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod checks;
pub mod command;
pub mod commands;
pub mod utils;

pub use crate::checks::{
    Condition, Context, Endpoint, Error, Manifest, ProbeResult, Result, Suite, SuiteResult,
};
