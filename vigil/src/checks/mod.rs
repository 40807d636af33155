pub(crate) mod compare;
pub mod condition;
pub mod context;
pub mod endpoint;
pub mod errors;
pub(crate) mod jsonpath;
pub mod manifest;
pub(crate) mod numeric;
pub(crate) mod pattern;
pub mod placeholder;
pub mod result;
pub mod suite;

use colored::*;
use serde::{Deserialize, Serialize};

pub use crate::checks::condition::{Condition, Operator};
pub use crate::checks::context::Context;
pub use crate::checks::endpoint::{Endpoint, UiConfig};
pub use crate::checks::errors::Error;
pub use crate::checks::manifest::Manifest;
pub use crate::checks::placeholder::Placeholder;
pub use crate::checks::result::{ConditionResult, ProbeResult};
pub use crate::checks::suite::{Suite, SuiteResult};

pub type Result<R> = std::result::Result<R, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    PASS,
    FAIL,
    SKIP,
}

impl Default for Status {
    fn default() -> Self {
        Status::SKIP
    }
}

impl From<bool> for Status {
    fn from(success: bool) -> Self {
        if success {
            Status::PASS
        } else {
            Status::FAIL
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::PASS => f.write_fmt(format_args!("{}", "PASS".green())),
            Status::SKIP => f.write_fmt(format_args!("{}", "SKIP".yellow())),
            Status::FAIL => f.write_fmt(format_args!("{}", "FAIL".red())),
        }
    }
}
