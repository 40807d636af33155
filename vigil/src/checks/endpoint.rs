use chrono::Utc;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::checks::condition::Condition;
use crate::checks::context::Context;
use crate::checks::errors::Error;
use crate::checks::result::ProbeResult;
use crate::checks::Result;

const REDACTED: &str = "<redacted>";

/// Display and redaction settings for the results of one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct UiConfig {
    /// Drop the condition results once the endpoint has been evaluated.
    pub hide_conditions: bool,
    /// Drop the hostname and scrub it from error messages.
    pub hide_hostname: bool,
    pub hide_errors: bool,
    pub dont_resolve_failed_conditions: bool,
    pub resolve_successful_conditions: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Endpoint {
    pub name: String,

    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub ui: UiConfig,

    /// Suite steps only: context key to the placeholder whose value is stored there once
    /// the step has been evaluated.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub store: IndexMap<String, String>,

    /// Suite steps only: run even when an earlier step failed.
    #[serde(default)]
    pub always_run: bool,

    /// What the probe observed. Evaluation starts from a copy of it.
    #[serde(default)]
    pub result: ProbeResult,
}

impl Endpoint {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidConfiguration(
                "endpoint must have a name".to_string(),
            ));
        }
        if self.conditions.is_empty() {
            return Err(Error::InvalidConfiguration(format!(
                "endpoint '{}' must have at least one condition",
                self.name
            )));
        }
        for condition in &self.conditions {
            condition.validate()?;
        }
        Ok(())
    }

    /// Evaluates every condition, in order, against a copy of the recorded probe result.
    ///
    /// The endpoint is healthy when the probe recorded no errors and every condition holds.
    /// Redaction from the UI settings happens last, after the outcome has been decided.
    pub fn evaluate_health(&self, context: Option<&Context>) -> ProbeResult {
        let mut result = ProbeResult {
            condition_results: Vec::with_capacity(self.conditions.len()),
            ..self.result.clone()
        };
        result.success = result.errors.is_empty();
        debug!(
            "Evaluating {} condition(s) for endpoint '{}'",
            self.conditions.len(),
            self.name
        );
        for condition in &self.conditions {
            let success = condition.evaluate(
                &mut result,
                self.ui.dont_resolve_failed_conditions,
                self.ui.resolve_successful_conditions,
                context,
            );
            if !success {
                result.success = false;
            }
        }
        result.timestamp = Some(Utc::now());
        self.redact(&mut result);
        result
    }

    fn redact(&self, result: &mut ProbeResult) {
        if self.ui.hide_hostname && !result.hostname.is_empty() {
            for error in result.errors.iter_mut() {
                *error = error.replace(&result.hostname, REDACTED);
            }
            result.hostname.clear();
        }
        if self.ui.hide_errors {
            result.errors.clear();
        }
        if self.ui.hide_conditions {
            result.condition_results.clear();
        }
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod endpoint_tests;
