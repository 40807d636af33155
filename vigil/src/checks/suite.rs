//! Multi-step checks. The steps of a suite run in order against one shared [`Context`];
//! values captured from a step's result through its `store` mapping become visible to the
//! conditions of every later step as `[CONTEXT].<key>`.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::checks::context::Context;
use crate::checks::endpoint::Endpoint;
use crate::checks::errors::{Error, Errors};
use crate::checks::placeholder::{resolve_placeholder, INVALID_SUFFIX};
use crate::checks::result::ProbeResult;
use crate::checks::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Suite {
    pub name: String,

    /// Seed values for the shared context.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub context: Map<String, Value>,

    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SuiteResult {
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub endpoint_results: Vec<ProbeResult>,
    /// Final state of the shared context.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub context: Map<String, Value>,
}

impl Suite {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidConfiguration(
                "suite must have a name".to_string(),
            ));
        }
        if self.endpoints.is_empty() {
            return Err(Error::InvalidConfiguration(format!(
                "suite '{}' must have at least one endpoint",
                self.name
            )));
        }
        let mut names = HashSet::with_capacity(self.endpoints.len());
        for endpoint in &self.endpoints {
            if !names.insert(endpoint.name.as_str()) {
                return Err(Error::InvalidConfiguration(format!(
                    "suite '{}' has duplicate endpoint name '{}'",
                    self.name, endpoint.name
                )));
            }
            endpoint.validate().map_err(|e| {
                Error::InvalidConfiguration(format!(
                    "suite '{}', endpoint '{}': {}",
                    self.name, endpoint.name, e
                ))
            })?;
        }
        Ok(())
    }

    /// Runs the steps in order. Once a step fails, the following steps are skipped unless
    /// they are marked `always-run`. Store mappings apply after every step that ran,
    /// whether it passed or not.
    pub fn execute(&self) -> SuiteResult {
        let context = Context::new(&self.context);
        let mut result = SuiteResult {
            name: self.name.clone(),
            success: true,
            timestamp: Some(Utc::now()),
            endpoint_results: Vec::with_capacity(self.endpoints.len()),
            context: Map::new(),
        };
        let mut failed = false;
        for endpoint in &self.endpoints {
            if failed && !endpoint.always_run {
                info!(
                    "Skipping step '{}' of suite '{}' after an earlier failure",
                    endpoint.name, self.name
                );
                continue;
            }
            debug!("Running step '{}' of suite '{}'", endpoint.name, self.name);
            let mut step = endpoint.evaluate_health(Some(&context));
            step.name = endpoint.name.clone();
            if let Err(e) = store_result_values(&context, &endpoint.store, &step) {
                warn!(
                    "Step '{}' of suite '{}' could not store values: {}",
                    endpoint.name, self.name, e
                );
                step.add_error(format!("failed to store values: {}", e));
            }
            if !step.success {
                failed = true;
                result.success = false;
            }
            result.endpoint_results.push(step);
        }
        result.context = context.get_all();
        result
    }
}

/// Resolves each mapped placeholder against `result`, without a context, and writes the
/// typed value under its key. Keys that fail are reported together; the others are still
/// stored.
pub fn store_result_values(
    context: &Context,
    mappings: &IndexMap<String, String>,
    result: &ProbeResult,
) -> Result<IndexMap<String, Value>> {
    let mut stored = IndexMap::with_capacity(mappings.len());
    let mut failures = Vec::new();
    for (key, placeholder) in mappings {
        match extract_value_for_storage(placeholder, result) {
            Ok(value) => {
                context.set(key, value.clone())?;
                stored.insert(key.clone(), value);
            }
            Err(e) => failures.push(Error::IllegalArguments(format!("{}: {}", key, e))),
        }
    }
    if failures.is_empty() {
        Ok(stored)
    } else {
        Err(Error::Errors(Errors(failures)))
    }
}

/// A resolved placeholder as a typed value: integer, then float, then boolean, else the
/// text as is. Resolutions that came back `(INVALID)` are errors.
pub(crate) fn extract_value_for_storage(placeholder: &str, result: &ProbeResult) -> Result<Value> {
    let resolved = resolve_placeholder(placeholder, result, None)?;
    if let Some(path) = resolved
        .strip_suffix(INVALID_SUFFIX)
        .and_then(|rest| rest.strip_suffix(' '))
    {
        return Err(Error::InvalidStorePath(path.to_string()));
    }
    if let Ok(integer) = resolved.parse::<i64>() {
        return Ok(Value::from(integer));
    }
    if let Some(float) = resolved
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
    {
        return Ok(Value::Number(float));
    }
    match resolved.as_str() {
        "t" | "T" | "true" | "TRUE" | "True" => Ok(Value::Bool(true)),
        "f" | "F" | "false" | "FALSE" | "False" => Ok(Value::Bool(false)),
        _ => Ok(Value::String(resolved)),
    }
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod suite_tests;
