use std::collections::HashSet;
use std::io::Read;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::checks::endpoint::Endpoint;
use crate::checks::errors::{Error, Errors};
use crate::checks::suite::Suite;
use crate::checks::Result;

/// Everything one run evaluates: standalone endpoints and multi-step suites, each carrying
/// the probe results recorded for it. Accepts YAML or JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub suites: Vec<Suite>,
}

impl Manifest {
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Manifest> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        content.parse()
    }

    /// Checks every endpoint and suite, reporting all problems at once rather than the first.
    pub fn validate(&self) -> Result<()> {
        if self.endpoints.is_empty() && self.suites.is_empty() {
            return Err(Error::InvalidConfiguration(
                "manifest must define at least one endpoint or suite".to_string(),
            ));
        }
        let mut errors = Vec::new();
        let mut endpoint_names = HashSet::new();
        for endpoint in &self.endpoints {
            if !endpoint_names.insert(endpoint.name.as_str()) {
                errors.push(Error::InvalidConfiguration(format!(
                    "duplicate endpoint name '{}'",
                    endpoint.name
                )));
            }
            if let Err(e) = endpoint.validate() {
                errors.push(e);
            }
        }
        let mut suite_names = HashSet::new();
        for suite in &self.suites {
            if !suite_names.insert(suite.name.as_str()) {
                errors.push(Error::InvalidConfiguration(format!(
                    "duplicate suite name '{}'",
                    suite.name
                )));
            }
            if let Err(e) = suite.validate() {
                errors.push(e);
            }
        }
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(Error::Errors(Errors(errors))),
        }
    }
}

impl FromStr for Manifest {
    type Err = Error;

    fn from_str(content: &str) -> Result<Manifest> {
        let manifest: Manifest = serde_yaml::from_str(content)?;
        debug!(
            "Loaded manifest with {} endpoint(s) and {} suite(s)",
            manifest.endpoints.len(),
            manifest.suites.len()
        );
        manifest.validate()?;
        Ok(manifest)
    }
}
