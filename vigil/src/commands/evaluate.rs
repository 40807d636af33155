use std::io::Write;

use clap::{Arg, ArgAction, ArgMatches};
use log::info;
use serde::Serialize;

use crate::checks::manifest::Manifest;
use crate::checks::result::ProbeResult;
use crate::checks::suite::SuiteResult;
use crate::checks::{Result, Status};
use crate::command::Command;
use crate::commands::{
    config_arg, load_manifest, report_errors, verbose_arg, ERROR_STATUS_CODE, EVALUATE,
    FAILURE_STATUS_CODE, PRINT_JSON, PRINT_YAML, SUCCESS_STATUS_CODE,
};
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Evaluate {}

#[allow(clippy::new_without_default)]
impl Evaluate {
    pub fn new() -> Self {
        Evaluate {}
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct EvaluationReport {
    success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    endpoints: Vec<ProbeResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suites: Vec<SuiteResult>,
}

impl EvaluationReport {
    pub(crate) fn from_manifest(manifest: &Manifest) -> Self {
        let endpoints = manifest
            .endpoints
            .iter()
            .map(|endpoint| {
                let mut result = endpoint.evaluate_health(None);
                result.name = endpoint.name.clone();
                result
            })
            .collect::<Vec<ProbeResult>>();
        let suites = manifest
            .suites
            .iter()
            .map(|suite| suite.execute())
            .collect::<Vec<SuiteResult>>();
        let success =
            endpoints.iter().all(|r| r.success) && suites.iter().all(|r| r.success);
        EvaluationReport {
            success,
            endpoints,
            suites,
        }
    }
}

impl Command for Evaluate {
    fn name(&self) -> &'static str {
        EVALUATE
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(EVALUATE)
            .about("Evaluates the conditions of every endpoint and suite against their recorded probe results.")
            .arg(config_arg())
            .arg(
                Arg::new(PRINT_JSON.0)
                    .long(PRINT_JSON.0)
                    .short(PRINT_JSON.1)
                    .action(ArgAction::SetTrue)
                    .conflicts_with(PRINT_YAML.0)
                    .help("Print the results in JSON format"),
            )
            .arg(
                Arg::new(PRINT_YAML.0)
                    .long(PRINT_YAML.0)
                    .short(PRINT_YAML.1)
                    .action(ArgAction::SetTrue)
                    .help("Print the results in YAML format"),
            )
            .arg(verbose_arg())
    }

    fn execute(&self, app: &ArgMatches, writer: &mut Writer, reader: &mut Reader) -> Result<i32> {
        let manifest = match load_manifest(app, reader) {
            Ok(manifest) => manifest,
            Err(e) => {
                report_errors(writer, &e)?;
                return Ok(ERROR_STATUS_CODE);
            }
        };

        let report = EvaluationReport::from_manifest(&manifest);
        info!(
            "Evaluated {} endpoint(s) and {} suite(s), success = {}",
            report.endpoints.len(),
            report.suites.len(),
            report.success
        );

        if app.get_flag(PRINT_JSON.0) {
            serde_json::to_writer_pretty(&mut *writer, &report)?;
            writeln!(writer)?;
        } else if app.get_flag(PRINT_YAML.0) {
            serde_yaml::to_writer(&mut *writer, &report)?;
        } else {
            print_report(writer, &manifest, &report)?;
        }

        Ok(if report.success {
            SUCCESS_STATUS_CODE
        } else {
            FAILURE_STATUS_CODE
        })
    }
}

fn print_result(writer: &mut dyn Write, result: &ProbeResult, indent: &str) -> Result<()> {
    for condition in &result.condition_results {
        writeln!(
            writer,
            "{}{} {}",
            indent,
            Status::from(condition.success),
            condition.condition
        )?;
    }
    for error in &result.errors {
        writeln!(writer, "{}Error: {}", indent, error)?;
    }
    Ok(())
}

pub(crate) fn print_report(
    writer: &mut dyn Write,
    manifest: &Manifest,
    report: &EvaluationReport,
) -> Result<()> {
    for result in &report.endpoints {
        writeln!(writer, "Endpoint {} Status = {}", result.name, Status::from(result.success))?;
        print_result(writer, result, "  ")?;
    }

    for (suite, result) in manifest.suites.iter().zip(report.suites.iter()) {
        writeln!(writer, "Suite {} Status = {}", result.name, Status::from(result.success))?;
        for step in &suite.endpoints {
            match result.endpoint_results.iter().find(|r| r.name == step.name) {
                Some(outcome) => {
                    writeln!(
                        writer,
                        "  Step {} Status = {}",
                        step.name,
                        Status::from(outcome.success)
                    )?;
                    print_result(writer, outcome, "    ")?;
                }
                None => writeln!(writer, "  Step {} Status = {}", step.name, Status::SKIP)?,
            }
        }
    }

    writeln!(writer, "Overall Status = {}", Status::from(report.success))?;
    Ok(())
}
