use std::io::Write;

use clap::ArgMatches;

use crate::command::Command;
use crate::commands::{
    config_arg, load_manifest, report_errors, verbose_arg, ERROR_STATUS_CODE,
    SUCCESS_STATUS_CODE, VALIDATE,
};
use crate::checks::Result;
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Validate {}

#[allow(clippy::new_without_default)]
impl Validate {
    pub fn new() -> Self {
        Validate {}
    }
}

impl Command for Validate {
    fn name(&self) -> &'static str {
        VALIDATE
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(VALIDATE)
            .about("Checks that a manifest loads and that every condition in it is well formed.")
            .arg(config_arg())
            .arg(verbose_arg())
    }

    fn execute(&self, app: &ArgMatches, writer: &mut Writer, reader: &mut Reader) -> Result<i32> {
        match load_manifest(app, reader) {
            Ok(manifest) => {
                let conditions = manifest
                    .endpoints
                    .iter()
                    .chain(manifest.suites.iter().flat_map(|s| s.endpoints.iter()))
                    .map(|e| e.conditions.len())
                    .sum::<usize>();
                writeln!(
                    writer,
                    "Manifest is valid: {} endpoint(s), {} suite(s), {} condition(s)",
                    manifest.endpoints.len(),
                    manifest.suites.len(),
                    conditions
                )?;
                Ok(SUCCESS_STATUS_CODE)
            }
            Err(e) => {
                report_errors(writer, &e)?;
                Ok(ERROR_STATUS_CODE)
            }
        }
    }
}
