pub mod evaluate;
pub mod validate;

use std::fs::File;
use std::io::BufReader;

use clap::{Arg, ArgAction, ArgMatches};

use crate::checks::errors::Error;
use crate::checks::manifest::Manifest;
use crate::checks::Result;
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

//
// Constants
//
// Application metadata
pub const APP_NAME: &str = "vigil";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
// Commands
pub const EVALUATE: &str = "evaluate";
pub const VALIDATE: &str = "validate";
// Arguments for validate, evaluate
pub const CONFIG: (&str, char) = ("config", 'c');
pub const VERBOSE: (&str, char) = ("verbose", 'v');
// Arguments for evaluate
pub const PRINT_JSON: (&str, char) = ("print-json", 'p');
pub const PRINT_YAML: (&str, char) = ("print-yaml", 'y');

pub const FAILURE_STATUS_CODE: i32 = 19;
pub const SUCCESS_STATUS_CODE: i32 = 0;
pub const ERROR_STATUS_CODE: i32 = 5;

pub(crate) fn config_arg() -> Arg {
    Arg::new(CONFIG.0)
        .long(CONFIG.0)
        .short(CONFIG.1)
        .help("Manifest of endpoints and suites to check, YAML or JSON. Read from stdin when omitted")
        .action(ArgAction::Set)
        .required(false)
}

pub(crate) fn verbose_arg() -> Arg {
    Arg::new(VERBOSE.0)
        .long(VERBOSE.0)
        .short(VERBOSE.1)
        .action(ArgAction::Count)
        .help("Log more; repeat for debug (-vv) and trace (-vvv) output")
}

/// Loads the manifest named by `--config`, falling back to `reader`.
pub(crate) fn load_manifest(args: &ArgMatches, reader: &mut Reader) -> Result<Manifest> {
    match args.get_one::<String>(CONFIG.0) {
        Some(file) => Manifest::from_reader(BufReader::new(File::open(file)?)),
        None => Manifest::from_reader(reader),
    }
}

/// One line per problem, so a manifest with several mistakes reports all of them.
pub(crate) fn report_errors(writer: &mut Writer, error: &Error) -> Result<()> {
    match error {
        Error::Errors(errors) => {
            for each in &errors.0 {
                writer.write_err(format!("Error: {}", each))?;
            }
        }
        other => writer.write_err(format!("Error: {}", other))?,
    }
    Ok(())
}
