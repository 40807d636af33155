use clap::ArgMatches;
use std::collections::HashMap;
mod checks;
mod command;
mod commands;
mod utils;

use crate::commands::VERBOSE;
use crate::utils::reader::{ReadBuffer, Reader};
use crate::utils::writer::WriteBuffer::Stderr;
use crate::utils::writer::{WriteBuffer::Stdout, Writer};
use checks::errors::Error;
use command::Command;
use commands::{APP_NAME, APP_VERSION, ERROR_STATUS_CODE};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::process::exit;

fn init_logging(args: &ArgMatches) {
    let level = match args.get_count(VERBOSE.0) {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Unable to initialise logging: {e}");
    }
}

fn main() -> Result<(), Error> {
    let mut app = clap::Command::new(APP_NAME)
        .version(APP_VERSION)
        .about(
            r#"
  Vigil evaluates health-check conditions such as "[STATUS] == 200" or
  "len([BODY].items) > 0" against recorded probe results. Conditions can use
  placeholders for the probe's status, response time, DNS code, certificate and
  domain expiration and JSON body, the len(), has(), pat() and any() functions,
  and values captured by earlier steps of a suite through [CONTEXT]."#,
        )
        .arg_required_else_help(true);

    let commands: Vec<Box<dyn Command>> = utils::get_vigil_commands();

    let mappings = commands.iter().map(|s| (s.name(), s)).fold(
        HashMap::with_capacity(commands.len()),
        |mut map, entry| {
            map.insert(entry.0, entry.1.as_ref());
            map
        },
    );

    for each in &commands {
        app = app.subcommand(each.command());
    }

    let help = app.render_usage();
    let app = app.get_matches();

    match app.subcommand() {
        Some((name, value)) => {
            if let Some(command) = mappings.get(name) {
                init_logging(value);
                let mut output_writer =
                    Writer::new(Stdout(std::io::stdout()), Stderr(std::io::stderr()));

                match (*command).execute(
                    value,
                    &mut output_writer,
                    &mut Reader::new(ReadBuffer::Stdin(std::io::stdin())),
                ) {
                    Err(e) => {
                        output_writer.write_err(format!("Error occurred {e}"))?;
                        exit(ERROR_STATUS_CODE);
                    }
                    Ok(code) => exit(code),
                }
            } else {
                println!("{}", help);
            }
        }
        None => {
            println!("{}", help);
        }
    }

    Ok(())
}
