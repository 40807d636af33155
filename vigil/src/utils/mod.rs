use crate::{command::Command, commands};

pub mod reader;
pub mod writer;

pub fn get_vigil_commands() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(commands::validate::Validate::new()),
        Box::new(commands::evaluate::Evaluate::new()),
    ]
}
