use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::checks::compare::{is_equal, LeafFunction};
use crate::checks::context::Context;
use crate::checks::errors::Error;
use crate::checks::numeric::{format_duration, parse_duration_millis, to_number};
use crate::checks::placeholder::{resolve_placeholder, Placeholder, INVALID_SUFFIX};
use crate::checks::result::{ConditionResult, ProbeResult};
use crate::checks::Result;

/// Longest operand shown next to a `pat(...)` before it gets cut in the display string.
/// Display only; matching always sees the full value.
const MAX_DISPLAY_LENGTH_AGAINST_PATTERN: usize = 25;
const TRUNCATED_SUFFIX: &str = "...(truncated)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Le,
    Ge,
    Gt,
    Lt,
}

impl Operator {
    /// Scan order. Two-character operators come before their one-character prefixes.
    pub const PRIORITY: [Operator; 6] = [
        Operator::Eq,
        Operator::NotEq,
        Operator::Le,
        Operator::Ge,
        Operator::Gt,
        Operator::Lt,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Gt => ">",
            Operator::Lt => "<",
        }
    }

    fn is_ordering(self) -> bool {
        !matches!(self, Operator::Eq | Operator::NotEq)
    }

    fn holds(self, first: i64, second: i64) -> bool {
        match self {
            Operator::Le => first <= second,
            Operator::Ge => first >= second,
            Operator::Gt => first > second,
            Operator::Lt => first < second,
            Operator::Eq => first == second,
            Operator::NotEq => first != second,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single rule an endpoint must satisfy to be healthy, e.g. `[STATUS] == 200`.
///
/// Conditions are kept as written and parsed again on every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition(String);

impl Condition {
    pub fn new<S: Into<String>>(condition: S) -> Self {
        Condition(condition.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Finds the first operator, in priority order, that appears surrounded by single
    /// spaces and splits the condition on every occurrence of it. The first two pieces are
    /// the operands; anything after a repeated operator is ignored.
    pub fn split(&self) -> Option<(Operator, &str, &str)> {
        Operator::PRIORITY.iter().find_map(|operator| {
            let separator = format!(" {} ", operator.symbol());
            let mut pieces = self.0.split(separator.as_str());
            match (pieces.next(), pieces.next()) {
                (Some(first), Some(second)) => Some((*operator, first.trim(), second.trim())),
                _ => None,
            }
        })
    }

    /// Syntactic check only: an operator must be present. Placeholders are not resolved
    /// since no probe has run yet.
    pub fn validate(&self) -> Result<()> {
        let mut result = ProbeResult::default();
        self.evaluate(&mut result, false, false, None);
        if result.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidCondition(self.0.clone()))
        }
    }

    /// Evaluates the condition against `result` and appends the outcome to its condition
    /// results. A condition without an operator only records an error and fails.
    ///
    /// By default a failure shows the values its operands resolved to and a success shows the
    /// condition as written; `dont_resolve_failed` and `resolve_successes` flip that.
    pub fn evaluate(
        &self,
        result: &mut ProbeResult,
        dont_resolve_failed: bool,
        resolve_successes: bool,
        context: Option<&Context>,
    ) -> bool {
        let (operator, first, second) = match self.split() {
            Some(split) => split,
            None => {
                debug!("No operator found in condition '{}'", self);
                result.add_error(Error::InvalidCondition(self.0.clone()).to_string());
                return false;
            }
        };
        let parameters = [first, second];
        let resolved = [
            resolve_operand(first, result, context),
            resolve_operand(second, result, context),
        ];
        trace!(
            "Resolved '{}' to [{:?}, {:?}]",
            self,
            resolved[0],
            resolved[1]
        );

        let (success, display) = if operator.is_ordering() {
            let numbers = [to_number(&resolved[0]), to_number(&resolved[1])];
            let success = operator.holds(numbers[0], numbers[1]);
            let display = if should_resolve(success, dont_resolve_failed, resolve_successes) {
                prettify_numbers(parameters, numbers, operator)
            } else {
                self.0.clone()
            };
            (success, display)
        } else {
            let equal = is_equal(&resolved[0], &resolved[1]);
            let success = if operator == Operator::Eq { equal } else { !equal };
            let display = if should_resolve(success, dont_resolve_failed, resolve_successes) {
                prettify(parameters, resolved, operator)
            } else {
                self.0.clone()
            };
            (success, display)
        };

        debug!(
            "Condition '{}' evaluated to {}",
            self,
            if success { "success" } else { "failure" }
        );
        result.condition_results.push(ConditionResult {
            condition: display,
            success,
        });
        success
    }

    /// Whether the response body has to be read to evaluate this condition.
    pub fn has_body_placeholder(&self) -> bool {
        self.0.contains(Placeholder::Body.token())
    }

    /// Whether a domain registration lookup is needed.
    pub fn has_domain_expiration_placeholder(&self) -> bool {
        self.0.contains(Placeholder::DomainExpiration.token())
    }

    /// Whether the target's address has to be resolved.
    pub fn has_ip_placeholder(&self) -> bool {
        self.0.contains(Placeholder::Ip.token())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Condition {
    fn from(condition: &str) -> Self {
        Condition::new(condition)
    }
}

impl From<String> for Condition {
    fn from(condition: String) -> Self {
        Condition(condition)
    }
}

fn should_resolve(success: bool, dont_resolve_failed: bool, resolve_successes: bool) -> bool {
    if success {
        resolve_successes
    } else {
        !dont_resolve_failed
    }
}

fn resolve_operand(operand: &str, result: &mut ProbeResult, context: Option<&Context>) -> String {
    match resolve_placeholder(operand, result, context) {
        Ok(resolved) => resolved,
        Err(e) => {
            result.add_error(e.to_string());
            format!("{} {}", operand, INVALID_SUFFIX)
        }
    }
}

fn is_invalid(parameter: &str, resolved: &str) -> bool {
    resolved
        .strip_prefix(parameter)
        .and_then(|rest| rest.strip_prefix(' '))
        .map_or(false, |rest| rest == INVALID_SUFFIX)
}

fn truncate(value: &str) -> String {
    if value.chars().count() > MAX_DISPLAY_LENGTH_AGAINST_PATTERN {
        let kept = value
            .chars()
            .take(MAX_DISPLAY_LENGTH_AGAINST_PATTERN)
            .collect::<String>();
        format!("{}{}", kept, TRUNCATED_SUFFIX)
    } else {
        value.to_string()
    }
}

fn display_operand(parameter: &str, resolved: &str) -> String {
    if is_invalid(parameter, resolved) {
        resolved.to_string()
    } else if parameter != resolved {
        format!("{} ({})", parameter, resolved)
    } else {
        parameter.to_string()
    }
}

/// Renders `first op second`, with every operand that resolved to something else followed
/// by its value in parentheses.
fn prettify(parameters: [&str; 2], mut resolved: [String; 2], operator: Operator) -> String {
    for (this, other) in [(0, 1), (1, 0)].iter() {
        if LeafFunction::Pattern.argument(parameters[*this]).is_some() {
            resolved[*other] = truncate(&resolved[*other]);
        }
    }
    format!(
        "{} {} {}",
        display_operand(parameters[0], &resolved[0]),
        operator,
        display_operand(parameters[1], &resolved[1])
    )
}

/// Expiration placeholders and operands written as durations show their value as a
/// duration, everything else as a plain integer.
fn prettify_numbers(parameters: [&str; 2], numbers: [i64; 2], operator: Operator) -> String {
    let as_text = |parameter: &str, number: i64| match Placeholder::from_token(parameter) {
        Some(Placeholder::CertificateExpiration) | Some(Placeholder::DomainExpiration) => {
            format_duration(number)
        }
        _ if parse_duration_millis(parameter).is_some() => format_duration(number),
        _ => number.to_string(),
    };
    let resolved = [
        as_text(parameters[0], numbers[0]),
        as_text(parameters[1], numbers[1]),
    ];
    prettify(parameters, resolved, operator)
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod condition_tests;
