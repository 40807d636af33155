//! Resolution of condition operands into plain strings.
//!
//! An operand is either one of the fixed placeholders (`[STATUS]`, `[BODY].data.id`,
//! `[CONTEXT].user_id`, ...), optionally wrapped once in `len(...)` or `has(...)`, or a
//! literal that resolves to itself. Lookups that fail never abort evaluation: they resolve
//! to the operand followed by ` (INVALID)`, or to `false` under `has(...)`.

use std::fmt;

use serde_json::Value;

use crate::checks::context::Context;
use crate::checks::jsonpath;
use crate::checks::result::ProbeResult;
use crate::checks::Result;

pub const INVALID_SUFFIX: &str = "(INVALID)";
pub(crate) const FUNCTION_SUFFIX: &str = ")";

const LENGTH_PREFIX: &str = "len(";
const HAS_PREFIX: &str = "has(";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// HTTP status code, e.g. `200`
    Status,
    Ip,
    /// Round trip time in milliseconds
    ResponseTime,
    /// DNS response code, e.g. `NOERROR` or `NXDOMAIN`
    DnsRcode,
    Connected,
    /// Remaining certificate lifetime in milliseconds
    CertificateExpiration,
    /// Remaining domain registration lifetime in milliseconds
    DomainExpiration,
    Body,
    Context,
}

impl Placeholder {
    pub const ALL: [Placeholder; 9] = [
        Placeholder::Status,
        Placeholder::Ip,
        Placeholder::ResponseTime,
        Placeholder::DnsRcode,
        Placeholder::Connected,
        Placeholder::CertificateExpiration,
        Placeholder::DomainExpiration,
        Placeholder::Body,
        Placeholder::Context,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Status => "[STATUS]",
            Placeholder::Ip => "[IP]",
            Placeholder::ResponseTime => "[RESPONSE_TIME]",
            Placeholder::DnsRcode => "[DNS_RCODE]",
            Placeholder::Connected => "[CONNECTED]",
            Placeholder::CertificateExpiration => "[CERTIFICATE_EXPIRATION]",
            Placeholder::DomainExpiration => "[DOMAIN_EXPIRATION]",
            Placeholder::Body => "[BODY]",
            Placeholder::Context => "[CONTEXT]",
        }
    }

    /// Case-insensitive exact match against the placeholder tokens.
    pub fn from_token(token: &str) -> Option<Placeholder> {
        Placeholder::ALL
            .iter()
            .copied()
            .find(|placeholder| placeholder.token().eq_ignore_ascii_case(token))
    }

    /// Returns the remainder of `operand` after this placeholder's token when the operand
    /// starts with it, ignoring case.
    pub(crate) fn strip_from<'a>(self, operand: &'a str) -> Option<&'a str> {
        let token = self.token();
        match operand.get(..token.len()) {
            Some(head) if head.eq_ignore_ascii_case(token) => Some(&operand[token.len()..]),
            _ => None,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The functions applied while resolving an operand. `pat(...)` and `any(...)` are not
/// here: they describe how two operands compare and are handled in `compare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FunctionWrapper {
    None,
    Length,
    Exists,
}

impl FunctionWrapper {
    /// Peels at most one `len(...)` or `has(...)` off the operand.
    pub(crate) fn unwrap(operand: &str) -> (FunctionWrapper, &str) {
        let unwrapped = |prefix: &str| {
            operand
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(FUNCTION_SUFFIX))
        };
        if let Some(inner) = unwrapped(LENGTH_PREFIX) {
            (FunctionWrapper::Length, inner)
        } else if let Some(inner) = unwrapped(HAS_PREFIX) {
            (FunctionWrapper::Exists, inner)
        } else {
            (FunctionWrapper::None, operand)
        }
    }

    fn apply(self, value: String) -> String {
        match self {
            FunctionWrapper::None => value,
            FunctionWrapper::Length => value.chars().count().to_string(),
            FunctionWrapper::Exists => (!value.is_empty()).to_string(),
        }
    }
}

fn invalid(operand: &str) -> String {
    format!("{} {}", operand, INVALID_SUFFIX)
}

/// Resolves a single operand against the probe result and, for suite steps, the shared
/// context. Placeholder names are case-insensitive while the paths that follow them are not.
///
/// Without a context, `[CONTEXT]` operands are left as written (`false` under `has`).
pub fn resolve_placeholder(
    operand: &str,
    result: &ProbeResult,
    context: Option<&Context>,
) -> Result<String> {
    let raw = operand.trim();
    let (function, operand) = FunctionWrapper::unwrap(raw);

    if let Some(path) = Placeholder::Context.strip_from(operand) {
        if let Some(context) = context {
            return Ok(resolve_context(path, function, raw, context));
        }
    }

    let resolved = match Placeholder::from_token(operand) {
        Some(Placeholder::Status) => function.apply(result.http_status.to_string()),
        Some(Placeholder::Ip) => function.apply(result.ip.clone()),
        Some(Placeholder::ResponseTime) => function.apply(result.duration.as_millis().to_string()),
        Some(Placeholder::DnsRcode) => function.apply(result.dns_rcode.clone()),
        Some(Placeholder::Connected) => function.apply(result.connected.to_string()),
        Some(Placeholder::CertificateExpiration) => {
            function.apply(result.certificate_expiration.as_millis().to_string())
        }
        Some(Placeholder::DomainExpiration) => {
            function.apply(result.domain_expiration.as_millis().to_string())
        }
        Some(Placeholder::Body) => resolve_body(function, result),
        Some(Placeholder::Context) | None => match Placeholder::Body.strip_from(operand) {
            Some(path) if path.starts_with('.') || path.starts_with('[') => {
                resolve_body_path(path, function, raw, result)
            }
            _ => match function {
                FunctionWrapper::None => raw.to_string(),
                FunctionWrapper::Exists => false.to_string(),
                FunctionWrapper::Length => invalid(raw),
            },
        },
    };
    Ok(resolved)
}

fn resolve_body(function: FunctionWrapper, result: &ProbeResult) -> String {
    let body = result.body_text();
    let body = body.trim();
    match function {
        FunctionWrapper::None => body.to_string(),
        FunctionWrapper::Exists => (!body.is_empty()).to_string(),
        // a JSON array counts its elements, anything else its characters
        FunctionWrapper::Length => match serde_json::from_str::<Value>(body) {
            Ok(Value::Array(items)) => items.len().to_string(),
            _ => body.chars().count().to_string(),
        },
    }
}

fn resolve_body_path(
    path: &str,
    function: FunctionWrapper,
    raw: &str,
    result: &ProbeResult,
) -> String {
    let path = path.strip_prefix('.').unwrap_or(path);
    let evaluated = jsonpath::eval(path, &result.body);
    match (function, evaluated) {
        (FunctionWrapper::Exists, evaluated) => evaluated.is_ok().to_string(),
        (_, Err(_)) => invalid(raw),
        (FunctionWrapper::Length, Ok((_, length))) => length.to_string(),
        (FunctionWrapper::None, Ok((value, _))) => value,
    }
}

fn resolve_context(
    path: &str,
    function: FunctionWrapper,
    raw: &str,
    context: &Context,
) -> String {
    let path = path.strip_prefix('.').unwrap_or(path);
    if path.is_empty() {
        return match function {
            FunctionWrapper::Exists => false.to_string(),
            _ => invalid(raw),
        };
    }
    match (function, context.get(path)) {
        (FunctionWrapper::Exists, value) => value.is_ok().to_string(),
        (_, Err(_)) => invalid(raw),
        (FunctionWrapper::Length, Ok(value)) => {
            let length = match &value {
                Value::String(s) => s.chars().count(),
                Value::Array(items) => items.len(),
                Value::Object(map) => map.len(),
                scalar => stringify(scalar).chars().count(),
            };
            length.to_string()
        }
        (FunctionWrapper::None, Ok(value)) => stringify(&value),
    }
}

/// Textual form of a stored value: strings unquoted, numbers and booleans as written,
/// collections as compact JSON.
pub(crate) fn stringify(value: &Value) -> String {
    jsonpath::render(value).0
}

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod placeholder_tests;
