//! Minimal path traversal over a JSON body: dot-separated keys and `[n]` indices,
//! e.g. `data.users[0].name` or `[1].id`.

use std::convert::TryFrom;

use serde_json::Value;

use crate::checks::errors::Error;
use crate::checks::Result;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Key(String),
    Index(i64),
}

fn tokenize(path: &str) -> Result<Vec<Token>> {
    let path = path.trim();
    let mut tokens = Vec::new();
    let mut rest = path;
    while let Some(c) = rest.chars().next() {
        match c {
            '.' => rest = &rest[1..],
            '[' => {
                let close = rest.find(']').ok_or(Error::UnclosedBracket)?;
                let index = rest[1..close].trim();
                let index = index
                    .parse::<i64>()
                    .map_err(|_| Error::InvalidIndex(index.to_string()))?;
                tokens.push(Token::Index(index));
                rest = &rest[close + 1..];
            }
            _ => {
                let end = rest.find(|c: char| c == '.' || c == '[').unwrap_or(rest.len());
                let key = rest[..end].trim();
                if !key.is_empty() {
                    tokens.push(Token::Key(key.to_string()));
                }
                rest = &rest[end..];
            }
        }
    }
    Ok(tokens)
}

/// Resolves `path` against the JSON document in `body` and returns the value rendered as
/// text together with its length: element count for arrays, character count otherwise.
///
/// An empty path addresses the root. `null` values, missing keys, out of range indices and
/// indexing into the wrong kind of value are all errors.
pub(crate) fn eval(path: &str, body: &[u8]) -> Result<(String, usize)> {
    let tokens = tokenize(path)?;
    let root: Value =
        serde_json::from_slice(body).map_err(|e| Error::InvalidBody(e.to_string()))?;
    if tokens.is_empty() {
        return Ok(match &root {
            // keep the quotes so that the root renders as it appeared in the body
            Value::String(_) => {
                let quoted = root.to_string();
                let length = quoted.chars().count();
                (quoted, length)
            }
            other => render(other),
        });
    }
    let mut current = &root;
    for token in &tokens {
        current = match (token, current) {
            (Token::Key(key), Value::Object(map)) => match map.get(key) {
                Some(Value::Null) => return Err(Error::NullValue(format!("key: {}", key))),
                Some(next) => next,
                None => return Err(Error::KeyNotFound(key.clone())),
            },
            (Token::Key(key), _) => return Err(Error::NotAnObject(key.clone())),
            (Token::Index(index), Value::Array(items)) => {
                let item = usize::try_from(*index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .ok_or(Error::IndexOutOfBounds(*index))?;
                if item.is_null() {
                    return Err(Error::NullValue(format!("index: {}", index)));
                }
                item
            }
            (Token::Index(_), _) => return Err(Error::NotAnArray),
        };
    }
    Ok(render(current))
}

pub(crate) fn render(value: &Value) -> (String, usize) {
    match value {
        Value::Null => ("null".to_string(), 4),
        Value::String(s) => (s.clone(), s.chars().count()),
        Value::Bool(b) => {
            let text = b.to_string();
            let length = text.len();
            (text, length)
        }
        Value::Number(number) => {
            let text = number_to_string(number);
            let length = text.len();
            (text, length)
        }
        Value::Array(items) => (value.to_string(), items.len()),
        Value::Object(_) => {
            let text = value.to_string();
            let length = text.chars().count();
            (text, length)
        }
    }
}

fn number_to_string(number: &serde_json::Number) -> String {
    if let Some(i) = number.as_i64() {
        i.to_string()
    } else if let Some(u) = number.as_u64() {
        u.to_string()
    } else {
        // f64 Display never uses an exponent and drops a trailing `.0`
        number.as_f64().map(|f| f.to_string()).unwrap_or_else(|| number.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const BODY: &str = r#"{
        "status": "UP",
        "data": { "id": 1, "name": "john", "score": 12.5, "whole": 3.0, "active": true },
        "items": [1, 2, 3],
        "users": [{ "name": "a" }, { "name": "b", "tags": ["x"] }],
        "empty": null,
        "holes": [null, 1]
    }"#;

    #[rstest]
    #[case("status", "UP", 2)]
    #[case("data.name", "john", 4)]
    #[case("data.id", "1", 1)]
    #[case("data.score", "12.5", 4)]
    #[case("data.whole", "3", 1)]
    #[case("data.active", "true", 4)]
    #[case("items", "[1,2,3]", 3)]
    #[case("items[1]", "2", 1)]
    #[case("users[1].name", "b", 1)]
    #[case("users[1].tags[0]", "x", 1)]
    #[case("users[0]", r#"{"name":"a"}"#, 12)]
    #[case("holes[1]", "1", 1)]
    #[case(" data . name ", "john", 4)]
    fn eval_resolves(#[case] path: &str, #[case] value: &str, #[case] length: usize) -> Result<()> {
        assert_eq!(eval(path, BODY.as_bytes())?, (value.to_string(), length));
        Ok(())
    }

    #[rstest]
    #[case("missing")]
    #[case("data.missing")]
    #[case("empty")]
    #[case("holes[0]")]
    #[case("items[3]")]
    #[case("items[-1]")]
    #[case("status.length")]
    #[case("data[0]")]
    #[case("items[x]")]
    #[case("items[0")]
    fn eval_fails(#[case] path: &str) {
        assert!(eval(path, BODY.as_bytes()).is_err());
    }

    #[test]
    fn eval_root_array_index() -> Result<()> {
        let body = br#"[{"id": 1}, {"id": 2}]"#;
        assert_eq!(eval("[0].id", body)?, ("1".to_string(), 1));
        assert_eq!(eval("[1]", body)?, (r#"{"id":2}"#.to_string(), 8));
        Ok(())
    }

    #[test]
    fn eval_empty_path_is_root() -> Result<()> {
        assert_eq!(eval("", b"[1, 2, 3]")?.1, 3);
        assert_eq!(eval("", br#""abc""#)?, (r#""abc""#.to_string(), 5));
        assert_eq!(eval("", b"123")?, ("123".to_string(), 3));
        Ok(())
    }

    #[test]
    fn eval_rejects_non_json_and_null_roots() {
        assert!(matches!(eval("data", b"john.doe"), Err(Error::InvalidBody(_))));
        assert!(matches!(eval("data", br#"{"data": null}""#), Err(Error::InvalidBody(_))));
        assert!(eval("data", b"null").is_err());
        assert!(eval("[0].name", br#"{"statusCode": 500}"#).is_err());
    }
}
