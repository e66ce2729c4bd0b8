//! Parsing of script lines into commands

use crate::store::Version;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The value types a script can store and read back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    /// `i64`
    Int,
    /// `String`
    Str,
    /// `bool`
    Bool,
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "int" => Ok(ValueType::Int),
            "str" => Ok(ValueType::Str),
            "bool" => Ok(ValueType::Bool),
            other => Err(Error::InvalidValue(format!("unknown type '{}'", other))),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Int => "int",
            ValueType::Str => "str",
            ValueType::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// A value parsed from a script, tagged with its type
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl TypedValue {
    /// Parse `raw` as a value of `value_type`
    pub fn parse(value_type: ValueType, raw: &str) -> Result<Self> {
        match value_type {
            ValueType::Int => raw
                .parse()
                .map(TypedValue::Int)
                .map_err(|_| Error::InvalidValue(format!("'{}' is not an int", raw))),
            ValueType::Str => Ok(TypedValue::Str(raw.to_string())),
            ValueType::Bool => raw
                .parse()
                .map(TypedValue::Bool)
                .map_err(|_| Error::InvalidValue(format!("'{}' is not a bool", raw))),
        }
    }
}

/// One script command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Put {
        key: String,
        value: TypedValue,
    },
    Get {
        key: String,
        value_type: ValueType,
        version: Option<Version>,
    },
    Remove {
        key: String,
    },
    Version,
}

impl Command {
    /// Parse one script line
    ///
    /// Returns `Ok(None)` for blank lines and comments. `line_number` is
    /// 1-based and only used in error messages.
    pub fn parse(line: &str, line_number: usize) -> Result<Option<Self>> {
        let invalid = |message: String| Error::InvalidCommand {
            line: line_number,
            message,
        };

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (op, rest) = next_token(line);
        let command = match op {
            "put" => {
                let (key, rest) = next_token(rest);
                let (value_type, raw) = next_token(rest);
                if key.is_empty() || value_type.is_empty() {
                    return Err(invalid("usage: put <key> <type> <value>".into()));
                }
                let value_type = value_type
                    .parse::<ValueType>()
                    .map_err(|e| invalid(e.to_string()))?;
                let raw = raw.trim();
                if raw.is_empty() && value_type != ValueType::Str {
                    return Err(invalid("usage: put <key> <type> <value>".into()));
                }
                let value =
                    TypedValue::parse(value_type, raw).map_err(|e| invalid(e.to_string()))?;
                Command::Put {
                    key: key.to_string(),
                    value,
                }
            }
            "get" => {
                let (key, rest) = next_token(rest);
                let (value_type, rest) = next_token(rest);
                let (version, rest) = next_token(rest);
                if key.is_empty() || value_type.is_empty() || !rest.trim().is_empty() {
                    return Err(invalid("usage: get <key> <type> [version]".into()));
                }
                let value_type = value_type
                    .parse::<ValueType>()
                    .map_err(|e| invalid(e.to_string()))?;
                let version = if version.is_empty() {
                    None
                } else {
                    Some(
                        version
                            .parse::<Version>()
                            .map_err(|_| invalid(format!("'{}' is not a version", version)))?,
                    )
                };
                Command::Get {
                    key: key.to_string(),
                    value_type,
                    version,
                }
            }
            "remove" => {
                let (key, rest) = next_token(rest);
                if key.is_empty() || !rest.trim().is_empty() {
                    return Err(invalid("usage: remove <key>".into()));
                }
                Command::Remove {
                    key: key.to_string(),
                }
            }
            "version" => {
                if !rest.trim().is_empty() {
                    return Err(invalid("usage: version".into()));
                }
                Command::Version
            }
            other => return Err(invalid(format!("unknown command '{}'", other))),
        };

        Ok(Some(command))
    }
}

/// Split off the first whitespace-delimited token
fn next_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], &input[end..]),
        None => (input, ""),
    }
}
