//! Executes script commands against a store

use super::command::{Command, TypedValue, ValueType};
use crate::store::{Version, VersionedStore};
use crate::Result;
use serde::Serialize;
use std::io::BufRead;
use tracing::debug;

/// The outcome of one command, as reported to the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Record {
    Put {
        key: String,
        version: Version,
    },
    Remove {
        key: String,
        version: Version,
    },
    Get {
        key: String,
        version: Version,
        found: bool,
        value: Option<TypedValue>,
    },
    Version {
        version: Version,
    },
}

/// Runs commands against an owned [`VersionedStore`]
pub struct ScriptRunner {
    store: VersionedStore,
}

impl ScriptRunner {
    pub fn new(store: VersionedStore) -> Self {
        ScriptRunner { store }
    }

    /// The store commands are applied to
    pub fn store(&self) -> &VersionedStore {
        &self.store
    }

    /// Apply a single command
    pub fn execute(&self, command: Command) -> Result<Record> {
        let record = match command {
            Command::Put { key, value } => {
                let version = match value {
                    TypedValue::Int(value) => self.store.put(&key, value)?,
                    TypedValue::Str(value) => self.store.put(&key, value)?,
                    TypedValue::Bool(value) => self.store.put(&key, value)?,
                };
                Record::Put { key, version }
            }
            Command::Get {
                key,
                value_type,
                version,
            } => {
                let version = version.unwrap_or_else(|| self.store.latest_version());
                let value = match value_type {
                    ValueType::Int => self
                        .store
                        .get_at::<i64>(&key, version)
                        .map(|value| TypedValue::Int(*value)),
                    ValueType::Str => self
                        .store
                        .get_at::<String>(&key, version)
                        .map(|value| TypedValue::Str(value.to_string())),
                    ValueType::Bool => self
                        .store
                        .get_at::<bool>(&key, version)
                        .map(|value| TypedValue::Bool(*value)),
                };
                Record::Get {
                    key,
                    version,
                    found: value.is_some(),
                    value,
                }
            }
            Command::Remove { key } => {
                let version = self.store.remove(&key)?;
                Record::Remove { key, version }
            }
            Command::Version => Record::Version {
                version: self.store.latest_version(),
            },
        };
        Ok(record)
    }

    /// Run every command in `reader`, passing each record to `emit`
    ///
    /// Stops at the first malformed line or failed command. Returns the
    /// number of commands executed.
    pub fn run<R: BufRead>(
        &self,
        reader: R,
        mut emit: impl FnMut(&Record) -> Result<()>,
    ) -> Result<usize> {
        let mut executed = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let Some(command) = Command::parse(&line, index + 1)? else {
                continue;
            };
            let record = self.execute(command)?;
            emit(&record)?;
            executed += 1;
        }

        debug!(
            executed,
            latest_version = self.store.latest_version(),
            "Script finished"
        );
        Ok(executed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn run_script(script: &str) -> Result<Vec<Record>> {
        let runner = ScriptRunner::new(VersionedStore::new());
        let mut records = Vec::new();
        runner.run(script.as_bytes(), |record| {
            records.push(record.clone());
            Ok(())
        })?;
        Ok(records)
    }

    #[test]
    fn test_runner_walkthrough() {
        let records = run_script(
            "put cat int 1\n\
             put car int 2\n\
             get cat int 2\n\
             remove dog\n\
             remove cat\n\
             get cat int\n\
             get cat int 2\n\
             version\n",
        )
        .unwrap();

        assert_eq!(
            records,
            vec![
                Record::Put {
                    key: "cat".into(),
                    version: 1
                },
                Record::Put {
                    key: "car".into(),
                    version: 2
                },
                Record::Get {
                    key: "cat".into(),
                    version: 2,
                    found: true,
                    value: Some(TypedValue::Int(1)),
                },
                Record::Remove {
                    key: "dog".into(),
                    version: 2
                },
                Record::Remove {
                    key: "cat".into(),
                    version: 3
                },
                Record::Get {
                    key: "cat".into(),
                    version: 3,
                    found: false,
                    value: None,
                },
                Record::Get {
                    key: "cat".into(),
                    version: 2,
                    found: true,
                    value: Some(TypedValue::Int(1)),
                },
                Record::Version { version: 3 },
            ]
        );
    }

    #[test]
    fn test_runner_type_mismatch_not_found() {
        let records = run_script("put flag bool true\nget flag int\nget flag bool\n").unwrap();

        assert!(matches!(records[1], Record::Get { found: false, .. }));
        assert!(matches!(
            records[2],
            Record::Get {
                value: Some(TypedValue::Bool(true)),
                ..
            }
        ));
    }

    #[test]
    fn test_runner_stops_on_bad_line() {
        let runner = ScriptRunner::new(VersionedStore::new());
        let mut emitted = 0;
        let result = runner.run("put a int 1\n\nbogus\nput b int 2\n".as_bytes(), |_| {
            emitted += 1;
            Ok(())
        });

        assert!(matches!(result, Err(Error::InvalidCommand { line: 3, .. })));
        assert_eq!(emitted, 1);
        assert_eq!(runner.store().latest_version(), 1);
    }

    #[test]
    fn test_record_json_shape() {
        let record = Record::Get {
            key: "k".into(),
            version: 4,
            found: true,
            value: Some(TypedValue::Str("v".into())),
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "op": "get",
                "key": "k",
                "version": 4,
                "found": true,
                "value": "v"
            })
        );
    }
}
