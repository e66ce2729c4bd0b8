//! Line-oriented command scripts for driving a store
//!
//! Used by the `vtrie` binary. Each non-blank line that does not start with
//! `#` is one command:
//!
//! ```text
//! put <key> <type> <value>
//! get <key> <type> [version]
//! remove <key>
//! version
//! ```
//!
//! where `<type>` is one of `int`, `str`, or `bool`.

mod command;
mod runner;

pub use command::{Command, TypedValue, ValueType};
pub use runner::{Record, ScriptRunner};
