//! # The Argot Library
//!
//! Argot parses command line arguments against a declared registry of
//! commands. A host program registers a base command (usually the executable
//! name), adds sub-commands to it, and declares each sub-command's flags and
//! positional arguments. Parsing an argument vector then returns a populated
//! copy of the matched command, or a typed error for the caller to turn into
//! a usage message.
//!
//! Argot supports:
//!
//! - sub-commands one level under a base command, plus an unnamed root
//!   command selected when the first argument is a flag
//! - boolean flags (`--verbose`), inverted flags (`--no-color`, declared as
//!   `no-color` and defaulting to `"true"`), and value-taking flags
//!   (`--out result.txt` or `--out=result.txt`)
//! - single-character shorthands (`-v`)
//! - positional arguments assigned in declaration order, with an optional
//!   trailing variadic slot (`files...`) that accumulates the remaining
//!   values comma-separated
//!
//! All values stay text; interpreting them is left to the caller.
//!
//! # Examples
//!
//! A command with a value flag and one positional argument:
//!
//! ```
//! use argot::Registry;
//!
//! let mut registry = Registry::new();
//! let (set, _) = registry.register("crn", "1.0.1", "CRN generator");
//! let (generate, _) = set.add_command("generate");
//! generate.add_flag("generate", Some('g'), false, "");
//! generate.add_arg("output", "").unwrap();
//!
//! let parsed = registry
//!     .parse(&["crn", "generate", "-g", "myval", "result.txt"])
//!     .unwrap();
//!
//! assert_eq!(parsed.flag("generate").unwrap().value(), "myval");
//! assert_eq!(parsed.arg("output").unwrap().value(), "result.txt");
//! ```
//!
//! Inverted flags and a variadic argument:
//!
//! ```
//! use argot::Registry;
//!
//! let mut registry = Registry::new();
//! let (set, _) = registry.register("pkg", "0.3.0", "package helper");
//! let (publish, _) = set.add_command("publish");
//! publish.add_flag("no-verify", None, true, "");
//! publish.add_arg("name", "").unwrap();
//! publish.add_arg("tags...", "").unwrap();
//!
//! let parsed = registry
//!     .parse(&["pkg", "publish", "--no-verify", "alice", "x", "y", "z"])
//!     .unwrap();
//!
//! assert_eq!(parsed.flag("verify").unwrap().value(), "false");
//! assert_eq!(parsed.arg("name").unwrap().value(), "alice");
//! assert_eq!(parsed.arg("tags").unwrap().value(), "x,y,z");
//! ```

pub use cmd::{Arg, Command, Flag};
pub use error::{ParseErr, RegistryErr};
pub use registry::{CommandSet, Registry};

mod cmd;
mod error;
mod parser;
mod registry;
mod token;
