use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::error::RegistryErr;
use crate::token;

/// The `Flag` represents a single named switch of a command, either boolean
/// or value-taking, with an optional single-character shorthand.
///
/// A boolean flag declared with a `no-` name prefix becomes an *inverted*
/// flag: it is stored under the stripped name, defaults to `"true"`, carries
/// no shorthand, and is given on the command line as `--no-<name>` which sets
/// its value to `"false"`.
///
/// All values are kept as text; no type coercion happens during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    long_name: String,
    short_name: Option<char>,
    is_boolean: bool,
    is_inverted: bool,
    default: String,
    value: String,
}

impl Flag {
    /// Get the long name of the flag.
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    /// Get the single-character shorthand, if one was declared.
    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    /// Check whether the flag takes no value.
    pub fn is_boolean(&self) -> bool {
        self.is_boolean
    }

    /// Check whether the flag was declared with a `no-` prefix.
    pub fn is_inverted(&self) -> bool {
        self.is_inverted
    }

    /// Get the declared default value.
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// Get the raw parsed value; empty while unset.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the parsed value, falling back to the default while unset.
    pub fn resolve(&self) -> &str {
        if self.value.is_empty() {
            &self.default
        } else {
            &self.value
        }
    }

    pub(crate) fn set_value(&mut self, value: &str) {
        self.value = value.to_owned();
    }
}

impl Display for Flag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut buf = String::from("[ flag: --");
        if self.is_inverted {
            buf.push_str("no-");
        }
        buf.push_str(&self.long_name);
        if let Some(short) = self.short_name {
            buf.push_str(" -");
            buf.push(short);
        }
        if !self.is_boolean {
            buf.push_str(" <value>");
        }
        buf.push_str(" ]");
        write!(f, "{}", buf)
    }
}

/// The `Arg` represents a positional argument slot of a command.
///
/// A variadic argument (declared with a trailing `...`) accumulates every
/// trailing positional value, joined by commas in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    name: String,
    is_variadic: bool,
    default: String,
    value: String,
}

impl Arg {
    /// Get the name of the argument.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether the argument accumulates trailing values.
    pub fn is_variadic(&self) -> bool {
        self.is_variadic
    }

    /// Get the declared default value.
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// Get the raw parsed value; empty while unset.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the parsed value, falling back to the default while unset.
    pub fn resolve(&self) -> &str {
        if self.value.is_empty() {
            &self.default
        } else {
            &self.value
        }
    }

    pub(crate) fn set_value(&mut self, value: &str) {
        self.value = value.to_owned();
    }

    pub(crate) fn append_value(&mut self, value: &str) {
        self.value.push(',');
        self.value.push_str(value);
    }
}

impl Display for Arg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_variadic {
            write!(f, "<{}...>", self.name)
        } else {
            write!(f, "<{}>", self.name)
        }
    }
}

/// The `Command` is the declarative model of a single command: its flags
/// keyed by long name, shorthand aliases, and positional arguments in
/// declaration order.
///
/// A command is declared once and stays read-only afterwards; parsing
/// populates a per-invocation copy, so stale values never leak between
/// invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    flags: HashMap<String, Flag>,
    shorthands: HashMap<char, String>,
    args: HashMap<String, Arg>,
    arg_names: Vec<String>,
}

impl Command {
    pub(crate) fn new(name: &str) -> Command {
        Command {
            name: name.to_owned(),
            flags: HashMap::new(),
            shorthands: HashMap::new(),
            args: HashMap::new(),
            arg_names: Vec::new(),
        }
    }

    /// Get the name of the command. The root command has the empty name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a flag on the command.
    ///
    /// Whitespace is removed from `name`. A boolean flag named `no-<x>` is
    /// registered as the inverted flag `<x>` with default `"true"` and its
    /// shorthand is discarded; a plain boolean flag defaults to `"false"`; a
    /// value-taking flag defaults to the trimmed `default` text.
    ///
    /// Declaration is idempotent: re-declaring a long name returns the
    /// existing flag together with `true`.
    pub fn add_flag(
        &mut self,
        name: &str,
        shorthand: Option<char>,
        is_boolean: bool,
        default: &str,
    ) -> (&mut Flag, bool) {
        let name = token::remove_whitespace(name);
        let (long_name, is_inverted) = match name.strip_prefix("no-") {
            Some(stripped) if is_boolean => (stripped.to_owned(), true),
            _ => (name, false),
        };

        let default = if is_inverted {
            "true".to_owned()
        } else if is_boolean {
            "false".to_owned()
        } else {
            default.trim().to_owned()
        };
        let short_name = if is_inverted { None } else { shorthand };

        let existed = self.flags.contains_key(&long_name);
        if !existed {
            if let Some(short) = short_name {
                self.shorthands.insert(short, long_name.clone());
            }
        }
        let flag = self.flags.entry(long_name).or_insert_with_key(|key| Flag {
            long_name: key.clone(),
            short_name,
            is_boolean,
            is_inverted,
            default,
            value: String::new(),
        });
        (flag, existed)
    }

    /// Declare a positional argument on the command.
    ///
    /// Whitespace is removed from `name`; a trailing `...` marks the
    /// argument variadic. Arguments are assigned in declaration order, so a
    /// variadic argument must stay last: declaring anything after one
    /// (including a second variadic) fails with
    /// [`RegistryErr::ArgAfterVariadic`].
    ///
    /// Declaration is idempotent: re-declaring a name returns the existing
    /// argument together with `true`.
    pub fn add_arg(&mut self, name: &str, default: &str) -> Result<(&mut Arg, bool), RegistryErr> {
        let name = token::remove_whitespace(name);
        let (name, is_variadic) = match token::variadic_arg_name(&name) {
            Some(stripped) => (stripped.to_owned(), true),
            None => (name, false),
        };

        let existed = self.args.contains_key(&name);
        if !existed {
            if let Some(last) = self.arg_names.last() {
                if self.args.get(last).is_some_and(|arg| arg.is_variadic) {
                    return Err(RegistryErr::ArgAfterVariadic {
                        name,
                        variadic: last.clone(),
                    });
                }
            }
            self.arg_names.push(name.clone());
        }
        let default = default.trim().to_owned();
        let arg = self.args.entry(name).or_insert_with_key(|key| Arg {
            name: key.clone(),
            is_variadic,
            default,
            value: String::new(),
        });
        Ok((arg, existed))
    }

    /// Look up a flag by its long name.
    pub fn flag(&self, long_name: &str) -> Option<&Flag> {
        self.flags.get(long_name)
    }

    /// Look up an argument by name.
    pub fn arg(&self, name: &str) -> Option<&Arg> {
        self.args.get(name)
    }

    /// Argument names in declaration order.
    pub fn arg_names(&self) -> &[String] {
        &self.arg_names
    }

    /// Iterate over the declared flags in no particular order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    pub(crate) fn shorthand_target(&self, short: char) -> Option<&str> {
        self.shorthands.get(&short).map(String::as_str)
    }

    pub(crate) fn flag_mut(&mut self, long_name: &str) -> Option<&mut Flag> {
        self.flags.get_mut(long_name)
    }

    pub(crate) fn arg_mut(&mut self, name: &str) -> Option<&mut Arg> {
        self.args.get_mut(name)
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut buf = String::from("[ command: ");
        buf.push_str(if self.name.is_empty() {
            "(root)"
        } else {
            self.name.as_str()
        });
        for name in &self.arg_names {
            if let Some(arg) = self.args.get(name) {
                buf.push(' ');
                buf.push_str(&arg.to_string());
            }
        }
        buf.push_str(" ]");
        write!(f, "{}", buf)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_add_flag_defaults() {
        let mut cmd = Command::new("build");

        let (verbose, existed) = cmd.add_flag("verbose", Some('v'), true, "");
        assert!(!existed);
        assert!(verbose.is_boolean());
        assert!(!verbose.is_inverted());
        assert_eq!("false", verbose.default_value());

        let (out, _) = cmd.add_flag("output", Some('o'), false, " a.txt ");
        assert_eq!("a.txt", out.default_value());
        assert_eq!(Some('o'), out.short_name());
    }

    #[test]
    fn test_add_flag_inverted() {
        let mut cmd = Command::new("build");

        let (clean, _) = cmd.add_flag("no-clean", Some('c'), true, "");
        assert_eq!("clean", clean.long_name());
        assert!(clean.is_inverted());
        assert_eq!("true", clean.default_value());
        // the shorthand of an inverted flag is discarded
        assert_eq!(None, clean.short_name());
        assert_eq!(None, cmd.shorthand_target('c'));
    }

    #[test]
    fn test_add_flag_idempotent() {
        let mut cmd = Command::new("build");

        cmd.add_flag("verbose", Some('v'), true, "");
        let (again, existed) = cmd.add_flag("verbose", Some('V'), false, "other");
        assert!(existed);
        // the original declaration wins
        assert!(again.is_boolean());
        assert_eq!("false", again.default_value());
        assert_eq!(Some("verbose"), cmd.shorthand_target('v'));
        assert_eq!(None, cmd.shorthand_target('V'));
    }

    #[test]
    fn test_add_flag_name_sanitation() {
        let mut cmd = Command::new("build");
        let (flag, _) = cmd.add_flag(" dry run ", None, true, "");
        assert_eq!("dryrun", flag.long_name());
    }

    #[test]
    fn test_add_arg_order_and_variadic() {
        let mut cmd = Command::new("tag");

        cmd.add_arg("name", "").unwrap();
        let (tags, existed) = cmd.add_arg("tags...", "").unwrap();
        assert!(!existed);
        assert!(tags.is_variadic());
        assert_eq!("tags", tags.name());
        assert_eq!(["name", "tags"], cmd.arg_names());
    }

    #[test]
    fn test_add_arg_rejects_after_variadic() {
        let mut cmd = Command::new("tag");
        cmd.add_arg("tags...", "").unwrap();

        let err = cmd.add_arg("extra", "").unwrap_err();
        assert_eq!(
            RegistryErr::ArgAfterVariadic {
                name: "extra".to_owned(),
                variadic: "tags".to_owned(),
            },
            err
        );
        // a second variadic is rejected the same way
        assert!(cmd.add_arg("more...", "").is_err());
        // re-declaring the variadic itself stays idempotent
        let (_, existed) = cmd.add_arg("tags...", "").unwrap();
        assert!(existed);
    }

    #[test]
    fn test_display() {
        let mut cmd = Command::new("tag");
        cmd.add_arg("name", "").unwrap();
        cmd.add_arg("tags...", "").unwrap();
        assert_eq!("[ command: tag <name> <tags...> ]", cmd.to_string());

        let (flag, _) = cmd.add_flag("no-push", None, true, "");
        assert_eq!("[ flag: --no-push ]", flag.to_string());
    }
}
