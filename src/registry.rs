use std::collections::HashMap;

use crate::cmd::Command;
use crate::error::ParseErr;
use crate::parser::{self, Engine};
use crate::token;

/// The `CommandSet` holds one registered base command: its metadata and the
/// sub-commands declared under it.
#[derive(Debug, Clone)]
pub struct CommandSet {
    base_command: String,
    version: String,
    description: String,
    commands: HashMap<String, Command>,
}

impl CommandSet {
    fn new(base_command: &str, version: &str, description: &str) -> CommandSet {
        CommandSet {
            base_command: base_command.to_owned(),
            version: version.to_owned(),
            description: description.to_owned(),
            commands: HashMap::new(),
        }
    }

    /// Get the base command name.
    pub fn base_command(&self) -> &str {
        &self.base_command
    }

    /// Get the declared version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the declared description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declare a sub-command. The empty name declares the root command,
    /// selected when the first parsed argument is flag-shaped or missing.
    ///
    /// Declaration is idempotent: re-declaring a name returns the existing
    /// command together with `true`.
    pub fn add_command(&mut self, name: &str) -> (&mut Command, bool) {
        let name = token::remove_whitespace(name);
        let existed = self.commands.contains_key(&name);
        let command = self
            .commands
            .entry(name)
            .or_insert_with_key(|key| Command::new(key));
        (command, existed)
    }

    /// Look up a declared sub-command by name.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Parse `args` against this base command.
    ///
    /// The first element selects the sub-command, unless it is flag-shaped
    /// or absent, in which case the root command is selected and every
    /// element is a token. The remaining tokens are matched against the
    /// selected command's flags and arguments.
    ///
    /// On success a populated copy of the selected command is returned; the
    /// declared model itself is never mutated, so the set can be parsed
    /// repeatedly.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<Command, ParseErr> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        parser::prescan(&args)?;

        let (selector, tokens) = match args.split_first() {
            Some((first, rest)) if !token::is_flag(first) => (*first, rest),
            _ => ("", args.as_slice()),
        };

        let mut command = match self.commands.get(selector) {
            Some(command) => command.clone(),
            None => return Err(ParseErr::UnknownCommand(selector.to_owned())),
        };

        Engine::new(&mut command, tokens).run()?;
        Ok(command)
    }
}

/// The `Registry` is an owned collection of base commands; there is no
/// process-wide state, callers create and pass registries explicitly.
///
/// # Examples
///
/// ```
/// use argot::Registry;
///
/// let mut registry = Registry::new();
/// let (set, _) = registry.register("crn", "1.0.0", "CRN generator");
/// set.add_command("generate");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<String, CommandSet>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Registry {
        Registry {
            entries: HashMap::new(),
        }
    }

    /// Register a base command with its version and description. Whitespace
    /// is removed from the name.
    ///
    /// Registration is idempotent: re-registering a name returns the
    /// existing entry together with `true`, keeping the original metadata.
    pub fn register(
        &mut self,
        name: &str,
        version: &str,
        description: &str,
    ) -> (&mut CommandSet, bool) {
        let name = token::remove_whitespace(name);
        let existed = self.entries.contains_key(&name);
        let entry = self
            .entries
            .entry(name)
            .or_insert_with_key(|key| CommandSet::new(key, version, description));
        (entry, existed)
    }

    /// Look up a registered base command.
    pub fn get(&self, name: &str) -> Option<&CommandSet> {
        self.entries.get(name)
    }

    /// Parse a full argument vector whose first element is the base-command
    /// name, typically the program name from `std::env::args`. The rest of
    /// the vector is handed to [`CommandSet::parse`].
    pub fn parse<S: AsRef<str>>(&self, argv: &[S]) -> Result<Command, ParseErr> {
        let (base, rest) = match argv.split_first() {
            Some((first, rest)) => (first.as_ref(), rest),
            None => ("", argv),
        };
        match self.entries.get(base) {
            Some(entry) => entry.parse(rest),
            None => Err(ParseErr::UnknownCommand(base.to_owned())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_register_idempotent() {
        let mut registry = Registry::new();
        let (_, existed) = registry.register("crn", "1.0.0", "CRN generator");
        assert!(!existed);

        let (entry, existed) = registry.register("crn", "2.0.0", "other");
        assert!(existed);
        // the original metadata wins
        assert_eq!("1.0.0", entry.version());
        assert_eq!("CRN generator", entry.description());
    }

    #[test]
    fn test_register_sanitizes_name() {
        let mut registry = Registry::new();
        let (entry, _) = registry.register(" c r n ", "1.0.0", "");
        assert_eq!("crn", entry.base_command());
        assert!(registry.get("crn").is_some());
    }

    #[test]
    fn test_add_command_idempotent() {
        let mut registry = Registry::new();
        let (entry, _) = registry.register("crn", "1.0.0", "");

        let (_, existed) = entry.add_command("generate");
        assert!(!existed);
        let (_, existed) = entry.add_command("generate");
        assert!(existed);
        assert!(entry.command("generate").is_some());
        assert!(entry.command("missing").is_none());
    }

    #[test]
    fn test_parse_unknown_base_command() {
        let registry = Registry::new();
        assert_eq!(
            Err(ParseErr::UnknownCommand("crn".to_owned())),
            registry.parse(&["crn", "generate"])
        );
    }

    #[test]
    fn test_parse_unknown_sub_command() {
        let mut registry = Registry::new();
        registry.register("crn", "1.0.0", "");
        assert_eq!(
            Err(ParseErr::UnknownCommand("generate".to_owned())),
            registry.parse(&["crn", "generate"])
        );
    }

    #[test]
    fn test_parse_selects_root_for_leading_flag() {
        let mut registry = Registry::new();
        let (entry, _) = registry.register("crn", "1.0.0", "");
        let (root, _) = entry.add_command("");
        root.add_flag("verbose", Some('v'), true, "");

        let parsed = registry.parse(&["crn", "--verbose"]).unwrap();
        assert_eq!("", parsed.name());
        assert_eq!("true", parsed.flag("verbose").unwrap().value());
    }
}
