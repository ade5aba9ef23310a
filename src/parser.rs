use crate::cmd::Command;
use crate::error::ParseErr;
use crate::token;

/// Reject any unsupported flag up front, before a single value is assigned.
/// A malformed flag late in the vector therefore aborts the whole parse.
pub(crate) fn prescan(args: &[&str]) -> Result<(), ParseErr> {
    for value in args {
        if token::is_flag(value) && token::is_unsupported_flag(value) {
            return Err(ParseErr::UnsupportedFlag((*value).to_owned()));
        }
    }
    Ok(())
}

/// Split `--name=value` style tokens into their parts, trimming whitespace
/// and dropping empties, so that `--name=value` parses exactly like
/// `--name value`.
fn normalize(args: &[&str]) -> Vec<String> {
    let mut tokens = Vec::with_capacity(args.len());
    for value in args {
        if value.contains('=') {
            for part in value.split('=') {
                let part = part.trim();
                if !part.is_empty() {
                    tokens.push(part.to_owned());
                }
            }
        } else {
            tokens.push((*value).to_owned());
        }
    }
    tokens
}

/// The parse engine: consumes a normalized token stream against a single
/// command, writing resolved values straight into it.
///
/// The cursor only ever advances; there is no backtracking. The first error
/// stops consumption, values assigned before that point stay in place.
pub(crate) struct Engine<'a> {
    command: &'a mut Command,
    tokens: Vec<String>,
    cursor: usize,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(command: &'a mut Command, args: &[&str]) -> Engine<'a> {
        Engine {
            command,
            tokens: normalize(args),
            cursor: 0,
        }
    }

    /// Run the token stream to exhaustion, or stop at the first failure.
    pub(crate) fn run(&mut self) -> Result<(), ParseErr> {
        while let Some(current) = self.next_token() {
            if token::is_flag(&current) {
                self.handle_flag(&current)?;
            } else {
                self.handle_positional(&current);
            }
        }
        Ok(())
    }

    fn next_token(&mut self) -> Option<String> {
        let current = self.tokens.get(self.cursor).cloned();
        if current.is_some() {
            self.cursor += 1;
        }
        current
    }

    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.cursor).map(String::as_str)
    }

    /// Resolve a flag-shaped token to the long name of a declared flag, plus
    /// whether the token arrived in inverted (`--no-`) form.
    fn resolve_flag(&self, current: &str) -> Result<(String, bool), ParseErr> {
        if token::is_short_flag(current) {
            let short = match current.chars().nth(1) {
                Some(short) => short,
                None => return Err(ParseErr::UnknownFlag(current.to_owned())),
            };
            match self.command.shorthand_target(short) {
                Some(long_name) => Ok((long_name.to_owned(), false)),
                None => Err(ParseErr::UnknownFlag(current.to_owned())),
            }
        } else if let Some(name) = token::inverted_flag_name(current) {
            if self.command.flag(name).is_some() {
                Ok((name.to_owned(), true))
            } else {
                Err(ParseErr::UnknownFlag(current.to_owned()))
            }
        } else {
            let name = token::strip_leading_dashes(current);
            match self.command.flag(name) {
                // a plain long name must not reach an inverted flag
                Some(flag) if !flag.is_inverted() => Ok((name.to_owned(), false)),
                _ => Err(ParseErr::UnknownFlag(current.to_owned())),
            }
        }
    }

    fn handle_flag(&mut self, current: &str) -> Result<(), ParseErr> {
        let (long_name, inverted) = self.resolve_flag(current)?;
        let boolean = self
            .command
            .flag(&long_name)
            .is_some_and(|flag| flag.is_boolean());

        if boolean {
            let value = if inverted { "false" } else { "true" };
            if let Some(flag) = self.command.flag_mut(&long_name) {
                flag.set_value(value);
            }
            return Ok(());
        }

        // a value flag takes the next token unless it looks like a flag;
        // with nothing to take, the value stays unset and the default
        // applies at read time
        let value = match self.peek() {
            Some(next) if !token::is_flag(next) => Some(next.to_owned()),
            _ => None,
        };
        if let Some(value) = value {
            self.cursor += 1;
            if let Some(flag) = self.command.flag_mut(&long_name) {
                flag.set_value(&value);
            }
        }
        Ok(())
    }

    /// Assign a positional token to the first unfilled argument slot in
    /// declaration order. Once every slot is filled, a variadic last
    /// argument accumulates the token comma-separated; without one the token
    /// is dropped.
    fn handle_positional(&mut self, value: &str) {
        let order = self.command.arg_names().to_vec();
        for (index, name) in order.iter().enumerate() {
            let is_last = index + 1 == order.len();
            if let Some(arg) = self.command.arg_mut(name) {
                if arg.value().is_empty() {
                    arg.set_value(value);
                    return;
                }
                if is_last && arg.is_variadic() {
                    arg.append_value(value);
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(vec!["--name", "value"], normalize(&["--name=value"]));
        assert_eq!(vec!["--name", "value"], normalize(&["--name = value "]));
        assert_eq!(vec!["a", "b", "c"], normalize(&["a=b=c"]));
        assert_eq!(vec!["--verbose"], normalize(&["--verbose"]));
        assert!(normalize(&["="]).is_empty());
    }

    #[test]
    fn test_prescan() {
        assert_eq!(Ok(()), prescan(&["generate", "-g", "--good", "out.txt"]));
        assert_eq!(
            Err(ParseErr::UnsupportedFlag("-bad".to_owned())),
            prescan(&["generate", "ok", "-bad"])
        );
        assert_eq!(
            Err(ParseErr::UnsupportedFlag("---x".to_owned())),
            prescan(&["---x"])
        );
        // bare two-character words are not flag-shaped, the pre-scan
        // leaves them for positional assignment
        assert_eq!(Ok(()), prescan(&["ab"]));
    }

    #[test]
    fn test_engine_positional_overflow_is_dropped() {
        let mut command = Command::new("copy");
        command.add_arg("src", "").unwrap();
        command.add_arg("dst", "").unwrap();

        let mut engine = Engine::new(&mut command, &["a", "b", "c"]);
        assert_eq!(Ok(()), engine.run());
        assert_eq!("a", command.arg("src").unwrap().value());
        assert_eq!("b", command.arg("dst").unwrap().value());
    }

    #[test]
    fn test_engine_value_flag_at_end_stays_unset() {
        let mut command = Command::new("build");
        command.add_flag("target", Some('t'), false, "debug");

        let mut engine = Engine::new(&mut command, &["--target"]);
        assert_eq!(Ok(()), engine.run());
        assert_eq!("", command.flag("target").unwrap().value());
        assert_eq!("debug", command.flag("target").unwrap().resolve());
    }

    #[test]
    fn test_engine_value_flag_never_eats_a_flag() {
        let mut command = Command::new("build");
        command.add_flag("target", Some('t'), false, "");
        command.add_flag("verbose", Some('v'), true, "");

        let mut engine = Engine::new(&mut command, &["-t", "-v"]);
        assert_eq!(Ok(()), engine.run());
        assert_eq!("", command.flag("target").unwrap().value());
        assert_eq!("true", command.flag("verbose").unwrap().value());
    }
}
