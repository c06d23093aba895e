//! A single cardano-cli invocation as an ordered token list.

use std::fmt;
use std::path::Path;

/// Ordered argument vector for one cardano-cli call, program name excluded.
///
/// Tokens are handed to the process verbatim; there is no shell in between,
/// so values containing spaces (e.g. `addr+1000+5 policy.asset`) stay one token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<String>,
}

impl Invocation {
    /// Start from the command path, e.g. `["transaction", "build-raw"]`.
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { args: command.into_iter().map(Into::into).collect() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args_from<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// `--<name> <value>`
    pub fn flag(self, name: &str, value: impl Into<String>) -> Self {
        self.arg(format!("--{name}")).arg(value)
    }

    pub fn flag_path(self, name: &str, path: &Path) -> Self {
        self.flag(name, path_arg(path))
    }

    /// Appends `--<name> <value>` only when a value is present.
    pub fn flag_opt<V: Into<String>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.flag(name, value),
            None => self,
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// `"<group> <command>"`, e.g. `"query utxo"`. Used for logging and mock lookup.
    pub fn command_key(&self) -> String {
        self.args
            .iter()
            .take_while(|arg| !arg.starts_with("--"))
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Value following the first occurrence of `--<name>`.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.values_of(name).into_iter().next()
    }

    /// Values following every occurrence of `--<name>`, in order.
    pub fn values_of(&self, name: &str) -> Vec<&str> {
        let flag = format!("--{name}");
        self.args
            .windows(2)
            .filter(|pair| pair[0] == flag)
            .map(|pair| pair[1].as_str())
            .collect()
    }

    pub fn has_flag(&self, name: &str) -> bool {
        let flag = format!("--{name}");
        self.args.iter().any(|arg| *arg == flag)
    }

    /// Full command line, shell-quoted where needed. Diagnostics only.
    pub fn command_line(&self, program: &Path) -> String {
        std::iter::once(path_arg(program))
            .chain(self.args.iter().cloned())
            .map(|token| quote(&token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.args.iter().map(|token| quote(token)).collect();
        write!(f, "{}", rendered.join(" "))
    }
}

pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn quote(token: &str) -> String {
    if !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./#+=:,@".contains(c))
    {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}
