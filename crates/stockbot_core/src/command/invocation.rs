use once_cell::sync::Lazy;
use regex::Regex;

static COMMAND_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*/([A-Za-z0-9_]+)(?:@[A-Za-z0-9_]+)?(?:\s+(.*))?$")
        .expect("valid command line regex")
});

/// A command as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Lowercase command name without the leading `/`.
    pub name: String,
    /// Arguments split on whitespace.
    pub args: Vec<String>,
    /// Everything after the command name, trimmed but not split.
    pub raw_args: String,
}

impl Invocation {
    /// Builds an invocation from a command name and its unsplit remainder.
    ///
    /// `args` is derived from `raw_args`, so batch payloads keep their
    /// inner whitespace.
    pub fn new(name: impl Into<String>, raw_args: impl Into<String>) -> Self {
        let raw_args = raw_args.into().trim().to_string();
        let args = raw_args.split_whitespace().map(str::to_string).collect();
        Self {
            name: name.into().to_ascii_lowercase(),
            args,
            raw_args,
        }
    }

    /// Parses a `/name[@bot] arguments...` line.
    ///
    /// Returns `None` when the line is not a command.
    pub fn parse(line: &str) -> Option<Self> {
        let captures = COMMAND_LINE_RE.captures(line)?;
        let name = captures.get(1)?.as_str().to_ascii_lowercase();
        let raw_args = captures
            .get(2)
            .map_or("", |rest| rest.as_str());
        Some(Self::new(name, raw_args))
    }
}

#[cfg(test)]
mod tests {
    use super::Invocation;

    #[test]
    fn parse_splits_args_and_keeps_raw_remainder() {
        let invocation = Invocation::parse("/addbulk A|Blue Saree|10;  B|Red|5 ").unwrap();
        assert_eq!(invocation.name, "addbulk");
        assert_eq!(invocation.args, vec!["A|Blue", "Saree|10;", "B|Red|5"]);
        assert_eq!(invocation.raw_args, "A|Blue Saree|10;  B|Red|5");
    }

    #[test]
    fn parse_strips_bot_suffix_and_lowercases_name() {
        let invocation = Invocation::parse("/Stock@ShopStockBot ABC123").unwrap();
        assert_eq!(invocation.name, "stock");
        assert_eq!(invocation.args, vec!["ABC123"]);
    }

    #[test]
    fn parse_handles_bare_command() {
        let invocation = Invocation::parse("/list").unwrap();
        assert!(invocation.args.is_empty());
        assert_eq!(invocation.raw_args, "");
    }

    #[test]
    fn new_keeps_inner_whitespace_of_raw_remainder() {
        let invocation = Invocation::new("AddBulk", "  A|Blue   Saree|1 ");
        assert_eq!(invocation.name, "addbulk");
        assert_eq!(invocation.raw_args, "A|Blue   Saree|1");
        assert_eq!(invocation.args, vec!["A|Blue", "Saree|1"]);
        assert_eq!(invocation, Invocation::parse("/addbulk A|Blue   Saree|1").unwrap());
    }

    #[test]
    fn parse_rejects_plain_text() {
        assert_eq!(Invocation::parse("hello there"), None);
        assert_eq!(Invocation::parse("/"), None);
    }
}
