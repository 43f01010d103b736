#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub verb: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    pub fn is_empty(&self) -> bool {
        self.verb.is_empty()
    }

    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Split a command line on whitespace. The verb is lowercased, arguments keep
/// their case.
pub fn parse(line: &str) -> ParsedCommand {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return ParsedCommand::default();
    };

    ParsedCommand {
        verb: verb.to_lowercase(),
        args: parts.map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verb_and_args() {
        let parsed = parse("  LS   /home/Documents  extra ");
        assert_eq!(parsed.verb, "ls");
        assert_eq!(parsed.args, vec!["/home/Documents", "extra"]);
        assert_eq!(parsed.first_arg(), Some("/home/Documents"));
    }

    #[test]
    fn test_parse_blank() {
        assert!(parse("").is_empty());
        assert!(parse(" \t ").is_empty());
        assert!(parse("").args.is_empty());
    }
}
