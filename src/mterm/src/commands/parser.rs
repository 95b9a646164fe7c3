//! Command-line tokenizer.
//!
//! Splits an input line into a command name and its arguments:
//!
//! - Simple commands: `clear`
//! - Commands with arguments: `help clear`
//! - Quoted arguments: `say "hello world"`
//! - Mixed arguments: `add file.txt 'path with spaces' another`
//!
//! Either quote character opens or closes a quoted span; inside a span
//! whitespace is kept. An unterminated quote keeps the rest of the line as
//! literal content.

use super::types::ParsedCommand;

// ============================================================
// COMMAND PARSER
// ============================================================

/// Parser for terminal input lines.
pub struct CommandParser;

impl CommandParser {
    /// Parse an input line into a `ParsedCommand`.
    ///
    /// Returns `None` for blank input.
    ///
    /// # Examples
    ///
    /// ```
    /// use mterm::commands::CommandParser;
    ///
    /// let cmd = CommandParser::parse("  command \"a b\" c").unwrap();
    /// assert_eq!(cmd.name, "command");
    /// assert_eq!(cmd.args, vec!["a b", "c"]);
    /// ```
    pub fn parse(input: &str) -> Option<ParsedCommand> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let (name, args_str) = match input.find(char::is_whitespace) {
            Some(pos) => (&input[..pos], input[pos..].trim()),
            None => (input, ""),
        };

        let args = if args_str.is_empty() {
            Vec::new()
        } else {
            Self::split_args(args_str)
        };

        Some(ParsedCommand::new(
            name.to_string(),
            args,
            input.to_string(),
        ))
    }

    /// Split an argument string, keeping quoted spans as single arguments.
    ///
    /// A closing quote ends the current argument; an opening quote does not,
    /// so `ab"c d"` yields `abc d`. Empty quoted spans produce nothing.
    pub fn split_args(args_str: &str) -> Vec<String> {
        let mut args = Vec::new();
        let mut current = String::new();
        let mut quoted = false;

        for c in args_str.chars() {
            match c {
                '"' | '\'' => {
                    if quoted {
                        quoted = false;
                        if !current.is_empty() {
                            args.push(std::mem::take(&mut current));
                        }
                    } else {
                        quoted = true;
                    }
                }
                c if c.is_whitespace() && !quoted => {
                    if !current.is_empty() {
                        args.push(std::mem::take(&mut current));
                    }
                }
                _ => current.push(c),
            }
        }

        if !current.is_empty() {
            args.push(current);
        }

        args
    }

    /// Extract the command name being typed, for completion.
    ///
    /// Returns `None` once the input contains whitespace after the name.
    pub fn extract_partial_command(input: &str) -> Option<&str> {
        let input = input.trim_start();
        if input.contains(char::is_whitespace) {
            return None;
        }
        Some(input)
    }
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> (String, Vec<String>) {
        let cmd = CommandParser::parse(input).unwrap();
        (cmd.name, cmd.args)
    }

    #[test]
    fn test_parse_simple_command() {
        let (name, args) = parse("command");
        assert_eq!(name, "command");
        assert!(args.is_empty());
    }

    #[test]
    fn test_parse_keeps_case() {
        let (name, _) = parse("cOmMaNd");
        assert_eq!(name, "cOmMaNd");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let (name, args) = parse("   command   ");
        assert_eq!(name, "command");
        assert!(args.is_empty());
    }

    #[test]
    fn test_parse_plain_args() {
        assert_eq!(parse("   command asd  ").1, vec!["asd"]);
        assert_eq!(parse("   command asd   123  ").1, vec!["asd", "123"]);
    }

    #[test]
    fn test_parse_quoted_arg() {
        assert_eq!(parse("  command \"a b\" c").1, vec!["a b", "c"]);
        assert_eq!(parse("   command \"asd   123\"  ").1, vec!["asd   123"]);
        assert_eq!(
            parse("   command \"asd   123\" asd ").1,
            vec!["asd   123", "asd"]
        );
    }

    #[test]
    fn test_parse_single_quoted_arg() {
        assert_eq!(
            parse("   command 'asd   123' asd ").1,
            vec!["asd   123", "asd"]
        );
    }

    #[test]
    fn test_parse_mixed_quotes() {
        assert_eq!(parse("cmd 'x y' \"z\"").1, vec!["x y", "z"]);
    }

    #[test]
    fn test_parse_unterminated_quote() {
        assert_eq!(parse("cmd \"unclosed  rest").1, vec!["unclosed  rest"]);
    }

    #[test]
    fn test_parse_leading_quote_is_part_of_name() {
        let (name, args) = parse("\"asd   123\" asd ");
        assert_eq!(name, "\"asd");
        assert_eq!(args, vec!["123 asd"]);
    }

    #[test]
    fn test_parse_blank() {
        assert!(CommandParser::parse("").is_none());
        assert!(CommandParser::parse("   ").is_none());
    }

    #[test]
    fn test_parse_raw_is_trimmed() {
        let cmd = CommandParser::parse("  help me ").unwrap();
        assert_eq!(cmd.raw, "help me");
    }

    #[test]
    fn test_split_args_edge_cases() {
        assert!(CommandParser::split_args("\"\"").is_empty());
        assert_eq!(CommandParser::split_args("ab\"c d\""), vec!["abc d"]);
        assert_eq!(CommandParser::split_args("a    b"), vec!["a", "b"]);
    }

    #[test]
    fn test_extract_partial_command() {
        assert_eq!(CommandParser::extract_partial_command("hel"), Some("hel"));
        assert_eq!(CommandParser::extract_partial_command(""), Some(""));
        assert_eq!(CommandParser::extract_partial_command("help topic"), None);
    }
}
