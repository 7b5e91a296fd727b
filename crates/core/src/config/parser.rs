use crate::config::directives::{Directive, parse_directive};
use crate::error::{AbstractorError, Result};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parser for `key: value` configuration files
#[derive(Debug)]
pub struct ConfigParser;

impl ConfigParser {
    /// Parse a single config file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Directive>> {
        let file = std::fs::File::open(&path).map_err(|e| {
            AbstractorError::ConfigError(format!("Cannot open file {}: {}", path.as_ref().display(), e))
        })?;

        let reader = BufReader::new(file);
        Self::parse_reader(reader)
    }

    /// Parse config from a reader
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line =
                line.map_err(|e| AbstractorError::ConfigError(format!("Read error at line {}: {}", line_number, e)))?;
            if let Some(directive) = Self::parse_line(&line, line_number)? {
                directives.push(directive);
            }
        }

        Ok(directives)
    }

    /// Parse config from a string
    pub fn parse_string(content: &str) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();

        for (index, line) in content.lines().enumerate() {
            if let Some(directive) = Self::parse_line(line, index + 1)? {
                directives.push(directive);
            }
        }

        Ok(directives)
    }

    fn parse_line(line: &str, line_number: usize) -> Result<Option<Directive>> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        parse_directive(line)
            .map(Some)
            .map_err(|e| AbstractorError::ConfigError(format!("Parse error at line {}: {}", line_number, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotConfig;
    use std::io::Cursor;

    #[test]
    fn test_parse_string_basic() {
        let content = r#"
# Operator contact
name: quill#1234
timeout: 15
server_no_reacts: 123
server_no_reacts: 456
bot_ignore: 789
"#;

        let directives = ConfigParser::parse_string(content).unwrap();
        assert_eq!(directives.len(), 5);

        let mut config = BotConfig::new();
        config.apply(directives);

        assert_eq!(config.name, "quill#1234");
        assert_eq!(config.timeout, 15);
        assert_eq!(config.servers_no_reacts.len(), 2);
        assert!(config.bots_ignore.contains(&789));
    }

    #[test]
    fn test_parse_reader() {
        let cursor = Cursor::new("name: quill\nreacts: no\n");
        let directives = ConfigParser::parse_reader(cursor).unwrap();

        assert_eq!(directives, vec![Directive::Name("quill".to_string()), Directive::Reacts(false)]);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let content = "name: quill\n\ntimeout: soon\n";
        let err = ConfigParser::parse_string(content).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_parse_empty_and_comments() {
        let content = "# comment\n\n   # indented comment\n";
        assert!(ConfigParser::parse_string(content).unwrap().is_empty());
    }

    #[test]
    fn test_parse_file_missing() {
        let result = ConfigParser::parse_file("/nonexistent/abstractor.txt");
        assert!(matches!(result, Err(AbstractorError::ConfigError(_))));
    }
}
