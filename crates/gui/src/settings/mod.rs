use anyhow::{Context, Result, anyhow, bail};
use std::{fs, path::Path, str::FromStr};

use logos::Logos;
use strum::EnumString;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: Url,
    pub theme: ThemeKind,
}

#[derive(Debug, EnumString, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Dark,
    Light,
}

impl Config {
    /// Reads a config file, statements in it override the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
    }
}

impl Default for Config {
    fn default() -> Self {
        let default_config = include_str!("../../assets/default.conf");
        Self::from_str(default_config).expect("embedded default config is valid")
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sanitized = s.chars().filter(|&c| c != '\r').collect::<String>();
        let lexer = Token::lexer(&sanitized);

        let mut out = Config {
            server: Url::parse(common::network::LOCAL_SERVER)?,
            theme: ThemeKind::Dark,
        };
        let mut statement: Vec<String> = vec![];

        for token in lexer {
            match token {
                Ok(Token::String(s)) => statement.push(s),
                Ok(Token::StatementDelim) => {
                    apply(&mut out, &statement)?;
                    statement.clear();
                }
                Ok(Token::ArgDelim) => {}
                Err(_) => bail!("Unrecognized token in config"),
            }
        }
        // The last line may lack a trailing newline
        apply(&mut out, &statement)?;
        Ok(out)
    }
}

fn apply(config: &mut Config, statement: &[String]) -> Result<()> {
    let Some((cmd, args)) = statement.split_first() else {
        return Ok(());
    };
    let cmd = Command::from_str(cmd).map_err(|_| anyhow!("Unknown command {}", cmd))?;
    match cmd {
        Command::SetServer => {
            if args.len() != 1 {
                bail!("SetServer requires 1 argument");
            }
            config.server = Url::parse(&args[0])
                .with_context(|| format!("Invalid server url {}", args[0]))?;
        }
        Command::Theme => {
            if args.len() != 1 {
                bail!("Theme requires 1 argument");
            }
            config.theme =
                ThemeKind::from_str(&args[0]).map_err(|_| anyhow!("Unknown theme {}", args[0]))?;
        }
    }
    Ok(())
}

/// Represents valid tokens in a configuration file.
#[derive(Debug, Logos)]
enum Token {
    #[regex(" +")]
    ArgDelim,

    #[token("\n")]
    StatementDelim,

    #[regex("[^ \n]+", |lex| lex.slice().to_owned())]
    String(String),
}

#[derive(Debug, EnumString)]
enum Command {
    SetServer,
    Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.server.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(config.theme, ThemeKind::Dark);
    }

    #[test]
    fn parses_statements_without_trailing_newline() {
        let config = Config::from_str("SetServer http://10.0.0.2:8080\r\nTheme Light").unwrap();
        assert_eq!(config.server.as_str(), "http://10.0.0.2:8080/");
        assert_eq!(config.theme, ThemeKind::Light);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let config = Config::from_str("\n\nTheme   Light\n\n").unwrap();
        assert_eq!(config.theme, ThemeKind::Light);
    }

    #[test]
    fn rejects_unknown_command() {
        assert!(Config::from_str("Bind ctrl+s Submit\n").is_err());
    }

    #[test]
    fn rejects_wrong_argument_count() {
        assert!(Config::from_str("SetServer\n").is_err());
        assert!(Config::from_str("Theme Dark Light\n").is_err());
    }

    #[test]
    fn rejects_invalid_url() {
        assert!(Config::from_str("SetServer not-a-url\n").is_err());
    }
}
