//! Command-line argument parsing for the session binary.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::consts::{APP_DESCRIPTION, APP_NAME, APP_VERSION};

/// Result of parsing command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct ParsedArgs {
    /// Settings file overriding the default config location.
    pub config: Option<PathBuf>,
    /// Stop the demo after this many composed frames.
    pub frames: Option<usize>,
    pub no_console: bool,
    pub help: bool,
}

pub fn parse_args() -> Result<ParsedArgs> {
    parse(std::env::args().skip(1))
}

fn parse(args: impl Iterator<Item = String>) -> Result<ParsedArgs> {
    let mut args = args;
    let mut parsed = ParsedArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let Some(path) = args.next() else {
                    bail!("--config needs a file path");
                };
                parsed.config = Some(PathBuf::from(path));
            }
            "--frames" => {
                let Some(raw) = args.next() else {
                    bail!("--frames needs a number");
                };
                parsed.frames =
                    Some(raw.parse().with_context(|| format!("Invalid frame count {raw:?}"))?);
            }
            "--no-console" => parsed.no_console = true,
            "--help" | "-h" => parsed.help = true,
            other => bail!("Unknown argument {other:?}"),
        }
    }
    Ok(parsed)
}

pub fn usage() -> String {
    format!(
        "{APP_NAME} {APP_VERSION}\n{APP_DESCRIPTION}\n\n\
         Usage: {APP_NAME} [options]\n\n\
         Options:\n\
         \x20 --config <path>   settings file to load instead of the default\n\
         \x20 --frames <n>      stop the demo after n composed frames\n\
         \x20 --no-console      disable console log output\n\
         \x20 -h, --help        show this help"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_strs(args: &[&str]) -> Result<ParsedArgs> {
        parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_all_flags() {
        let parsed =
            parse_strs(&["--config", "/tmp/x.toml", "--frames", "12", "--no-console"]).unwrap();
        assert_eq!(parsed.config.as_deref(), Some(std::path::Path::new("/tmp/x.toml")));
        assert_eq!(parsed.frames, Some(12));
        assert!(parsed.no_console);
        assert!(!parsed.help);
    }

    #[test]
    fn test_empty_args_default() {
        let parsed = parse_strs(&[]).unwrap();
        assert!(parsed.config.is_none());
        assert!(parsed.frames.is_none());
    }

    #[test]
    fn test_missing_value_is_an_error() {
        assert!(parse_strs(&["--config"]).is_err());
        assert!(parse_strs(&["--frames"]).is_err());
    }

    #[test]
    fn test_bad_frame_count_is_an_error() {
        assert!(parse_strs(&["--frames", "many"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        assert!(parse_strs(&["--sideways"]).is_err());
    }
}
