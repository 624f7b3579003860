//! Command line arguments for the `lexvis` binary.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    name = "lexvis",
    version,
    about = "Token visualizer for grammar tokenization services",
    long_about = "Stage a grammar file and some input text, send both to a tokenization\n\
                  service and browse the returned token stream as chips or as a raw tree."
)]
pub struct Cli {
    /// Base URL of the tokenization service.
    #[arg(long = "server", value_name = "URL")]
    pub server: Option<String>,

    /// RON settings file (default: ./lexvis.ron when present).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Grammar file to stage on startup.
    #[arg(long = "grammar", value_name = "FILE")]
    pub grammar: Option<PathBuf>,

    /// Read the input text from a file.
    #[arg(long = "input-file", value_name = "FILE", conflicts_with = "text")]
    pub input_file: Option<PathBuf>,

    /// Input text given inline.
    #[arg(long = "text", value_name = "TEXT")]
    pub text: Option<String>,

    /// Total request timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Connection timeout in seconds.
    #[arg(long = "connect-timeout-secs", value_name = "SECS")]
    pub connect_timeout_secs: Option<u64>,

    /// Log file used by the interactive UI.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Submit once, print the results to stdout and exit.
    #[arg(long = "print")]
    pub print: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_invocation() {
        let cli = Cli::try_parse_from([
            "lexvis",
            "--server",
            "http://svc:8000",
            "--grammar",
            "Hello.g4",
            "--text",
            "hello world",
            "--print",
        ])
        .unwrap();
        assert_eq!(cli.server.as_deref(), Some("http://svc:8000"));
        assert_eq!(cli.grammar, Some(PathBuf::from("Hello.g4")));
        assert_eq!(cli.text.as_deref(), Some("hello world"));
        assert!(cli.print);
    }

    #[test]
    fn text_and_input_file_conflict() {
        let result = Cli::try_parse_from(["lexvis", "--text", "a", "--input-file", "in.txt"]);
        assert!(result.is_err());
    }
}
