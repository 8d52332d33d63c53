//! CLI argument definitions using clap derive macros.

use std::fmt;
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use reqwrap::constants::CONNECT_TIMEOUT_SECS;

/// Send HTTP requests and download files from the command line.
#[derive(Parser, Debug)]
#[command(name = "reqwrap")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a request and print the status code and body
    Request(RequestArgs),
    /// Download a URL into a directory, named after its last path segment
    Download(DownloadArgs),
}

#[derive(ClapArgs)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE, HEAD; case-insensitive)
    pub method: String,

    /// Target URL
    pub url: String,

    /// Header to add, as `Name: value` (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Query parameter, as `key=value` (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// JSON request body
    #[arg(long, value_parser = parse_json)]
    pub json: Option<serde_json::Value>,

    /// Basic auth username
    #[arg(long, requires = "password")]
    pub user: Option<String>,

    /// Basic auth password
    #[arg(long, requires = "user")]
    pub password: Option<String>,

    /// Connect timeout in seconds
    #[arg(short = 't', long, default_value_t = CONNECT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

// The password is never printed, even at trace level.
impl fmt::Debug for RequestArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestArgs")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("params", &self.params)
            .field("json", &self.json)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(ClapArgs, Debug)]
pub struct DownloadArgs {
    /// URL to download
    pub url: String,

    /// Destination directory (must exist)
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Connect timeout in seconds
    #[arg(short = 't', long, default_value_t = CONNECT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in `{raw}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `key=value`, got `{raw}`"))?;
    Ok((key.to_string(), value.to_string()))
}

fn parse_json(raw: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON body: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_request_parses_repeatable_options() {
        let args = Args::try_parse_from([
            "reqwrap",
            "request",
            "post",
            "http://localhost/x",
            "-H",
            "Accept: application/json",
            "-p",
            "a=1",
            "-p",
            "b=x=y",
            "--json",
            r#"{"k":true}"#,
        ])
        .unwrap();

        let Command::Request(request) = args.command else {
            panic!("expected request subcommand");
        };
        assert_eq!(request.method, "post");
        assert_eq!(
            request.headers,
            vec![("Accept".to_string(), "application/json".to_string())]
        );
        assert_eq!(
            request.params,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x=y".to_string())
            ]
        );
        assert_eq!(request.json, Some(serde_json::json!({"k": true})));
        assert_eq!(request.timeout_secs, CONNECT_TIMEOUT_SECS);
    }

    #[test]
    fn test_cli_verbose_flag_is_global() {
        let args = Args::try_parse_from(["reqwrap", "download", "http://h/f.bin", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        let Command::Download(download) = args.command else {
            panic!("expected download subcommand");
        };
        assert_eq!(download.dir, PathBuf::from("."));
    }

    #[test]
    fn test_cli_user_requires_password() {
        let result = Args::try_parse_from([
            "reqwrap",
            "request",
            "get",
            "http://h/",
            "--user",
            "alice",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_debug_redacts_password() {
        let args = Args::try_parse_from([
            "reqwrap",
            "request",
            "get",
            "http://h/",
            "--user",
            "alice",
            "--password",
            "hunter2",
        ])
        .unwrap();

        let rendered = format!("{args:?}");
        assert!(!rendered.contains("hunter2"), "password leaked: {rendered}");
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("alice"));
    }

    #[test]
    fn test_cli_rejects_malformed_header_and_json() {
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
        assert!(parse_json("{not json").is_err());
    }
}
