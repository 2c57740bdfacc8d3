// src/cli.rs
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::sender::Message;

#[derive(Parser, Debug)]
#[command(name = "mailform", version, about = "Compose an email in the terminal")]
pub struct Cli {
    /// Prefill the To field
    #[arg(long, value_name = "ADDRESS")]
    pub to: Option<String>,

    /// Prefill the From field
    #[arg(long, value_name = "ADDRESS")]
    pub from: Option<String>,

    /// Prefill the Subject field
    #[arg(long)]
    pub subject: Option<String>,

    /// Prefill the Body field
    #[arg(long)]
    pub body: Option<String>,

    /// How to print the message once it is sent
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Cursor blink ticks per second
    #[arg(short, long, value_name = "FLOAT", value_parser = parse_rate)]
    pub tick_rate: Option<f64>,

    /// Frames per second
    #[arg(short, long, value_name = "FLOAT", value_parser = parse_rate)]
    pub frame_rate: Option<f64>,

    /// Extra config file, layered over the defaults
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Tick and frame rates become interval periods, so they must be finite and
/// above zero.
pub fn check_rate(rate: f64) -> Result<f64, String> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("rate must be a finite number above 0, got {rate}"))
    }
}

fn parse_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("{e}"))?;
    check_rate(rate)
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    None,
}

impl OutputFormat {
    pub fn write(self, out: &mut impl Write, message: &Message) -> std::io::Result<()> {
        match self {
            OutputFormat::Text => out.write_all(message.to_text().as_bytes()),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, message)?;
                writeln!(out)
            }
            OutputFormat::None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn prefill_flags() {
        let cli = Cli::try_parse_from([
            "mailform",
            "--to",
            "a@b.com",
            "--subject",
            "Hi",
            "-o",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.to.as_deref(), Some("a@b.com"));
        assert_eq!(cli.from, None);
        assert_eq!(cli.subject.as_deref(), Some("Hi"));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.tick_rate, None);
    }

    #[test]
    fn rates_must_be_positive_and_finite() {
        for bad in ["0", "-2", "NaN", "inf", "fast"] {
            assert!(
                Cli::try_parse_from(["mailform", "-t", bad]).is_err(),
                "tick rate {bad}"
            );
            assert!(
                Cli::try_parse_from(["mailform", "--frame-rate", bad]).is_err(),
                "frame rate {bad}"
            );
        }
        let cli = Cli::try_parse_from(["mailform", "-t", "0.5", "-f", "60"]).unwrap();
        assert_eq!(cli.tick_rate, Some(0.5));
        assert_eq!(cli.frame_rate, Some(60.0));
    }

    #[test]
    fn unknown_output_is_rejected() {
        assert!(Cli::try_parse_from(["mailform", "--output", "xml"]).is_err());
    }

    fn message() -> Message {
        Message {
            to: "a@b.com".into(),
            from: "c@d.com".into(),
            subject: "Hello".into(),
            body: "World".into(),
        }
    }

    #[test]
    fn text_output() {
        let mut buf = Vec::new();
        OutputFormat::Text.write(&mut buf, &message()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "To: a@b.com\nFrom: c@d.com\nSubject: Hello\n\nWorld\n"
        );
    }

    #[test]
    fn json_output_parses_back() {
        let mut buf = Vec::new();
        OutputFormat::Json.write(&mut buf, &message()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["to"], "a@b.com");
        assert_eq!(value["body"], "World");
    }

    #[test]
    fn none_output_is_silent() {
        let mut buf = Vec::new();
        OutputFormat::None.write(&mut buf, &message()).unwrap();
        assert!(buf.is_empty());
    }
}
