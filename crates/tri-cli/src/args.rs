// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Command line arguments of `tric`.

use std::path::PathBuf;

use clap::{value_parser, ArgAction, Args as ClapArgs, Parser, ValueEnum};
use tracing::level_filters::LevelFilter;

/// Checks a Tri program and writes its listing.
#[derive(Debug, Parser)]
#[clap(version, about = "Compiles Tri source into a checked listing")]
pub struct Args {
    #[command(flatten)]
    pub logging: LoggingArgs,

    /// Source file to compile
    #[clap(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,
    /// Where to write the binary rendering
    #[clap(value_name = "BINARY_OUT", required_unless_present = "emit")]
    pub binary_output: Option<PathBuf>,
    /// Where to write the text rendering
    #[clap(value_name = "TEXT_OUT", required_unless_present = "emit")]
    pub text_output: Option<PathBuf>,
    /// How diagnostics are printed
    #[clap(long, value_enum, default_value_t = Format::Human)]
    pub format: Format,
    /// Dump an intermediate form instead of compiling
    #[clap(long, value_enum)]
    pub emit: Option<Emit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// The token stream, one token per line
    Tokens,
    /// The parsed syntax tree
    Ast,
}

/// Logging level from `-v[vv]` or `-q[q]`.
#[derive(Debug, Clone, Copy, ClapArgs)]
pub struct LoggingArgs {
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=3), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.verbose as i8 - self.quiet as i8 {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Args {
        Args::try_parse_from(line.split(' ')).expect("could not parse test string")
    }

    #[test]
    fn positional_paths() {
        let args = parse("tric main.tri main.bin main.lst");
        assert_eq!(args.input, PathBuf::from("main.tri"));
        assert_eq!(args.binary_output, Some(PathBuf::from("main.bin")));
        assert_eq!(args.text_output, Some(PathBuf::from("main.lst")));
        assert_eq!(args.format, Format::Human);
        assert_eq!(args.emit, None);
    }

    #[test]
    fn outputs_required_without_emit() {
        assert!(Args::try_parse_from(["tric", "main.tri"]).is_err());
        let args = parse("tric main.tri --emit tokens");
        assert_eq!(args.emit, Some(Emit::Tokens));
        assert_eq!(args.binary_output, None);
    }

    #[test]
    fn json_format() {
        let args = parse("tric --format json main.tri a b");
        assert_eq!(args.format, Format::Json);
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(parse("tric a b c").logging.log_level_filter(), LevelFilter::WARN);
        assert_eq!(parse("tric -v a b c").logging.log_level_filter(), LevelFilter::INFO);
        assert_eq!(parse("tric -vvv a b c").logging.log_level_filter(), LevelFilter::TRACE);
        assert_eq!(parse("tric -qq a b c").logging.log_level_filter(), LevelFilter::OFF);
        assert!(Args::try_parse_from(["tric", "-v", "-q", "a", "b", "c"]).is_err());
    }
}
