mod split;

use crate::config::AppConfig;
use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
pub use split::split_args;
use std::path::PathBuf;

/// Filter and reformat logfmt lines read from stdin
///
/// Positional arguments are joined with spaces and split on the last '|':
/// the filter comes before it, the output template after it.
///
///   logfmt-filter 'level=error component~http | [.time] .msg'
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Filter expression and/or template, separated by '|'
    #[arg(trailing_var_arg = true, value_name = "ARGS")]
    pub args: Vec<String>,

    /// Filter expression, combined with any filter in ARGS
    #[arg(short, long, value_name = "EXPR")]
    pub filter: Option<String>,

    /// Output template (e.g. "[.time] .msg"), overrides any template in ARGS
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Output format for records printed without a template
    #[arg(short = 'F', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// When to colorize output
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Print record keys in lexical order
    #[arg(long)]
    pub sort_keys: bool,

    /// Path to a TOML config file
    #[arg(short, long, env = "LOGFMT_FILTER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic output on stderr (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all diagnostics
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Records re-encoded as logfmt
    #[default]
    Text,
    /// One JSON object per record
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colorize when writing to a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl Cli {
    /// Filter and template text after applying the explicit options.
    ///
    /// The explicit `--filter` is appended to the filter found in ARGS; an
    /// explicit `--template` replaces the template found in ARGS.
    pub fn filter_and_template(&self) -> (String, String) {
        let (mut filter, mut template) = split_args(&self.args.join(" "));

        if let Some(extra) = &self.filter {
            if !filter.trim().is_empty() {
                filter.push(' ');
            }
            filter.push_str(extra);
        }
        if let Some(explicit) = &self.template {
            template = explicit.clone();
        }

        (filter, template)
    }

    pub fn effective_format(&self, config: &AppConfig) -> OutputFormat {
        self.format.unwrap_or(config.output.format)
    }

    pub fn effective_color(&self, config: &AppConfig) -> ColorMode {
        self.color.unwrap_or(config.output.color)
    }

    pub fn effective_sort_keys(&self, config: &AppConfig) -> bool {
        self.sort_keys || config.output.sort_keys
    }

    /// Verbosity level, zero when quiet
    pub fn verbosity(&self) -> u8 {
        if self.quiet { 0 } else { self.verbose }
    }
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
