pub mod cli;
pub mod config;
pub mod filter;
pub mod logfmt;
pub mod scan;
pub mod template;

use anyhow::Context;
pub use cli::{Cli, ColorMode, OutputFormat, cli_parse, split_args};
pub use config::{AppConfig, load_config};
pub use filter::{FieldLookup, FilterError, FilterExpression, Operator, Predicate};
pub use logfmt::{DecodeError, Record, decode_line, encode_record};
pub use scan::{OutputMode, ScanOptions, ScanStats, scan};
pub use template::{Template, TemplateError};
use std::io::{self, BufWriter};

/// Build the filter from the config's standing expression and the command line.
///
/// Also returns a warning for every fragment of either expression that was
/// skipped.
fn build_filter(filter_text: &str, config: &AppConfig) -> (FilterExpression, Vec<String>) {
    let (standing, standing_skipped) = FilterExpression::parse_with_skipped(&config.filter.always);
    let (expr, skipped) = FilterExpression::parse_with_skipped(filter_text);

    let warnings = standing_skipped
        .iter()
        .map(|fragment| {
            format!(
                "Ignoring unrecognized fragment '{}' in config filter.always",
                fragment
            )
        })
        .chain(
            skipped
                .iter()
                .map(|fragment| format!("Ignoring unrecognized filter fragment '{}'", fragment)),
        )
        .collect();

    (standing.and(expr), warnings)
}

fn build_output(
    template_text: &str,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<OutputMode, TemplateError> {
    let template_text = if template_text.is_empty() {
        config.output.template.as_str()
    } else {
        template_text
    };

    if !template_text.is_empty() {
        return Ok(OutputMode::Template(Template::parse(template_text)?));
    }

    Ok(match format {
        OutputFormat::Text => OutputMode::Dump,
        OutputFormat::Json => OutputMode::Json,
    })
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    let config = load_config(cli.config.as_deref()).context("Failed to load config")?;
    let verbose = cli.verbosity();
    let color_mode = cli.effective_color(&config);

    match color_mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {
            // let colored decide from the terminal and environment
        }
    }

    let (filter_text, template_text) = cli.filter_and_template();
    let (filter, warnings) = build_filter(&filter_text, &config);
    if verbose > 0 {
        for warning in &warnings {
            eprintln!("Warning: {}", warning);
        }
    }
    let output = build_output(&template_text, &config, cli.effective_format(&config))
        .context("Invalid output template")?;

    if verbose > 0 {
        eprintln!("Config profile: {}", config.profile_name);
        if let Some(config_path) = &cli.config {
            eprintln!("Config file: {}", config_path.display());
        }
        if filter.is_empty() {
            eprintln!("Filter: (none)");
        } else {
            eprintln!("Filter: {}", filter);
        }
        match &output {
            OutputMode::Template(template) => eprintln!("Template: {}", template.source()),
            OutputMode::Dump => eprintln!("Output: logfmt"),
            OutputMode::Json => eprintln!("Output: json"),
        }
    }

    let options = ScanOptions {
        filter,
        output,
        color: color_mode != ColorMode::Never,
        sort_keys: cli.effective_sort_keys(&config),
        verbosity: verbose,
    };

    let stdin = io::stdin().lock();
    let mut stdout = BufWriter::new(io::stdout().lock());
    let stats = match scan(stdin, &mut stdout, &options) {
        Ok(stats) => stats,
        // downstream closed the pipe, e.g. `| head`
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
        Err(e) => return Err(e).context("Error scanning"),
    };

    if verbose > 0 {
        eprintln!(
            "Read {} lines: {} records decoded, {} matched, {} undecodable",
            stats.lines, stats.decoded, stats.matched, stats.decode_errors
        );
    }

    Ok(())
}
