use crate::filter::FilterExpression;
use crate::logfmt::{Record, decode_line, write_record};
use crate::template::Template;
use std::io::{self, BufRead, Write};

/// How matching records are printed
#[derive(Debug, Clone)]
pub enum OutputMode {
    /// Re-encode the record as logfmt
    Dump,
    /// One JSON object per record
    Json,
    /// Render the record through a user template
    Template(Template),
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub filter: FilterExpression,
    pub output: OutputMode,
    pub color: bool,
    pub sort_keys: bool,
    pub verbosity: u8,
}

impl ScanOptions {
    pub fn new(filter: FilterExpression, output: OutputMode) -> Self {
        Self {
            filter,
            output,
            color: false,
            sort_keys: false,
            verbosity: 0,
        }
    }
}

/// Counters collected while scanning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub lines: usize,
    pub decoded: usize,
    pub decode_errors: usize,
    pub matched: usize,
}

/// Read lines until end of input, printing every record that passes the
/// filter.
///
/// Lines that fail to decode or hold no pairs are skipped. Invalid UTF-8 is
/// replaced rather than treated as an error.
pub fn scan<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    options: &ScanOptions,
) -> io::Result<ScanStats> {
    let mut stats = ScanStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches('\n').trim_end_matches('\r');

        let record = match decode_line(line) {
            Ok(record) => record,
            Err(e) => {
                stats.decode_errors += 1;
                if options.verbosity >= 2 {
                    eprintln!("Skipping line {}: {}", stats.lines, e);
                }
                continue;
            }
        };
        if record.is_empty() {
            continue;
        }
        stats.decoded += 1;

        if !options.filter.matches(&record) {
            continue;
        }
        stats.matched += 1;

        write_output(writer, &record, options)?;
    }

    writer.flush()?;
    Ok(stats)
}

fn write_output<W: Write>(writer: &mut W, record: &Record, options: &ScanOptions) -> io::Result<()> {
    match &options.output {
        OutputMode::Template(template) => writeln!(writer, "{}", template.render(record)),
        OutputMode::Json if options.sort_keys => write_json(writer, &record.sorted()),
        OutputMode::Json => write_json(writer, record),
        OutputMode::Dump if options.sort_keys => write_record(writer, &record.sorted(), options.color),
        OutputMode::Dump => write_record(writer, record, options.color),
    }
}

fn write_json<W: Write>(writer: &mut W, record: &Record) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, record)?;
    writeln!(writer)
}
