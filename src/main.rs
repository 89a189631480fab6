use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use itertools::Itertools;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use transcode::{CodePoint, Encoding};

/// Convert text between UTF-8, UTF-16 and UTF-32.
#[derive(Debug, Parser)]
#[command(name = "transcode", version)]
struct Args {
    /// Input encoding. Detected from the byte order mark when omitted, otherwise UTF-8.
    #[arg(short, long)]
    from: Option<Encoding>,

    /// Output encoding.
    #[arg(short, long, default_value_t = Encoding::Utf8)]
    to: Encoding,

    /// Prefix the output with the byte order mark of the output encoding.
    #[arg(long)]
    bom: bool,

    /// Print the decoded code points as `U+XXXX` instead of encoding them.
    #[arg(long, conflicts_with = "bom")]
    codepoints: bool,

    /// Write to this file instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Raise the log level (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Input file, or `-` for standard input.
    input: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let input = read_input(&args.input)?;
    let output = convert(&input, &args)?;
    write_output(args.output.as_deref(), &output)
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn convert(input: &[u8], args: &Args) -> Result<Vec<u8>> {
    let from = args
        .from
        .or_else(|| Encoding::sniff(input))
        .unwrap_or_default();
    debug!(%from, to = %args.to, bytes = input.len(), "transcoding");

    let codepoints = from
        .decode(input)
        .with_context(|| format!("input is not valid {from}"))?;
    info!(codepoints = codepoints.len(), "decoded input");
    if args.codepoints {
        return Ok(format_codepoints(&codepoints).into_bytes());
    }

    let mut output = Vec::new();
    if args.bom {
        output.extend_from_slice(args.to.byte_order_mark());
    }
    let encoded = args
        .to
        .encode(&codepoints)
        .with_context(|| format!("cannot encode as {}", args.to))?;
    output.extend_from_slice(&encoded);
    Ok(output)
}

fn format_codepoints(codepoints: &[CodePoint]) -> String {
    let mut line = codepoints
        .iter()
        .map(|codepoint| format!("U+{codepoint:04X}"))
        .join(" ");
    line.push('\n');
    line
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("failed to read standard input")?;
        return Ok(buffer);
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(bytes)
                .context("failed to write standard output")?;
            stdout.flush().context("failed to write standard output")
        }
    }
}
