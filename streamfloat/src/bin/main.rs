// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use streamfloat::{Decoder, DecoderConfig, FloatTarget, IoReader, ParseError, Reader};

/// Decode a stream of JSON numbers and print one value per line.
///
/// Values that are not numbers are skipped, print as `null`, and make the
/// exit code 2.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input file; reads stdin when omitted
    path: Option<PathBuf>,

    /// Decode into f32 instead of f64
    #[arg(long)]
    f32: bool,

    /// Bytes allocated for the input buffer up front
    #[arg(long, default_value_t = 0)]
    initial_capacity: usize,

    /// Upper bound for input buffer growth
    #[arg(long)]
    max_capacity: Option<usize>,
}

fn run<F, R>(decoder: &mut Decoder<R>, out: &mut impl Write) -> Result<(), ParseError>
where
    F: FloatTarget + std::fmt::Display,
    R: Reader,
{
    let mut count = 0usize;
    while !decoder.at_end()? {
        let mut value = None;
        decoder.decode_option::<F>(&mut value)?;
        let written = match value {
            Some(v) => writeln!(out, "{v}"),
            None => writeln!(out, "null"),
        };
        if written.is_err() {
            // Downstream closed (e.g. piped into `head`)
            break;
        }
        count += 1;
    }
    log::info!("decoded {count} values");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let source: Box<dyn io::Read> = match &args.path {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("Error: Unable to open file '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let mut config = DecoderConfig::default().with_initial_capacity(args.initial_capacity);
    if let Some(max) = args.max_capacity {
        config = config.with_max_capacity(max);
    }
    let mut decoder = Decoder::with_config(IoReader::new(source), &config);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = if args.f32 {
        run::<f32, _>(&mut decoder, &mut out)
    } else {
        run::<f64, _>(&mut decoder, &mut out)
    };
    let _ = out.flush();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    if let Some(e) = decoder.error() {
        eprintln!("Warning: {e}");
        return ExitCode::from(2);
    }
    ExitCode::SUCCESS
}
