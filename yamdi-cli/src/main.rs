use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use bytes_util::ByteReader;
use clap::Parser;
use flv::FlvHeader;
use flv::tag::PREV_TAG_SIZE;
use memmap2::Mmap;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod error;

use cli::CliArgs;
use error::AppError;

/// Upper bound for the creator label carried in the metadata.
const CREATOR_MAX_BYTES: usize = 255;

fn main() {
    if let Err(e) = bootstrap() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn bootstrap() -> Result<(), AppError> {
    // Parse command-line arguments
    let args = CliArgs::parse();

    // Setup logging. Everything goes to stderr: stdout may carry the FLV
    // stream when the output path is '-'.
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::Initialization(e.to_string()))?;

    run(&args)
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    if args.output != "-" && Path::new(&args.output) == args.input.as_path() {
        return Err(AppError::InvalidInput(
            "input file and output file must not be the same".to_string(),
        ));
    }

    let creator = args.creator.as_deref().map(truncate_creator);

    let input = File::open(&args.input)?;
    // Read-only map of the input; it is never mutated and outlives both
    // walking passes and the final copy.
    let mmap = unsafe { Mmap::map(&input)? };
    let buf: &[u8] = &mmap;

    let reader = ByteReader::new(buf);
    let (header, header_len) = FlvHeader::parse(&reader)?;
    debug!(
        version = header.version,
        has_audio = header.has_audio,
        has_video = header.has_video,
        "input header parsed"
    );

    // The first tag sits behind the header and the initial previous-tag-size.
    let start = header_len + PREV_TAG_SIZE;

    let summary = flv_meta::summarize(buf, start);
    debug!("{summary}");

    let emitter = flv_meta::MetadataEmitter::new(summary, creator);
    let summary = if args.output == "-" {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        let summary = emitter.write_to(buf, start, &mut out)?;
        out.flush()?;
        summary
    } else {
        let mut out = BufWriter::new(File::create(&args.output)?);
        let summary = emitter.write_to(buf, start, &mut out)?;
        out.flush()?;
        summary
    };

    info!(
        output = %args.output,
        file_size = summary.file_size,
        keyframes = summary.keyframes,
        "metadata injected"
    );

    Ok(())
}

/// Caps the creator label at [`CREATOR_MAX_BYTES`] bytes, cutting on a char
/// boundary so the value stays valid UTF-8.
fn truncate_creator(creator: &str) -> &str {
    if creator.len() <= CREATOR_MAX_BYTES {
        return creator;
    }
    let mut end = CREATOR_MAX_BYTES;
    while !creator.is_char_boundary(end) {
        end -= 1;
    }
    &creator[..end]
}
