use clap::Parser;
use std::path::PathBuf;

/// Define CLI arguments
#[derive(Parser, Debug)]
#[command(
    name = "yamdi",
    version,
    about = "Yet Another Metadata Injector for FLV",
    long_about = "Scans an FLV file and writes a copy that carries a synthesized\n\
                  onMetaData script-data tag right after the file header: stream\n\
                  properties, sizes, and a keyframe index (file positions and\n\
                  timestamps) for seeking. Audio and video tags are copied\n\
                  byte-identically; any pre-existing script-data tags are dropped."
)]
pub struct CliArgs {
    /// The source FLV file
    #[arg(short, long, help = "Path to the source FLV file")]
    pub input: PathBuf,

    /// Destination path for the processed FLV
    #[arg(
        short,
        long,
        help = "Path for the resulting FLV file with the metadata tag. Use '-' to stream to stdout"
    )]
    pub output: String,

    /// Creator label written into the metadata
    #[arg(
        short,
        long,
        help = "A string written into the creator field of the metadata (capped at 255 bytes)"
    )]
    pub creator: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable detailed debug logging")]
    pub verbose: bool,
}
