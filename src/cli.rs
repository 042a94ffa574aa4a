use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "A tool to add coloured calibration strips above and below an image."
)]
pub struct Cli {
    /// The JPEG, PNG or GIF image to pad.
    /// The result is written next to it as `<stem>_<new height>.<ext>`.
    #[arg(value_name = "IMAGE", allow_hyphen_values = true)]
    pub input_path: Option<PathBuf>,

    /// Anything after the image is ignored.
    #[arg(hide = true)]
    pub ignored: Vec<OsString>,

    /// Seed for the strip colour rotation.
    /// Defaults to a fresh random seed on every run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print debug info about each processing step
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
