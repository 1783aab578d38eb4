//! Show image metadata one record at a time with colorized formatting.

use clap::Parser;
use console::{Term, style};
use imgmeta::config;
use imgmeta::gallery::ImageProcessor;
use imgmeta::metadata::ImageMetadata;
use imgmeta::output;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "imgmeta-show")]
#[command(about = "Display image metadata with colorful formatting")]
#[command(version)]
struct Cli {
    /// Path to image directory or single image file
    path: PathBuf,

    /// Delay between displaying images, in seconds (defaults to the configured value)
    #[arg(short, long)]
    delay: Option<f64>,

    /// Display all images without delay or clearing the screen
    #[arg(long)]
    no_delay: bool,

    /// Config file to use instead of ./imgmeta.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

fn show_directory(records: &[ImageMetadata], dir: &Path, delay: Duration) -> std::io::Result<()> {
    output::print_directory_banner(dir, records.len());

    let term = Term::stdout();
    for (i, record) in records.iter().enumerate() {
        if i > 0 && !delay.is_zero() && term.is_term() {
            term.clear_screen()?;
        }
        println!("{}", output::format_progress(i + 1, records.len()));
        output::print_metadata(record);
        pause(delay);
    }
    Ok(())
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    imgmeta::init_logging();
    let cli = Cli::parse();

    if !cli.path.exists() {
        eprintln!(
            "{}",
            style(format!("Error: Path '{}' does not exist.", cli.path.display())).red()
        );
        return Ok(ExitCode::FAILURE);
    }

    let cwd = std::env::current_dir()?;
    let config = config::load_config(cli.config.as_deref(), &cwd)?;
    let seconds = if cli.no_delay {
        0.0
    } else {
        cli.delay.unwrap_or(config.display.delay_seconds)
    };
    let delay = Duration::try_from_secs_f64(seconds)
        .map_err(|e| format!("invalid delay {seconds}: {e}"))?;

    let processor = ImageProcessor::from_config(&config);
    if cli.path.is_dir() {
        let records = processor.metadata_for_directory(&cli.path);
        show_directory(&records, &cli.path, delay)?;
    } else {
        output::print_metadata(&processor.metadata_for_file(&cli.path));
    }

    Ok(ExitCode::SUCCESS)
}
