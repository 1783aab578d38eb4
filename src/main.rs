use clap::{Parser, Subcommand};
use imgmeta::config;
use imgmeta::export::save_json;
use imgmeta::gallery::{ImageProcessor, encode_image_to_base64};
use imgmeta::imaging::BuiltinTransform;
use imgmeta::output;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "imgmeta")]
#[command(about = "Extract metadata from images")]
#[command(long_about = "\
Extract metadata from images

Reports dimensions, format, color mode, EXIF tags and filesystem attributes
as JSON. Filenames of the form description_<uuid>.ext are split into a
description and an identifier.

Recognized extensions: jpg, jpeg, png, gif, bmp, tiff, webp (configurable).

Settings are read from imgmeta.toml in the working directory when present.
Run 'imgmeta gen-config' to generate a documented one.")]
#[command(version)]
struct Cli {
    /// Config file to use instead of ./imgmeta.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process a single image file
    File {
        /// Path to the image file
        file_path: PathBuf,
        /// Include base64-encoded image data
        #[arg(long)]
        include_image: bool,
        /// Output file path (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Process a directory of images
    Directory {
        /// Path to the directory containing images
        directory_path: PathBuf,
        /// Output file path (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create a gallery of images with metadata
    Gallery {
        /// Path to the directory containing images
        directory_path: PathBuf,
        /// Include base64-encoded image data
        #[arg(long)]
        include_images: bool,
        /// Output file path (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export an image as base64
    Base64 {
        /// Path to the image file
        file_path: PathBuf,
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Apply a transform to every image in a directory and save copies
    Transform {
        /// Path to the directory containing images
        directory_path: PathBuf,
        /// grayscale, invert, rotate90, rotate180, flip-horizontal, flip-vertical, blur
        #[arg(long)]
        op: BuiltinTransform,
        /// Where to write results (defaults to the input directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Appended to each file stem (defaults to the configured suffix)
        #[arg(long)]
        suffix: Option<String>,
    },
    /// Print a stock imgmeta.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    imgmeta::init_logging();
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let cwd = std::env::current_dir()?;
    let config = config::load_config(cli.config.as_deref(), &cwd)?;
    let processor = ImageProcessor::from_config(&config);

    let code = match cli.command {
        Command::File {
            file_path,
            include_image,
            output,
        } => {
            if !file_path.exists() {
                return Ok(missing("File", &file_path));
            }
            let record = if include_image {
                processor.image_with_metadata(&file_path)
            } else {
                processor.metadata_for_file(&file_path)
            };
            emit_json(&record, output.as_deref(), "Metadata")?
        }
        Command::Directory {
            directory_path,
            output,
        } => {
            if !directory_path.is_dir() {
                return Ok(missing("Directory", &directory_path));
            }
            match output {
                Some(destination) => {
                    if processor.export_metadata_to_json(&directory_path, &destination) {
                        println!("Metadata saved to '{}'", destination.display());
                        ExitCode::SUCCESS
                    } else {
                        eprintln!("Error: Failed to save metadata to '{}'", destination.display());
                        ExitCode::FAILURE
                    }
                }
                None => {
                    output::print_json(&processor.metadata_for_directory(&directory_path))?;
                    ExitCode::SUCCESS
                }
            }
        }
        Command::Gallery {
            directory_path,
            include_images,
            output,
        } => {
            if !directory_path.is_dir() {
                return Ok(missing("Directory", &directory_path));
            }
            let gallery = processor.gallery(&directory_path, include_images);
            emit_json(&gallery, output.as_deref(), "Gallery")?
        }
        Command::Base64 { file_path, output } => {
            if !file_path.exists() {
                return Ok(missing("File", &file_path));
            }
            let encoded = encode_image_to_base64(&file_path).filter(|data| !data.is_empty());
            let Some(encoded) = encoded else {
                eprintln!("Error: Failed to encode '{}' to base64.", file_path.display());
                return Ok(ExitCode::FAILURE);
            };
            match output {
                Some(destination) => {
                    std::fs::write(&destination, encoded)?;
                    println!("Base64 data saved to '{}'", destination.display());
                }
                None => println!("{encoded}"),
            }
            ExitCode::SUCCESS
        }
        Command::Transform {
            directory_path,
            op,
            output_dir,
            suffix,
        } => {
            if !directory_path.is_dir() {
                return Ok(missing("Directory", &directory_path));
            }
            let report = processor.transform_images(
                &directory_path,
                &op,
                output_dir.as_deref(),
                suffix.as_deref(),
            )?;
            output::print_transform_report(&report, op.name());
            ExitCode::SUCCESS
        }
        Command::GenConfig => ExitCode::SUCCESS,
    };

    Ok(code)
}

fn missing(kind: &str, path: &Path) -> ExitCode {
    eprintln!("Error: {kind} '{}' does not exist.", path.display());
    ExitCode::FAILURE
}

/// Print `value` as JSON, or save it to `destination` and say so.
fn emit_json<T: Serialize>(
    value: &T,
    destination: Option<&Path>,
    label: &str,
) -> Result<ExitCode, serde_json::Error> {
    let Some(destination) = destination else {
        output::print_json(value)?;
        return Ok(ExitCode::SUCCESS);
    };
    match save_json(value, destination) {
        Ok(()) => {
            println!("{label} saved to '{}'", destination.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!(
                "Error: Failed to save {} to '{}': {e}",
                label.to_lowercase(),
                destination.display()
            );
            Ok(ExitCode::FAILURE)
        }
    }
}
