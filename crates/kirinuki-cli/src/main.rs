//! Knock out the background of a raster image: decode, run the cutout
//! pipeline, and save the result as a transparent PNG.

use std::path::PathBuf;

use clap::Parser;
use kirinuki_pipeline::{KnockoutConfig, decode_rgba, knockout};

/// Remove the background from a subject-on-light-backdrop image,
/// producing a transparent cutout.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input image path (PNG, JPEG, BMP, or WebP).
    input: PathBuf,

    /// Output image path (PNG recommended; alpha is lost otherwise).
    #[arg(short, long)]
    output: PathBuf,

    /// Ink luma threshold: pixels at or below this brightness count as
    /// definite subject ink before blending with the automatic estimate.
    #[arg(long, default_value_t = 64)]
    ink: u8,

    /// Ink mask shaping: positive dilates the ink mask by that many
    /// passes, negative erodes, zero leaves it as detected.
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    gap: i32,

    /// Sobel gradient magnitude at or above which a pixel counts as an
    /// edge when building the flood barrier.
    #[arg(long, default_value_t = 18)]
    edge: u8,

    /// Background color tolerance (reserved; currently inert).
    #[arg(long, default_value_t = 24)]
    bg_tol: u8,

    /// Gaussian sigma applied to the alpha channel to soften the cutout
    /// boundary. Zero or negative keeps the alpha hard-edged.
    #[arg(long, default_value_t = 1.2)]
    feather: f32,

    /// Transparent padding around the cutout (reserved; currently inert).
    #[arg(long, default_value_t = 24)]
    padding: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = KnockoutConfig {
        ink: args.ink,
        gap: args.gap,
        edge: args.edge,
        bg_tol: args.bg_tol,
        feather: args.feather,
        padding: args.padding,
    };

    eprintln!("Reading image from {}", args.input.display());
    let image_bytes = std::fs::read(&args.input)?;

    let source = decode_rgba(&image_bytes)?;
    let (width, height) = source.dimensions();
    eprintln!("Decoded {width}x{height}, knocking out background...");

    let result = knockout(&source, &config);

    eprintln!("Saving to {}", args.output.display());
    result.image.save(&args.output)?;

    eprintln!("Done.");
    Ok(())
}
