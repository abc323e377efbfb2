use std::{
    fs::File,
    io::{BufReader, Read},
    path::PathBuf,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use bc7_decode::{decode_with_settings, DecodeSettings, Rgba8};
use clap::Parser;
use ddsfile::{Dds, DxgiFormat};
use env_logger::Env;
use image::{ExtendedColorType, ImageFormat};
use log::{debug, info};

/// Decodes a BC7 texture and writes it as a PNG.
#[derive(Debug, Parser)]
#[command(name = "decompressor", version)]
struct Args {
    /// Input file: a DDS texture, or raw blocks with `--raw`
    input: PathBuf,

    /// Output PNG [default: the input path with a `png` extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat the input as headerless blocks in raster order
    #[arg(long, requires_all = ["width", "height"])]
    raw: bool,

    /// Image width in pixels (raw input only)
    #[arg(long, requires = "raw")]
    width: Option<u32>,

    /// Image height in pixels (raw input only)
    #[arg(long, requires = "raw")]
    height: Option<u32>,

    /// Color of reserved blocks as RRGGBBAA hex
    #[arg(long, value_parser = parse_color, default_value = "00000000")]
    reserved_color: Rgba8,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Compressed input with its dimensions.
struct Texture {
    width: u32,
    height: u32,
    blocks: Vec<u8>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let start = Instant::now();

    let texture = if args.raw {
        read_raw(&args)?
    } else {
        read_dds(&args)?
    };

    info!(
        "Read {}x{} texture in {:.3} ms",
        texture.width,
        texture.height,
        start.elapsed().as_secs_f64() * 1000.0
    );

    let start = Instant::now();

    let settings = DecodeSettings::new().with_reserved_color(args.reserved_color);
    let bitmap = decode_with_settings(texture.width, texture.height, &texture.blocks, &settings)
        .with_context(|| format!("failed to decode {}", args.input.display()))?;

    info!(
        "Decoding took {:.3} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("png"));

    let start = Instant::now();

    image::save_buffer_with_format(
        &output,
        bitmap.as_bytes(),
        bitmap.width(),
        bitmap.height(),
        ExtendedColorType::Rgba8,
        ImageFormat::Png,
    )
    .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        "PNG output to {} took {:.3} ms",
        output.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

fn read_raw(args: &Args) -> Result<Texture> {
    let (Some(width), Some(height)) = (args.width, args.height) else {
        bail!("raw input needs --width and --height");
    };

    let blocks = std::fs::read(&args.input)
        .with_context(|| format!("can't read {}", args.input.display()))?;

    Ok(Texture {
        width,
        height,
        blocks,
    })
}

fn read_dds(args: &Args) -> Result<Texture> {
    let file = File::open(&args.input)
        .with_context(|| format!("can't open {}", args.input.display()))?;

    read_dds_texture(BufReader::new(file))
        .with_context(|| format!("can't load {}", args.input.display()))
}

/// Parses a DDS stream and returns the blocks of its first array layer.
fn read_dds_texture<R: Read>(reader: R) -> Result<Texture> {
    let dds = Dds::read(reader).context("can't parse DDS file")?;

    match dds.get_dxgi_format() {
        Some(DxgiFormat::BC7_Typeless | DxgiFormat::BC7_UNorm | DxgiFormat::BC7_UNorm_sRGB) => {}
        Some(format) => bail!("unsupported DXGI format {format:?}, expected BC7"),
        None => bail!("DDS file has no DXGI header, expected a BC7 texture"),
    }

    debug!(
        "DDS header: {} mip levels, {} array layers",
        dds.get_num_mipmap_levels(),
        dds.get_num_array_layers()
    );

    // The first layer starts with the top mip level, smaller levels follow and are ignored.
    let blocks = dds
        .get_data(0)
        .context("DDS file holds no texture data")?
        .to_vec();

    Ok(Texture {
        width: dds.get_width(),
        height: dds.get_height(),
        blocks,
    })
}

fn parse_color(value: &str) -> Result<Rgba8, String> {
    let digits = value.trim_start_matches('#');
    if digits.len() != 8 {
        return Err(format!("expected 8 hex digits (RRGGBBAA), got {value:?}"));
    }

    u32::from_str_radix(digits, 16)
        .map(|rgba| Rgba8::from(rgba.to_be_bytes()))
        .map_err(|error| format!("invalid color {value:?}: {error}"))
}
