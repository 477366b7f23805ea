use std::{fs, path::PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use glyphpack::{
    encode_glyph,
    preview::{render_line, render_samples, PREVIEW_SCALE, PREVIEW_WIDTH},
    raster::FontdueRasterizer,
    BitOrder, ByteLayout, EncodeOptions, FontSpec, FontTable, PackError,
};
use log::{info, LevelFilter};

use crate::console::{render_blocks, save_png, stack};
mod console;

#[derive(Parser)]
#[command(name = "glyphpack", about = "Bitmap font encoder for 1-bit displays")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Args)]
struct FontArgs {
    /// TrueType/OpenType font file
    #[arg(short, long)]
    font: PathBuf,
    /// Font size in pixels per em
    #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(4..=64))]
    size: u32,
    /// Vertical offset of the text origin
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true,
          value_parser = clap::value_parser!(i32).range(-16..=16))]
    offset: i32,
    /// Bitmap height in rows (defaults to the font size)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=32))]
    height: Option<u32>,
    /// Trailing advance columns to strip from each glyph
    #[arg(long, default_value_t = glyphpack::DEFAULT_TRIM)]
    trim: u32,
}

impl FontArgs {
    fn spec(&self) -> FontSpec {
        FontSpec::new(&self.font, self.size)
            .with_offset(self.offset)
            .with_height(self.height.unwrap_or(self.size))
            .with_trim(self.trim)
    }
}

#[derive(Args)]
struct PackArgs {
    /// Put the top pixel of each group in bit 7 instead of bit 0
    #[arg(long)]
    msb_top: bool,
    /// Fail on non-integer advance widths instead of truncating
    #[arg(long)]
    strict: bool,
}

impl PackArgs {
    fn options(&self, columns: bool) -> EncodeOptions {
        EncodeOptions {
            bit_order: if self.msb_top {
                BitOrder::MsbTop
            } else {
                BitOrder::LsbTop
            },
            layout: if columns {
                ByteLayout::Columns
            } else {
                ByteLayout::RowGroups
            },
            strict_measurement: self.strict,
        }
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Encode a single character and print its bytes
    Encode {
        #[command(flatten)]
        font: FontArgs,
        #[command(flatten)]
        pack: PackArgs,
        /// Character to encode
        #[arg(short = 'c', long = "char", default_value = "a", value_parser = parse_char)]
        ch: char,
        /// Emit each column's bytes together instead of one pass per row group
        #[arg(long)]
        columns: bool,
        /// Also write the glyph as a scaled PNG
        #[arg(long)]
        png: Option<PathBuf>,
    },
    /// Render sample text to check size, offset and height
    Preview {
        #[command(flatten)]
        font: FontArgs,
        /// Text to render instead of the built-in sample lines
        #[arg(short, long)]
        text: Option<String>,
        /// Write the preview as a scaled PNG
        #[arg(long)]
        png: Option<PathBuf>,
    },
    /// Generate a C font table for a character range
    Table {
        #[command(flatten)]
        font: FontArgs,
        #[command(flatten)]
        pack: PackArgs,
        /// Identifier prefix of the generated arrays
        #[arg(short, long, default_value = "font")]
        name: String,
        #[arg(long, default_value_t = 32)]
        first: u8,
        #[arg(long, default_value_t = 126)]
        last: u8,
        /// Blank columns after each glyph
        #[arg(long, default_value_t = 1)]
        spacing: u8,
        /// Output file (stdout if omitted)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
    },
}

fn parse_char(s: &str) -> std::result::Result<char, PackError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(PackError::InvalidArgument(format!(
            "expected exactly one character, got {s:?}"
        ))),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Cmd::Encode {
            font,
            pack,
            ch,
            columns,
            png,
        } => {
            let spec = font.spec();
            spec.validate()?;
            let raster = FontdueRasterizer::open(spec.path())?;
            let glyph = encode_glyph(&raster, &spec, ch, &pack.options(columns))?;
            println!(
                "{:?}: {}x{} ({} bytes, advance {:?})",
                glyph.ch,
                glyph.width,
                glyph.height,
                glyph.bytes.len(),
                glyph.measurement
            );
            println!("{}", render_blocks(&glyph.bitmap));
            println!("{}", glyph.to_hex());
            if let Some(path) = png {
                save_png(&glyph.bitmap, PREVIEW_SCALE as u32, &path)?;
                info!("wrote {}", path.display());
            }
        }
        Cmd::Preview { font, text, png } => {
            let spec = font.spec();
            spec.validate()?;
            let raster = FontdueRasterizer::open(spec.path())?;
            let lines = match text {
                Some(text) => vec![render_line(&raster, &spec, &text, PREVIEW_WIDTH)?],
                None => render_samples(&raster, &spec)?,
            };
            for line in &lines {
                println!("{}", render_blocks(line));
            }
            if let Some(path) = png {
                save_png(&stack(&lines), PREVIEW_SCALE as u32, &path)?;
                info!("wrote {}", path.display());
            }
        }
        Cmd::Table {
            font,
            pack,
            name,
            first,
            last,
            spacing,
            output,
        } => {
            let spec = font.spec();
            spec.validate()?;
            let raster = FontdueRasterizer::open(spec.path())?;
            let table = FontTable::build(
                &raster,
                &spec,
                char::from(first),
                char::from(last),
                spacing,
                &pack.options(true),
            )?;
            let source = table.to_c_source(&name);
            match output {
                Some(path) => {
                    fs::write(&path, source)?;
                    eprintln!(
                        "Wrote {} glyphs ({} bytes) -> {}",
                        table.num_chars,
                        table.data.len(),
                        path.display()
                    );
                }
                None => print!("{source}"),
            }
        }
    }
    Ok(())
}
