use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info};
use zenbmp2c::emit::{self, CSourceOptions};
use zenbmp2c::{BitOrder, BitmapError, ConvertRequest, Limits, Options, Unstoppable};

#[derive(Clone, Copy, Eq, PartialEq, ValueEnum)]
enum BitOrderArg {
    /// Leftmost pixel in the most significant bit
    Msb,
    /// Leftmost pixel in the least significant bit
    Lsb,
}

impl From<BitOrderArg> for BitOrder {
    fn from(arg: BitOrderArg) -> Self {
        match arg {
            BitOrderArg::Msb => BitOrder::MsbFirst,
            BitOrderArg::Lsb => BitOrder::LsbFirst,
        }
    }
}

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// A path to the 1bpp bmp file
    input: PathBuf,

    /// A path to the generated C header (stdout when omitted)
    output: Option<PathBuf>,

    /// Bit order of the packed bytes
    #[arg(short, long, value_enum, default_value_t = BitOrderArg::Msb)]
    bit_order: BitOrderArg,

    /// Also emit the 2-entry palette array
    #[arg(short, long)]
    palette: bool,

    /// Symbol prefix for the generated defines and arrays
    #[arg(short, long, default_value = emit::DEFAULT_NAME, value_parser = parse_name)]
    name: String,

    /// Refuse images wider than this many pixels
    #[arg(long)]
    max_width: Option<u64>,

    /// Refuse images taller than this many rows
    #[arg(long)]
    max_height: Option<u64>,

    /// Refuse images with more than this many pixels
    #[arg(long)]
    max_pixels: Option<u64>,
}

fn parse_name(s: &str) -> Result<String, String> {
    if emit::is_c_identifier(s) {
        Ok(s.to_owned())
    } else {
        Err(format!("{s:?} is not a valid C identifier"))
    }
}

fn run(args: &Args) -> Result<(), BitmapError> {
    let options = Options {
        bit_order: args.bit_order.into(),
        include_palette: args.palette,
    };
    let limits = Limits {
        max_width: args.max_width,
        max_height: args.max_height,
        max_pixels: args.max_pixels,
        ..Default::default()
    };

    let conversion = ConvertRequest::new(options)
        .with_limits(&limits)
        .convert_file(&args.input, Unstoppable)?;

    let source = args.input.file_name().map(|n| n.to_string_lossy());
    let text = emit::render_c_source(
        &conversion,
        &CSourceOptions {
            name: &args.name,
            source: source.as_deref(),
        },
    )?;

    let destination = match &args.output {
        Some(path) => {
            zenbmp2c::output::write_atomically(path, &text)?;
            path.display().to_string()
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&text)?;
            stdout.flush()?;
            "stdout".to_owned()
        }
    };

    info!(
        "Converted {} -> {} ({}x{})",
        args.input.display(),
        destination,
        conversion.width(),
        conversion.height()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}: {e}", args.input.display());
            ExitCode::FAILURE
        }
    }
}
