//! Command-line front end for the G.722 bindings
//!
//! `g722 convert` encodes or decodes raw files block by block through one
//! codec session; `g722 build-config` prints the resolved build plan.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use g722_build_config::{BuildEnv, BuildPlan, GitCli, TargetPlatform};
use g722_codec_core::{
    ByteOrder, CodecSession, ElementType, HostValue, OutputPreference, TypedArray,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// PCM bytes read per encode call
const PCM_BLOCK_BYTES: usize = 2048;

/// Code bytes read per decode call
const CODE_BLOCK_BYTES: usize = 1024;

/// G.722 codec utility
#[derive(Parser, Debug)]
#[command(name = "g722", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode raw PCM to G.722, or decode G.722 to raw PCM
    Convert(ConvertArgs),
    /// Print the resolved build configuration as JSON
    BuildConfig(BuildConfigArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input file path
    input: PathBuf,

    /// Output file path
    output: PathBuf,

    /// Use 16000 Hz sample rate
    #[arg(long)]
    sln16k: bool,

    /// Encode mode
    #[arg(long)]
    encode: bool,

    /// Use big-endian byte order for PCM
    #[arg(long)]
    bend: bool,

    /// Coded bit rate (48000, 56000 or 64000)
    #[arg(long, default_value_t = 64000)]
    bit_rate: u32,
}

#[derive(Args, Debug)]
struct BuildConfigArgs {
    /// Repository checkout to inspect
    #[arg(long, default_value = ".")]
    repo_dir: PathBuf,

    /// Target triple or platform tag (defaults to the host)
    #[arg(long)]
    target: Option<String>,

    /// Declared package version
    #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
    version: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Convert(args) => convert(&args),
        Command::BuildConfig(args) => build_config(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn convert(args: &ConvertArgs) -> Result<()> {
    let sample_rate = if args.sln16k { 16000 } else { 8000 };
    let order = if args.bend { ByteOrder::Big } else { ByteOrder::Little };

    let mut session = CodecSession::new(sample_rate, args.bit_rate, OutputPreference::ForceSimple)
        .context("Failed to create codec session")?;
    info!(sample_rate, bit_rate = args.bit_rate, encode = args.encode, %order, "Converting");

    let input = File::open(&args.input)
        .with_context(|| format!("Cannot open {}", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("Cannot create {}", args.output.display()))?;
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);

    let block_size = if args.encode { PCM_BLOCK_BYTES } else { CODE_BLOCK_BYTES };
    let mut block = vec![0u8; block_size];
    let mut blocks = 0usize;

    loop {
        let len = read_block(&mut reader, &mut block, &args.input)?;
        if len == 0 {
            break;
        }

        let out = if args.encode {
            let pcm = TypedArray::new(ElementType::I16, order, block[..len].to_vec())
                .with_context(|| format!("Block {} of {}", blocks, args.input.display()))?;
            session.encode(&HostValue::from(pcm))?.to_vec()
        } else {
            session.decode_bytes(&block[..len]).to_bytes(order)
        };

        writer
            .write_all(&out)
            .with_context(|| format!("Cannot write {}", args.output.display()))?;
        blocks += 1;
    }

    writer
        .flush()
        .with_context(|| format!("Cannot write {}", args.output.display()))?;
    debug!(blocks, "Conversion finished");
    Ok(())
}

/// Fill `buf` from `reader`; a short count means end of input
fn read_block<R: Read>(reader: &mut R, buf: &mut [u8], path: &Path) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader
            .read(&mut buf[filled..])
            .with_context(|| format!("Cannot read {}", path.display()))?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

fn build_config(args: &BuildConfigArgs) -> Result<()> {
    let platform = match &args.target {
        Some(target) => target.parse::<TargetPlatform>()?,
        None => TargetPlatform::host(),
    };

    let plan = BuildPlan::resolve(
        &BuildEnv::from_env(),
        &GitCli::new(),
        &args.repo_dir,
        &args.version,
        platform,
    )
    .context("Failed to resolve build configuration")?;

    println!("{}", plan.to_json_pretty()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "g722", "convert", "in.raw", "out.g722", "--encode", "--sln16k", "--bend",
        ])
        .unwrap();
        match cli.command {
            Command::Convert(args) => {
                assert!(args.encode && args.sln16k && args.bend);
                assert_eq!(args.bit_rate, 64000);
            }
            _ => panic!("expected convert"),
        }

        let cli = Cli::try_parse_from(["g722", "build-config", "--target", "win-amd64"]).unwrap();
        assert!(matches!(cli.command, Command::BuildConfig(_)));
    }

    #[test]
    fn test_convert_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("in.raw");
        let coded = dir.path().join("out.g722");
        let decoded = dir.path().join("out.raw");

        // 5000 samples spans several blocks and a short final block
        let pcm: Vec<u8> = (0..5000i32)
            .map(|i| ((i * 37) % 4000 - 2000) as i16)
            .flat_map(|s| s.to_be_bytes())
            .collect();
        fs::write(&raw, &pcm).unwrap();

        let encode = ConvertArgs {
            input: raw.clone(),
            output: coded.clone(),
            sln16k: true,
            encode: true,
            bend: true,
            bit_rate: 56000,
        };
        convert(&encode).unwrap();
        assert_eq!(fs::metadata(&coded).unwrap().len(), 2500);

        let decode = ConvertArgs {
            input: coded,
            output: decoded.clone(),
            sln16k: true,
            encode: false,
            bend: true,
            bit_rate: 56000,
        };
        convert(&decode).unwrap();
        assert_eq!(fs::metadata(&decoded).unwrap().len(), 10000);
    }

    #[test]
    fn test_convert_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let args = ConvertArgs {
            input: dir.path().join("missing.raw"),
            output: dir.path().join("out.g722"),
            sln16k: false,
            encode: true,
            bend: false,
            bit_rate: 64000,
        };
        let err = convert(&args).unwrap_err();
        assert!(err.to_string().contains("missing.raw"));
    }

    #[test]
    fn test_convert_bad_bit_rate() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.raw");
        fs::write(&input, [0u8; 4]).unwrap();
        let args = ConvertArgs {
            input,
            output: dir.path().join("out.g722"),
            sln16k: false,
            encode: true,
            bend: false,
            bit_rate: 32000,
        };
        assert!(convert(&args).is_err());
    }
}
