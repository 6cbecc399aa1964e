//! # CLI
//!
//! Lists demos the way a catalog shows them. Each demo is read into memory and parsed on a rayon
//! worker. Demos that can't be parsed are still listed, flagged as invalid, so a listing always
//! has one line (or JSON object) per input.
use anyhow::{Context, Result};
use clap::Parser;
use quakedemo::{charmap, DemoFormat, DemoItem, ParserBuilder};
use rayon::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "qdemo",
    version,
    about = "Extracts the map details of Quake demos (.dem, .qwd, .mvd)"
)]
struct Opt {
    /// Output catalog items as JSON
    #[arg(short, long)]
    json: bool,

    /// Show map titles byte for byte instead of translating the console font
    #[arg(long)]
    raw_titles: bool,

    /// Demos larger than this many bytes are listed as invalid without being read
    #[arg(long, default_value_t = 64 * 1024 * 1024)]
    max_size: u64,

    /// Number of threads to parse with. Defaults to one per cpu
    #[arg(short, long)]
    threads: Option<usize>,

    /// Demo files
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

fn read_demo(path: &Path, max_size: u64) -> Result<Vec<u8>> {
    let size = fs::metadata(path)
        .with_context(|| format!("unable to stat {}", path.display()))?
        .len();

    if size > max_size {
        anyhow::bail!("demo of {} bytes exceeds the limit of {}", size, max_size);
    }

    fs::read(path).with_context(|| format!("unable to read {}", path.display()))
}

fn catalog_item(path: &Path, opt: &Opt) -> DemoItem {
    let file_name = path.to_string_lossy();
    let format = match DemoFormat::from_file_name(&file_name) {
        Ok(format) => format,
        Err(e) => return DemoItem::from_outcome(&file_name, Err(e)),
    };

    let data = match read_demo(path, opt.max_size) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("{:#}", e);
            return DemoItem::invalid(&file_name, &format!("{:#}", e), true);
        }
    };

    let char_map = if opt.raw_titles {
        charmap::latin1
    } else {
        charmap::quake
    };

    let outcome = ParserBuilder::new(&data)
        .with_format(format)
        .with_char_map(char_map)
        .parse(&file_name);

    if let Ok(None) = outcome {
        tracing::info!("{} is not a valid {} demo", file_name, format.extension());
    }

    DemoItem::from_outcome(&file_name, outcome)
}

fn run() -> Result<()> {
    let opt = Opt::parse();
    if let Some(threads) = opt.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("unable to configure the thread pool")?;
    }

    let items: Vec<DemoItem> = opt
        .input
        .par_iter()
        .map(|path| catalog_item(path, &opt))
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if opt.json {
        serde_json::to_writer_pretty(&mut out, &items)?;
        writeln!(out)?;
    } else {
        for item in &items {
            let marker = if item.is_invalid { '!' } else { ' ' };
            writeln!(out, "{} {}", marker, item.title)?;
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Opt::command().debug_assert();
    }

    #[test]
    fn parse_args() {
        let opt = Opt::try_parse_from(["qdemo", "--json", "--max-size", "1024", "a.dem", "b.qwd"])
            .unwrap();
        assert!(opt.json);
        assert!(!opt.raw_titles);
        assert_eq!(opt.max_size, 1024);
        assert_eq!(opt.input, vec![PathBuf::from("a.dem"), PathBuf::from("b.qwd")]);

        assert!(Opt::try_parse_from(["qdemo"]).is_err());
    }

    #[test]
    fn catalog_items() {
        let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets/demos");
        let opt = Opt::try_parse_from(["qdemo", "x.dem"]).unwrap();

        let item = catalog_item(&assets.join("good/dm3.mvd"), &opt);
        assert!(!item.is_invalid);
        assert_eq!(item.map_title, "[The Abandoned Base]");

        let item = catalog_item(&assets.join("bad/truncated.dem"), &opt);
        assert!(item.is_invalid);
        assert!(item.title.ends_with("| invalid or corrupted demo"));

        let item = catalog_item(&assets.join("missing.qwd"), &opt);
        assert!(item.is_invalid);

        let item = catalog_item(Path::new("notes.txt"), &opt);
        assert!(item.is_invalid);
        assert!(item.title.ends_with("Unsupported demo type: .txt"));

        let opt = Opt::try_parse_from(["qdemo", "--max-size", "10", "x.dem"]).unwrap();
        let item = catalog_item(&assets.join("good/e1m1.dem"), &opt);
        assert!(item.is_invalid);
    }
}
