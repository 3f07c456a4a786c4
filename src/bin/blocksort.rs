//! blocksort CLI
//!
//! Sorts a binary record file in place and prints a sample of the sorted
//! contents plus the cache statistics.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process;

use bytes::Buf;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use blocksort::{sort_file, Config, Result, SortReport, BLOCK_BYTES};

/// Records printed per output line
const RECORDS_PER_LINE: u64 = 8;

/// blocksort
#[derive(Parser, Debug)]
#[command(name = "blocksort")]
#[command(about = "Heap-sort a binary record file through an LRU buffer pool")]
#[command(version)]
struct Args {
    /// File of 4-byte records (big-endian i16 key + i16 value) to sort
    file: PathBuf,

    /// Number of blocks the buffer pool may hold
    #[arg(short, long, default_value = "4")]
    buffers: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,blocksort=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("blocksort v{}", blocksort::VERSION);
    tracing::info!("File: {}", args.file.display());
    tracing::info!("Buffers: {}", args.buffers);

    let config = Config::builder().pool_capacity(args.buffers).build();

    let report = match sort_file(&args.file, &config) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Sort failed: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = print_report(&args.file, &report) {
        tracing::error!("Failed to report results: {}", e);
        process::exit(1);
    }
}

/// Print the first record of every block, then the stats section
fn print_report(path: &Path, report: &SortReport) -> Result<()> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();

    let mut printed = 0u64;
    let mut offset = 0u64;
    while offset + 4 <= len {
        if printed % RECORDS_PER_LINE != 0 {
            print!("    ");
        }
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = [0u8; 4];
        file.read_exact(&mut buf)?;
        let mut bytes = &buf[..];
        print!("{} {}", bytes.get_i16(), bytes.get_i16());
        printed += 1;
        if printed % RECORDS_PER_LINE == 0 {
            println!();
        }
        offset += BLOCK_BYTES;
    }
    if printed % RECORDS_PER_LINE != 0 {
        println!();
    }

    println!();
    println!("STATS");
    println!("File name: {}", path.display());
    println!("Records: {}", report.record_count);
    println!("Cache hits: {}", report.stats.hits);
    println!("Cache misses: {}", report.stats.misses);
    println!("Disk reads: {}", report.stats.misses);
    println!("Disk writes: {}", report.stats.writes);
    println!("Time to sort: {} ms", report.elapsed.as_millis());
    Ok(())
}
