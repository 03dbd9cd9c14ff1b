//! Catalog Benchmarking Tool
//!
//! Measures how long a catalog takes to build and how fast queries resolve
//! against it, using a real dataset export. The numbers approximate what a
//! user sees per keystroke once input has settled.
//!
//! ## What It Benchmarks
//!
//! 1. **Build**: validation, normalization and index construction
//! 2. **Search**: query planning (index lookup, guard, facet filter)
//! 3. **Filter only**: a blank query with a facet filter, which scans every
//!    record
//!
//! ## Usage
//!
//! ```bash
//! # Default query set
//! ./target/release/catalog_bench /path/to/records.json
//!
//! # Custom config and queries
//! ./target/release/catalog_bench /path/to/records.json config.json ingenieria "medicina bogota"
//!
//! # Show build and cap events
//! RUST_LOG=catalog_core=debug ./target/release/catalog_bench /path/to/records.json
//! ```
//!
//! A second argument ending in `.json` is read as a `CatalogConfig`; every
//! other argument is a query.
//!
//! ## Example Output
//!
//! ```text
//! === Search ===
//! --------------------------------
//! Query       : "ingenieria"
//! Results     : 1_204
//! Latency     : 38.2 µs
//! --------------------------------
//! ```

use std::env;
use std::fs;
use std::io;
use std::time::{Duration, Instant};

use catalog_core::{Catalog, CatalogConfig, FilterSpec, Record};
use tracing_subscriber::EnvFilter;

const WARMUP_RUNS: usize = 3;
const MEASURE_RUNS: usize = 50;

const DEFAULT_QUERIES: &[&str] = &[
    "ingenieria",
    "ing",
    "medicina",
    "administracion de empresas",
    "bogota",
    "virtual",
    "a",
];

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: catalog_bench <records.json> [config.json] [query...]");
        std::process::exit(1);
    }

    let path = &args[1];
    let mut rest = &args[2..];

    let config = match rest.first() {
        Some(arg) if arg.ends_with(".json") => {
            rest = &rest[1..];
            load_config(arg)?
        }
        _ => CatalogConfig::default(),
    };

    let queries: Vec<&str> = if rest.is_empty() {
        DEFAULT_QUERIES.to_vec()
    } else {
        rest.iter().map(String::as_str).collect()
    };

    println!("Loading file...");
    let bytes = fs::read(path)?;
    let records: Vec<Record> = serde_json::from_slice(&bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{path}: {e}")))?;

    println!("File size: {}", fmt_bytes(bytes.len() as u64));
    println!("Records:   {}\n", fmt_count(records.len() as u64));

    let catalog = bench_build(records, config)?;
    println!("Index:     {}\n", catalog.stats());

    bench_search(&catalog, &queries);
    bench_filter(&catalog);

    Ok(())
}

fn load_config(path: &str) -> io::Result<CatalogConfig> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{path}: {e}")))
}

fn bench_build(records: Vec<Record>, config: CatalogConfig) -> io::Result<Catalog> {
    println!("=== Build ===");

    let start = Instant::now();
    let catalog = Catalog::with_config(records, config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let elapsed = start.elapsed();

    println!("--------------------------------");
    println!("Elapsed     : {}", fmt_duration(elapsed));
    println!(
        "Records/sec : {}",
        fmt_count((catalog.len() as f64 / elapsed.as_secs_f64()) as u64)
    );
    println!("--------------------------------\n");

    Ok(catalog)
}

fn bench_search(catalog: &Catalog, queries: &[&str]) {
    let filter = FilterSpec::new();

    println!("=== Search ===");

    for query in queries {
        warmup(|| {
            std::hint::black_box(catalog.search(query, &filter));
        });

        let mut results = 0;
        let elapsed = measure(|| {
            let docs = catalog.search(query, &filter);
            results = docs.len();
            std::hint::black_box(docs);
        });

        print_perf(&format!("{query:?}"), results, elapsed);
    }
}

fn bench_filter(catalog: &Catalog) {
    let Some(city) = catalog.distinct_cities().first().map(|c| c.to_string()) else {
        return;
    };
    let filter = FilterSpec::new()
        .with_city_query(city.as_str())
        .with_max_tuition(10_000_000);

    println!("=== Filter only ===");

    warmup(|| {
        std::hint::black_box(catalog.search("", &filter));
    });

    let mut results = 0;
    let elapsed = measure(|| {
        let docs = catalog.search("", &filter);
        results = docs.len();
        std::hint::black_box(docs);
    });

    print_perf(&format!("city~{city:?}"), results, elapsed);
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, results: usize, elapsed: Duration) {
    println!("--------------------------------");
    println!("Query       : {}", label);
    println!("Results     : {}", fmt_count(results as u64));
    println!("Latency     : {}", fmt_duration(elapsed));
    println!("--------------------------------\n");
}

fn fmt_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs >= 1.0 {
        format!("{:.3} s", secs)
    } else if secs >= 1e-3 {
        format!("{:.2} ms", secs * 1e3)
    } else {
        format!("{:.1} µs", secs * 1e6)
    }
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
