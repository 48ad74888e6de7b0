//! vmsim - memory management policy simulator

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser as ClapParser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use vmsim::compare::{belady_anomalies, compare_policies};
use vmsim::input::{
    parse_reference_string, random_reference_string, validate_frames, validate_reference_length,
    DEFAULT_MAX_REFERENCE_LENGTH, MAX_FRAMES, MIN_FRAMES,
};
use vmsim::paging::{simulate_replacement, PageId, Policy};
use vmsim::segmentation::{simulate_segmentation, FitStrategy, SegmentRequest};
use vmsim::trace;

/// vmsim - page replacement and segmentation simulator
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print the result as JSON instead of a step table
    #[arg(long, global = true)]
    json: bool,

    /// Also write the full trace as JSON to this file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one page-replacement policy
    Paging {
        /// Replacement policy
        #[arg(short, long, value_enum, default_value = "fifo")]
        policy: Policy,

        #[command(flatten)]
        reference: ReferenceArgs,
    },

    /// Run FIFO, LRU and Optimal over the same input
    Compare {
        #[command(flatten)]
        reference: ReferenceArgs,

        /// Largest frame count scanned for Belady's anomaly (0 disables)
        #[arg(long, default_value = "0")]
        anomaly_max_frames: usize,
    },

    /// Run the segmentation allocator
    Segment {
        /// Placement strategy
        #[arg(short, long, value_enum, default_value = "first-fit")]
        strategy: FitStrategy,

        /// Total memory size
        #[arg(short, long, default_value = "1000")]
        memory: usize,

        /// Requests such as "1:100 2:50 -1"
        #[arg(short, long)]
        requests: String,
    },
}

#[derive(ClapArgs, Debug)]
struct ReferenceArgs {
    /// Number of physical frames
    #[arg(short, long, default_value = "3")]
    frames: i64,

    /// Page reference string, e.g. "7 0 1 2 0 3"
    #[arg(short, long, conflicts_with = "random")]
    refs: Option<String>,

    /// Generate a random reference string of this length
    #[arg(long)]
    random: Option<usize>,

    /// Highest page number used by --random
    #[arg(long, default_value = "9")]
    max_page: u64,

    /// Seed for --random
    #[arg(long, default_value = "42")]
    seed: u64,
}

impl ReferenceArgs {
    fn resolve(&self) -> Result<(Vec<PageId>, usize)> {
        let frames = validate_frames(self.frames, MIN_FRAMES, MAX_FRAMES)?;
        let requests = match (&self.refs, self.random) {
            (Some(text), _) => parse_reference_string(text, DEFAULT_MAX_REFERENCE_LENGTH)
                .context("Failed to parse reference string")?,
            (None, Some(length)) => {
                let length = validate_reference_length(length, DEFAULT_MAX_REFERENCE_LENGTH)
                    .context("Invalid --random length")?;
                random_reference_string(length, self.max_page, self.seed)
            }
            (None, None) => bail!("Provide a reference string with --refs or --random"),
        };
        Ok((requests, frames))
    }
}

/// 0 disables the scan; otherwise the same bounds as `--frames`.
fn validate_anomaly_frames(max_frames: usize) -> Result<()> {
    if max_frames > 0 {
        let requested = i64::try_from(max_frames).unwrap_or(i64::MAX);
        validate_frames(requested, MIN_FRAMES, MAX_FRAMES)
            .context("Invalid --anomaly-max-frames")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match &args.command {
        Command::Paging { policy, reference } => {
            let (requests, frames) = reference.resolve()?;
            let outcome = simulate_replacement(*policy, &requests, frames)
                .context("Page replacement simulation failed")?;

            if args.json {
                print_json(&outcome)?;
            } else {
                println!("{} with {} frames", outcome.policy, outcome.frame_count);
                println!("   #    page  result frames");
                for step in &outcome.steps {
                    println!("{}", step);
                }
                println!(
                    "Total: {} faults, {} hits (hit ratio {:.2})",
                    outcome.total_faults,
                    outcome.total_hits,
                    outcome.hit_ratio()
                );
            }
            export(args.output.as_deref(), &outcome)?;
        }

        Command::Compare {
            reference,
            anomaly_max_frames,
        } => {
            let (requests, frames) = reference.resolve()?;
            validate_anomaly_frames(*anomaly_max_frames)?;
            let summaries =
                compare_policies(&requests, frames).context("Policy comparison failed")?;

            if args.json {
                print_json(&summaries)?;
            } else {
                println!("{} requests, {} frames", requests.len(), frames);
                for summary in &summaries {
                    println!(
                        "{:<8} faults={:<5} hits={:<5} hit ratio={:.2}",
                        summary.policy.to_string(),
                        summary.faults,
                        summary.hits,
                        summary.hit_ratio
                    );
                }
                if *anomaly_max_frames > 0 {
                    for policy in Policy::ALL {
                        for anomaly in belady_anomalies(policy, &requests, *anomaly_max_frames)? {
                            println!(
                                "{}: Belady's anomaly, {} frames -> {} faults but {} frames -> {} faults",
                                policy,
                                anomaly.frames,
                                anomaly.faults,
                                anomaly.frames + 1,
                                anomaly.faults_with_one_more
                            );
                        }
                    }
                }
            }

            export(args.output.as_deref(), &summaries)?;
        }

        Command::Segment {
            strategy,
            memory,
            requests,
        } => {
            let requests = SegmentRequest::parse_list(requests);
            let outcome = simulate_segmentation(&requests, *memory, *strategy)
                .context("Segmentation simulation failed")?;

            if args.json {
                print_json(&outcome)?;
            } else {
                println!("{} over {} units", outcome.strategy, outcome.total_memory_size);
                for step in &outcome.steps {
                    println!("{}", step);
                }
                if let Some(last) = outcome.steps.last() {
                    println!(
                        "External fragmentation: {} free in {} block(s) (ratio {:.2})",
                        last.total_free_bytes,
                        last.segments.iter().filter(|s| s.is_free()).count(),
                        last.fragmentation_ratio()
                    );
                }
            }
            export(args.output.as_deref(), &outcome)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", text);
    Ok(())
}

fn export<T: Serialize>(path: Option<&Path>, value: &T) -> Result<()> {
    if let Some(path) = path {
        trace::write_json(path, value)
            .with_context(|| format!("Failed to write trace to {}", path.display()))?;
        log::info!("Trace written to {}", path.display());
    }
    Ok(())
}
