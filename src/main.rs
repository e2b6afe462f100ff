//! powgate CLI
//!
//! A command-line front end for the proof-of-work engine.
//!
//! # Commands
//!
//! - `challenge` - Issue a fresh challenge and target
//! - `solve` - Search for a valid nonce
//! - `verify` - Check a claimed solution
//! - `benchmark` - Measure local hash rate

use clap::{Parser, Subcommand};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use powgate::{pow_digest, target_for, verify, Challenge, ControllerConfig, PowEngine, Solver};

#[derive(Parser)]
#[command(name = "powgate")]
#[command(version = "0.1.0")]
#[command(about = "Proof-of-work admission engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a fresh challenge and print it with its target
    Challenge {
        /// Difficulty level (leading required bits)
        #[arg(short, long, default_value = "8")]
        difficulty: u16,
    },

    /// Search for a nonce satisfying the target
    Solve {
        /// Hex-encoded 32-byte challenge
        #[arg(long)]
        challenge: String,

        /// Difficulty level
        #[arg(short, long, default_value = "8")]
        difficulty: u16,

        /// Number of worker threads (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Verify a claimed solution
    Verify {
        /// Hex-encoded 32-byte challenge
        #[arg(long)]
        challenge: String,

        /// The claimed nonce
        #[arg(long)]
        nonce: u32,

        /// Difficulty level the solution was issued at
        #[arg(short, long, default_value = "8")]
        difficulty: u16,
    },

    /// Measure local single-thread hash rate
    Benchmark {
        /// Number of digests to compute
        #[arg(short, long, default_value = "1000000")]
        count: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Challenge { difficulty } => cmd_challenge(difficulty),
        Commands::Solve {
            challenge,
            difficulty,
            threads,
        } => cmd_solve(&challenge, difficulty, threads),
        Commands::Verify {
            challenge,
            nonce,
            difficulty,
        } => cmd_verify(&challenge, nonce, difficulty),
        Commands::Benchmark { count } => cmd_benchmark(count),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_challenge(hex_str: &str) -> anyhow::Result<Challenge> {
    let bytes = hex::decode(hex_str)?;
    let challenge: Challenge = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("challenge must be exactly 32 bytes"))?;
    Ok(challenge)
}

fn cmd_challenge(difficulty: u16) -> anyhow::Result<()> {
    let engine = PowEngine::new(ControllerConfig {
        initial_difficulty: difficulty,
        ..ControllerConfig::default()
    });
    let ctx = engine.issue(unix_now())?;

    println!("Challenge:  {}", hex::encode(ctx.challenge));
    println!("Target:     {}", hex::encode(ctx.target));
    println!("Difficulty: {}", ctx.difficulty);

    Ok(())
}

fn cmd_solve(challenge_hex: &str, difficulty: u16, threads: Option<usize>) -> anyhow::Result<()> {
    let challenge = parse_challenge(challenge_hex)?;
    let target = target_for(difficulty);
    let num_threads = threads.unwrap_or_else(num_cpus::get);

    println!("Solving at difficulty {} with {} threads...", difficulty, num_threads);

    let attempts = AtomicU64::new(0);
    let start = Instant::now();
    let solution = Solver::new(num_threads).solve(&challenge, &target, &attempts)?;
    let elapsed = start.elapsed();

    let total = attempts.load(Ordering::Relaxed);
    println!("\nFound valid nonce!");
    println!("Nonce:    {}", solution.nonce);
    println!("Hash:     {}", hex::encode(solution.hash));
    println!("Attempts: {}", total);
    println!(
        "Time:     {:.2}s ({:.0} H/s)",
        elapsed.as_secs_f64(),
        total as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    Ok(())
}

fn cmd_verify(challenge_hex: &str, nonce: u32, difficulty: u16) -> anyhow::Result<()> {
    let challenge = parse_challenge(challenge_hex)?;
    let target = target_for(difficulty);

    if verify(&challenge, nonce, &target) {
        println!("Valid solution");
        println!("Hash: {}", hex::encode(pow_digest(&challenge, nonce)));
        Ok(())
    } else {
        anyhow::bail!("invalid solution for difficulty {}", difficulty)
    }
}

fn cmd_benchmark(count: u64) -> anyhow::Result<()> {
    println!("Running benchmark with {} digests...", count);

    let challenge = [0u8; 32];
    let start = Instant::now();

    for nonce in 0..count {
        std::hint::black_box(pow_digest(&challenge, nonce as u32));
    }

    let elapsed = start.elapsed();
    let hashrate = count as f64 / elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Total digests: {}", count);
    println!("  Time elapsed:  {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate:      {:.0} H/s", hashrate);

    Ok(())
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
