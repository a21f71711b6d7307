use std::io::{self, Write};
use std::time::Duration;

use crate::config::TargetConfig;
use crate::results::RunResults;

const BAR_WIDTH: usize = 40;

pub fn banner(config: &TargetConfig) {
    println!("=============================================");
    println!("Starting concurrent load test");
    match &config.virtual_host {
        Some(host) => println!("Target: {} (Host: {host})", config.url),
        None => println!("Target: {}", config.url),
    }
    println!("Total requests: {}", config.total_requests);
    println!("Concurrency: {} connections at once", config.concurrency);
    println!("=============================================\n");
}

/// Overwrites a single status line in place.
pub fn progress(completed: usize, total: usize) {
    print!("\rProgress: {completed} / {total} requests completed...");
    let _ = io::stdout().flush();
}

pub fn summary(results: &RunResults, total: usize, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    let throughput = if secs > 0.0 { total as f64 / secs } else { 0.0 };

    println!("\n\nLoad test complete\n");
    println!("--- Performance statistics ---");
    println!("Time elapsed:       {secs:.2} seconds");
    println!("Throughput:         {throughput:.2} requests/second");
    println!("Successful:         {}", results.success());
    println!("Failed:             {}\n", results.failed());

    println!("--- Load distribution (replicas) ---");
    if results.replica_hits().is_empty() {
        println!("No replica ids returned (check if the service is up or routing correctly).");
    } else {
        // A non-empty table implies at least one success, so the share
        // denominator is never zero.
        for (id, count) in results.replica_hits() {
            let share = *count as f64 / results.success() as f64;
            println!(
                "Replica [{id}]: {count:<5} requests | {} {:.1}%",
                distribution_bar(share),
                share * 100.0,
            );
        }
    }
    println!("=============================================");
}

/// Bar filled proportionally to the replica's share of successes.
fn distribution_bar(share: f64) -> String {
    let filled = ((share * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(BAR_WIDTH - filled));
    bar
}
