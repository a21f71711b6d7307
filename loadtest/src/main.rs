use crate::client::HttpClient;
use crate::config::TargetConfig;

pub mod client;
mod config;
mod dispatch;
mod outcome;
mod report;
mod results;

fn main() {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();
    let _guard = rt.enter();
    if let Err(err) = rt.block_on(run_loadtest()) {
        eprintln!("load test failed: {err:#}");
        std::process::exit(1);
    }
}

async fn run_loadtest() -> anyhow::Result<()> {
    let config = TargetConfig::from_env()?;
    report::banner(&config);
    let client = HttpClient::new();
    let run = dispatch::run(&config, client).await?;
    report::summary(&run.results, config.total_requests, run.elapsed);
    Ok(())
}
