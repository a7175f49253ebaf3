use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use fare_scout::broker::Broker;
use fare_scout::engine::search::{CredentialPool, FlightResult, SearchQuery};
use fare_scout::engine::tasks::{SearchScheduler, TaskPool};
use fare_scout::engine::worker::{WorkerManager, WorkerSettings};
use fare_scout::gateway::{HttpGateway, SearchGateway};
use fare_scout::logging;
use fare_scout::shared::TokioSleeper;
use fare_scout::shared::config::CONFIG;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::info;

const CLI_CALLER: u64 = 0;

#[derive(Parser)]
#[command(name = "fare_scout")]
#[command(about = "Scan a date range for the cheapest flights", long_about = None)]
struct Args {
    /// Origin place id (or name with --resolve)
    #[arg(long)]
    origin: String,

    /// Destination place id (or name with --resolve)
    #[arg(long)]
    destination: String,

    /// First outbound date (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Last outbound date (YYYY-MM-DD), inclusive
    #[arg(long)]
    end: NaiveDate,

    /// Minimum stay in days; makes the search a round trip
    #[arg(long, requires = "max_days")]
    min_days: Option<u32>,

    /// Maximum stay in days
    #[arg(long, requires = "min_days")]
    max_days: Option<u32>,

    /// Resolve origin and destination names through the provider first
    #[arg(long)]
    resolve: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Arc::clone(&CONFIG);
    let _log_guard = logging::init(&settings.logging)?;

    info!("fare_scout is starting...");

    let credentials = CredentialPool::from_keys(settings.gateway.api_keys.iter().cloned())?;
    let gateway = Arc::new(HttpGateway::new(settings.gateway.clone())?);

    let (origin, destination) = if args.resolve {
        let credential = credentials.assign(0);
        let origin = gateway
            .resolve_place(credential, &args.origin)
            .await?
            .with_context(|| format!("unknown place: {}", args.origin))?;
        let destination = gateway
            .resolve_place(credential, &args.destination)
            .await?
            .with_context(|| format!("unknown place: {}", args.destination))?;
        (origin, destination)
    } else {
        (args.origin, args.destination)
    };

    let query = match (args.min_days, args.max_days) {
        (Some(min_days), Some(max_days)) => {
            SearchQuery::round_trip(origin, destination, args.start, args.end, min_days, max_days)?
        }
        _ => SearchQuery::one_way(origin, destination, args.start, args.end)?,
    };

    let broker = Broker::new(settings.broker.queue_capacity);
    let workers = WorkerManager::start(
        &broker,
        gateway,
        Arc::new(TokioSleeper),
        WorkerSettings::from(settings.as_ref()),
    );
    let scheduler = SearchScheduler::new(
        TaskPool::new(settings.task_slots()),
        broker.clone(),
        credentials,
    );

    let (tx, rx) = oneshot::channel();
    scheduler.submit(CLI_CALLER, query, move |direct, with_stops| {
        let _ = tx.send((direct, with_stops));
    });
    let (direct, with_stops) = rx.await.context("search ended without results")?;

    print_results("Direct flights", &direct);
    print_results("Flights with stops", &with_stops);

    scheduler.shutdown().await;
    workers.shutdown().await;
    Ok(())
}

fn print_results(title: &str, results: &[FlightResult]) {
    println!("{title}:");
    if results.is_empty() {
        println!("  none found");
    }
    for result in results {
        println!("  {result}");
    }
}
