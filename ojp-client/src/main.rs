use std::process::ExitCode;

use chrono::Utc;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ojp_client::cache::{CacheConfig, CachedPlaceLookup};
use ojp_client::domain::PlaceRefChoice;
use ojp_client::ojp::{DepArrTime, NumberOfResults, OjpClient, OjpConfig, PlaceParam, TripRequest};
use ojp_client::pagination::PaginatedTripLoader;

const USAGE: &str = "\
usage:
  ojp-client places <term>
  ojp-client trips <from-stop-place-ref> <to-stop-place-ref> [pages]

Reads OJP_API_TOKEN (required), OJP_ENDPOINT and OJP_REQUESTOR_REF.";

/// Trips requested per page.
const PAGE_SIZE: u32 = 5;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["places", term] => places(term).await,
        ["trips", from, to] => trips(from, to, 1).await,
        ["trips", from, to, pages] => trips(from, to, pages.parse()?).await,
        _ => {
            eprintln!("{USAGE}");
            Err("invalid arguments".into())
        }
    }
}

async fn places(term: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = OjpClient::http(OjpConfig::from_env()?)?;
    let lookup = CachedPlaceLookup::new(client, &CacheConfig::default());

    let delivery = lookup
        .request_place_results(term, &PlaceParam::default())
        .await?;
    print_json(&*delivery)
}

async fn trips(from: &str, to: &str, pages: u32) -> Result<(), Box<dyn std::error::Error>> {
    let client = OjpClient::http(OjpConfig::from_env()?)?;
    let loader = PaginatedTripLoader::new(client);

    let request = TripRequest::new(
        PlaceRefChoice::stop_place(from, from),
        PlaceRefChoice::stop_place(to, to),
        DepArrTime::Departure(Utc::now().fixed_offset()),
    );

    let first = loader
        .load_initial(request, NumberOfResults::After(PAGE_SIZE))
        .await?;
    print_json(&first)?;

    for _ in 1..pages {
        let page = loader.load_next(PAGE_SIZE).await?;
        if page.trip_results.is_empty() {
            break;
        }
        print_json(&page)?;
    }
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
