use anyhow::Context;
use clap::Parser;
use fiftystates::config::cli::{to_params, Cli, Command};
use fiftystates::utils::logger;
use fiftystates::{Bill, District, HttpTransport, Legislator, State, Vote};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("rendering response as JSON")?;
    println!("{}", rendered);
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.client_config()?;
    tracing::debug!("Client config: {:?}", config);

    let transport = HttpTransport::new(&config)
        .with_context(|| format!("invalid client configuration for {}", config.base_url))?;

    match cli.command {
        Command::State { abbrev } => print_json(&State::get(&transport, &abbrev)?),
        Command::Bill {
            state,
            session,
            chamber,
            bill_id,
        } => print_json(&Bill::get(&transport, &state, &session, &chamber, &bill_id)?),
        Command::SearchBills { query, params } => {
            let bills = Bill::search(&transport, &query, &to_params(&params))?;
            tracing::info!("Found {} bills for {:?}", bills.len(), query);
            print_json(&bills)
        }
        Command::Legislator { id } => print_json(&Legislator::get(&transport, id)?),
        Command::SearchLegislators { params } => {
            let legislators = Legislator::search(&transport, &to_params(&params))?;
            tracing::info!("Found {} legislators", legislators.len());
            print_json(&legislators)
        }
        Command::Vote { id } => print_json(&Vote::get(&transport, id)?),
        Command::District {
            state,
            session,
            chamber,
            district,
        } => print_json(&District::get(
            &transport, &state, &session, &chamber, &district,
        )?),
        Command::DistrictGeo {
            state,
            session,
            chamber,
            lat,
            long,
        } => print_json(&District::geo(
            &transport, &state, &session, &chamber, lat, long,
        )?),
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Err(e) = run(cli) {
        tracing::error!("❌ Request failed: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
