use axum_extra::extract::cookie::Key;
use clap::Parser;
use log::{error, info, warn};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tokio::main;

use songbook::config::Config;
use songbook::{app, DatabaseState};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, short, default_value_t = 3)]
    verbosity: usize,
    #[arg(long, short, default_value_t = false)]
    quiet: bool,
    #[arg(long, short)]
    config: String,
}

#[main]
async fn main() {
    let args = Args::parse();
    if let Err(err) = stderrlog::new()
        .verbosity(args.verbosity)
        .quiet(args.quiet)
        .timestamp(stderrlog::Timestamp::Millisecond)
        .init()
    {
        eprintln!("Could not initialise logging: {}", err);
    }

    info!("Configuration path: {}", args.config);
    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return;
        }
    };

    let key = match config.signing_key() {
        Ok(Some(key)) => key,
        Ok(None) => {
            warn!("No secret_key configured, flash cookies will not survive a restart");
            Key::generate()
        }
        Err(err) => {
            error!("{}", err);
            return;
        }
    };

    let mut options = ConnectOptions::new(config.database.to_owned());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(false);
    let connection = match Database::connect(options).await {
        Ok(connection) => connection,
        Err(err) => {
            error!("Error connecting to database: {}", err);
            return;
        }
    };

    info!("Running migrations");
    if let Err(err) = Migrator::up(&connection, None).await {
        error!("Error running migrations: {}", err);
        return;
    }

    let state = DatabaseState {
        connection,
        strict_lookups: config.strict_lookups,
        key,
    };
    if state.strict_lookups {
        info!("Strict lookups enabled, missing ids always answer 404");
    }

    let address = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Could not listen on {}: {}", address, err);
            return;
        }
    };
    info!("Listening on {}", address);
    info!("Welcome to Songbook!");

    if let Err(err) = axum::serve(listener, app(state)).await {
        error!("Server stopped: {}", err);
    }
}
