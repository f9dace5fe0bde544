mod cli;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use stsync::config::{resolve_config_path, Config};
use stsync::logging::init_tracing;
use stsync::server::{self, AppState};
use stsync::syncthing_client::{DaemonApi, FolderDesignator, SyncthingClient};

use cli::{Cli, Command, GroupArg, ServeArgs, SyncArgs};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let path = resolve_config_path(cli.config.as_deref())?;
    let config = Config::load(&path).await.context("error while reading config file")?;
    let client = SyncthingClient::new(&config.http_settings())?;

    match cli.command {
        Command::Sync(args) => run_sync(&config, &client, args).await,
        Command::Serve(args) => run_serve(&config, client, args).await,
        Command::Folders(args) => run_folders(&config, &client, args).await,
    }
}

async fn run_sync(config: &Config, client: &SyncthingClient, args: SyncArgs) -> Result<ExitCode> {
    let endpoints = config.endpoints(&args.group.group)?;
    let designator = if args.label {
        FolderDesignator::Label(args.folder)
    } else {
        FolderDesignator::Id(args.folder)
    };

    let result = stsync::sync_with_deadline(
        client,
        &designator,
        &endpoints,
        &config.timing(),
        args.timeout.map(Duration::from_secs),
    )
    .await;

    match result {
        Ok(_) => {
            println!("{designator} in sync");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(stage = %err.stage(), endpoint = err.endpoint().unwrap_or("-"), "Sync failed");
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_serve(config: &Config, client: SyncthingClient, args: ServeArgs) -> Result<ExitCode> {
    let endpoints = config.endpoints(&args.group.group)?;
    let listen = args.listen.unwrap_or(config.server.listen);
    let state = Arc::new(AppState {
        api: Arc::new(client),
        endpoints,
        timing: config.timing(),
        run_timeout: config.server.run_timeout(),
    });

    server::serve(listen, state)
        .await
        .with_context(|| format!("server on {listen} failed"))?;
    Ok(ExitCode::SUCCESS)
}

async fn run_folders(config: &Config, client: &SyncthingClient, args: GroupArg) -> Result<ExitCode> {
    for endpoint in config.endpoints(&args.group)? {
        let folders = client
            .get_config(&endpoint)
            .await
            .with_context(|| format!("error while listing folders on {endpoint}"))?;

        println!("{endpoint}");
        for folder in folders {
            let paused = if folder.paused.unwrap_or(false) { " [paused]" } else { "" };
            println!(
                "  {}\t{}\t{}{}",
                folder.id,
                folder.display_label(),
                folder.path.as_deref().unwrap_or("-"),
                paused
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}
