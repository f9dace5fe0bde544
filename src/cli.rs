use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use stsync::config::DEFAULT_GROUP;

#[derive(Parser, Debug)]
#[command(
    name = "stsync",
    version,
    about = "Rescan a Syncthing folder on several devices and wait until all are in sync",
    long_about = None,
)]
pub struct Cli {
    /// Config file [default: <config dir>/stsync/config.json].
    #[arg(long, global = true, env = "STSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trigger a rescan of one folder and block until every device is in sync.
    Sync(SyncArgs),

    /// Run the HTTP service exposing `GET /sync/{folder}`.
    Serve(ServeArgs),

    /// List the folders each device of a group knows about.
    Folders(GroupArg),
}

#[derive(Args, Debug)]
pub struct GroupArg {
    /// Device group from the config file.
    #[arg(long, default_value = DEFAULT_GROUP)]
    pub group: String,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Folder id, or label with --label.
    pub folder: String,

    /// Match FOLDER against folder labels instead of ids.
    #[arg(long)]
    pub label: bool,

    /// Give up after this many seconds. Waits indefinitely by default.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub group: GroupArg,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind; overrides server.listen from the config file.
    #[arg(long)]
    pub listen: Option<SocketAddr>,

    #[command(flatten)]
    pub group: GroupArg,
}
