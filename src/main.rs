use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use mac2vendor::{Loader, config, web};

#[derive(Parser)]
#[command(name = "mac2vendor")]
#[command(about = "Resolve MAC addresses to their IEEE registered vendor")]
struct Cli {
    /// Path of the vendor cache built from the IEEE registry
    #[arg(long, global = true, default_value_os_t = config::cache_path())]
    cache: PathBuf,

    /// Where the raw registry is downloaded before parsing
    #[arg(long, global = true, default_value_os_t = config::raw_path())]
    raw: PathBuf,

    /// IEEE OUI registry URL
    #[arg(long, global = true, default_value_t = config::registry_url())]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lookup a mac address and resolve its vendor
    #[command(visible_alias = "resolve")]
    Lookup {
        /// The mac address to resolve
        mac: String,

        /// Only print the vendor name
        #[arg(long, short)]
        quiet: bool,
    },

    /// Expose mac2vendor as a web service
    Serve {
        /// Address the service binds to
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port the service binds to
        #[arg(long, default_value_t = config::port())]
        port: u16,
    },

    /// Update the vendor cache to the latest OUI listing
    #[command(visible_alias = "up")]
    Update {
        /// Discard the existing cache and download the registry again
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let loader = Loader::new(cli.cache)
        .with_raw_path(cli.raw)
        .with_url(cli.url);

    match cli.command {
        Command::Lookup { mac, quiet } => {
            let table = loader.load()?;
            let vendor = table.lookup(&mac)?;
            println!("{}", format_lookup(&mac, vendor, quiet));
        }
        Command::Serve { bind, port } => {
            let table = loader.load()?;
            web::start(table, &bind, port)?;
        }
        Command::Update { force } => {
            let table = loader.update(force)?;
            println!("{}", format_update(table.len(), loader.cache_path()));
        }
    }

    Ok(())
}

fn format_lookup(mac: &str, vendor: &str, quiet: bool) -> String {
    if quiet {
        vendor.to_string()
    } else {
        format!("   MAC: {}\nVendor: {}", mac, vendor)
    }
}

fn format_update(records: usize, cache: &Path) -> String {
    format!("{} vendor prefixes cached in {}", records, cache.display())
}
