//! Resolve IPv4 addresses to MAC addresses from the kernel neighbor cache.
use std::io::{stdin, stdout, BufRead};
use std::net::Ipv4Addr;

use anyhow::{Context, Result};
use arpreq::format::{to_bytes, to_hex_string};
use arpreq::interfaces::{InterfaceSnapshot, InterfaceSource, SystemInterfaces};
use arpreq::models::HardwareAddress;
use arpreq::resolver::Resolver;
use arpreq::utilities::{configure_logger, parse_ipv4};
use clap::Parser;
use log::{info, warn, LevelFilter};
use serde::Serialize;
use strum::{Display, EnumString};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// IPv4 addresses to resolve, read from stdin if none are given.
    addresses: Vec<String>,
    /// Output format.
    #[arg(short = 'f', long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Print hardware addresses as contiguous hex bytes.
    #[arg(short = 'b', long, default_value_t = false)]
    bytes: bool,
    /// List the local interfaces and exit.
    #[arg(short = 'i', long, default_value_t = false)]
    interfaces: bool,
    /// Minimum log level.
    #[arg(short = 'L', long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
}

#[derive(Copy, Clone, Debug, Display, EnumString, PartialEq)]
#[strum(serialize_all = "lowercase")]
enum OutputFormat {
    Text,
    Csv,
}

#[derive(Serialize)]
struct Row {
    address: Ipv4Addr,
    mac: Option<String>,
}

fn render(mac: &HardwareAddress, bytes: bool) -> String {
    if bytes {
        hex::encode(to_bytes(mac))
    } else {
        to_hex_string(mac)
    }
}

fn list_interfaces() -> Result<()> {
    let snapshot = SystemInterfaces
        .enumerate()
        .context("cannot enumerate interfaces")?;
    for interface in snapshot.interfaces() {
        let mac = snapshot
            .hardware_address_of(&interface.name)
            .map(|mac| mac.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{} mac={}", interface, mac);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    configure_logger(args.log_level);

    if args.interfaces {
        return list_interfaces();
    }

    let resolver = Resolver::system().context("cannot open control socket")?;

    let addresses: Box<dyn Iterator<Item = String>> = if args.addresses.is_empty() {
        info!("Reading from stdin, press CTRL+D to stop...");
        Box::new(stdin().lock().lines().map_while(Result::ok))
    } else {
        Box::new(args.addresses.into_iter())
    };

    let mut csv_writer = match args.format {
        OutputFormat::Csv => Some(csv::Writer::from_writer(stdout())),
        OutputFormat::Text => None,
    };

    for line in addresses {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let target = match parse_ipv4(line) {
            Ok(target) => target,
            Err(error) => {
                warn!("{}", error);
                continue;
            }
        };
        let mac = resolver
            .resolve(target)
            .into_result()
            .with_context(|| format!("cannot resolve {}", target))?
            .map(|mac| render(&mac, args.bytes));
        match csv_writer.as_mut() {
            Some(writer) => writer.serialize(Row {
                address: target,
                mac,
            })?,
            None => println!("{} {}", target, mac.as_deref().unwrap_or("-")),
        }
    }

    if let Some(mut writer) = csv_writer {
        writer.flush()?;
    }
    Ok(())
}
