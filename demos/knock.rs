//! Send knocks from the command line, one step after the other.
use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::{error, LevelFilter};
use portknock::easy::{knock, Config};
use portknock::models::{IcmpSizeMode, Step, MIN_IPV4_HEADER_SIZE};
use portknock::payload::PayloadEncoding;
use portknock::utilities::configure_logger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Numeric IPv4 or IPv6 address of the host.
    host: String,
    /// Knock steps: `port[:tcp|udp]` or `icmp[:size[:count]]`.
    #[arg(required = true)]
    steps: Vec<Step>,
    /// Content of UDP datagrams and ICMP payloads.
    #[arg(short = 'c', long, default_value_t = String::new())]
    content: String,
    /// Encoding of the content.
    #[arg(short = 'e', long, default_value_t = PayloadEncoding::Raw)]
    encoding: PayloadEncoding,
    /// IPv4 TTL / IPv6 hop limit (0 for the OS default).
    #[arg(short = 't', long, default_value_t = 0)]
    ttl: u32,
    /// Delay between steps and between ICMP requests, in milliseconds.
    #[arg(short = 'd', long, default_value_t = 0)]
    delay: u64,
    /// Local source port for UDP knocks (0 for a system-assigned port).
    #[arg(short = 'p', long, default_value_t = 0)]
    local_port: u16,
    /// How ICMP sizes are interpreted.
    #[arg(long, default_value_t = IcmpSizeMode::WithIcmpHeader)]
    icmp_size_mode: IcmpSizeMode,
    /// IPv4 header size for the `with_ip_and_icmp_headers` size mode.
    #[arg(long, default_value_t = MIN_IPV4_HEADER_SIZE)]
    ipv4_header_size: u16,
    /// Time to wait for an echo reply, in milliseconds (0 to not wait).
    #[arg(short = 'W', long, default_value_t = 0)]
    reply_timeout: u64,
    /// Minimum log level.
    #[arg(short = 'L', long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let args = Args::parse();

    configure_logger(args.log_level);

    let config = Config {
        ttl: args.ttl,
        delay: Duration::from_millis(args.delay),
        local_port: args.local_port,
        icmp_size_mode: args.icmp_size_mode,
        ipv4_header_size: args.ipv4_header_size,
        reply_timeout: Some(Duration::from_millis(args.reply_timeout))
            .filter(|timeout| !timeout.is_zero()),
    };
    let content = args.encoding.decode(&args.content);

    let mut failed = false;
    for step in &args.steps {
        if let Err(err) = knock(&config, &args.host, step, &content) {
            error!("{:#}", err);
            failed = true;
        }
        if !matches!(step, Step::Icmp { .. }) {
            sleep(config.delay);
        }
    }

    if failed {
        std::process::exit(portknock::EXIT_FAILURE);
    }
    Ok(())
}
