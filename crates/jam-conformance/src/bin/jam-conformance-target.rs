//! Conformance-target binary (spec.md §6): listens on a Unix socket,
//! accepts one connection, and drives a [`TargetSession`] over it until
//! the peer disconnects.

use clap::Parser;
use jam_accumulate::NullPvmHost;
use jam_conformance::TargetSession;
use jam_crypto::StubRingVrf;
use jam_types::Params;
use tokio::net::UnixListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "jam-conformance-target")]
#[command(about = "JAM core conformance-target: answers a fuzzer over a Unix socket")]
struct Cli {
    /// Unix socket path to listen on.
    #[arg(long)]
    socket: String,

    /// Exit as soon as the fuzzer disconnects instead of waiting for a
    /// further connection.
    #[arg(long, default_value_t = true)]
    exit_on_disconnect: bool,

    /// Print the params this target was built with, as JSON, and exit.
    #[arg(long)]
    dump_params: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let default_directive = match cli.verbose {
        0 => "jam_conformance=info",
        1 => "jam_conformance=debug",
        _ => "jam_conformance=trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(default_directive.parse().unwrap()))
        .init();

    let params = Params::tiny();

    if cli.dump_params {
        let json = serde_json::to_string_pretty(&params).expect("Params always serializes");
        println!("{json}");
        return std::process::ExitCode::SUCCESS;
    }

    let _ = std::fs::remove_file(&cli.socket);
    let listener = match UnixListener::bind(&cli.socket) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(socket = %cli.socket, error = %e, "failed to bind socket");
            return std::process::ExitCode::FAILURE;
        }
    };
    tracing::info!(socket = %cli.socket, "listening for a conformance fuzzer");

    loop {
        let (mut stream, _addr) = match listener.accept().await {
            Ok(pair) => pair,
            Err(e) => {
                tracing::error!(error = %e, "failed to accept connection");
                return std::process::ExitCode::FAILURE;
            }
        };
        tracing::info!("fuzzer connected");

        let mut session = TargetSession::new(params, &StubRingVrf, &NullPvmHost);
        let result = session.run(&mut stream, || false).await;

        match result {
            Ok(()) => tracing::info!("session ended cleanly"),
            Err(e) => {
                tracing::error!(error = %e, "session ended with a protocol error");
                return std::process::ExitCode::FAILURE;
            }
        }

        if cli.exit_on_disconnect {
            return std::process::ExitCode::SUCCESS;
        }
    }
}
