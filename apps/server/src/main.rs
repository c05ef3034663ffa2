//! osf-server
//!
//! REST/JSON-API surface for the open science platform plus the signed
//! webhook hooks the storage worker calls back into.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::routing::get;
use clap::Parser;
use osf_core::Core;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, prelude::*};

mod api;
mod utils;

#[derive(Parser, Debug)]
#[command(name = "osf-server", about = "Open science platform API server")]
struct Args {
	/// Directory holding the config, database and logs
	#[arg(long, env = "DATA_DIR", default_value = "osf_data")]
	data_dir: PathBuf,

	/// Port to listen on
	#[arg(long, env = "PORT", default_value_t = 8080)]
	port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let (non_blocking, _guard) = tracing_appender::non_blocking(
		tracing_appender::rolling::daily(args.data_dir.join("logs"), "osf-server.log"),
	);

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with(tracing_subscriber::fmt::layer())
		.with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
		.init();

	let core = Core::new(&args.data_dir)
		.await
		.context("Unable to initialize core")?;

	let state = api::AppState::new(core);

	let app = axum::Router::new()
		.route("/", get(root_handler))
		.route("/health", get(|| async { "OK" }))
		.merge(api::router())
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(state);

	let mut addr = "[::]:8080".parse::<SocketAddr>()?; // This listens on IPv6 and IPv4
	addr.set_port(args.port);
	info!("Listening on http://localhost:{}", args.port);

	let listener = tokio::net::TcpListener::bind(addr).await?;
	axum::serve(listener, app)
		.with_graceful_shutdown(utils::shutdown_signal())
		.await
		.context("Error with HTTP server")?;

	Ok(())
}

async fn root_handler() -> &'static str {
	"Open Science Platform API"
}
