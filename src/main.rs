// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::Result;
use clap::{Parser, ValueEnum};
use gwdns::constants::{DEFAULT_POLL_INTERVAL_SECS, TOKIO_WORKER_THREADS};
use gwdns::source::{HttpRouteSource, Source, SourceConfig, TcpRouteSource, TlsRouteSource};
use kube::Client;
use std::time::Duration;
use tracing::{debug, error, info};

/// Route kind to watch.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum RouteKind {
    Httproute,
    Tlsroute,
    Tcproute,
}

#[derive(Parser, Debug)]
#[command(name = "gwdns", version, about = "Gateway API DNS source controller")]
struct Args {
    /// Route kind to resolve
    #[arg(long, value_enum, default_value = "httproute")]
    kind: RouteKind,

    /// Only consider routes in this namespace
    #[arg(long)]
    namespace: Option<String>,

    /// Only consider Gateways in this namespace
    #[arg(long)]
    gateway_namespace: Option<String>,

    /// Label selector applied when listing routes
    #[arg(long)]
    label_filter: Option<String>,

    /// Label selector applied when listing Gateways
    #[arg(long)]
    gateway_label_filter: Option<String>,

    /// Annotation filter applied to routes (e.g. "team=dns,!legacy")
    #[arg(long)]
    annotation_filter: Option<String>,

    /// FQDN template for routes without hostnames
    /// (e.g. "{{name}}.{{namespace}}.example.com")
    #[arg(long)]
    fqdn_template: Option<String>,

    /// Append template hostnames even when a route declares its own
    #[arg(long)]
    combine_fqdn_annotation: bool,

    /// Ignore the hostname annotation on routes
    #[arg(long)]
    ignore_hostname_annotation: bool,

    /// Resolve once and exit instead of polling
    #[arg(long)]
    once: bool,

    /// Seconds between resolution cycles
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    interval: u64,
}

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("gwdns-source")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Respects RUST_LOG for filtering and RUST_LOG_FORMAT for text/json output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    let args = Args::parse();
    info!("Starting Gateway API DNS source controller");

    debug!("Initializing Kubernetes client");
    let client = Client::try_default().await?;

    let config = SourceConfig {
        namespace: args.namespace.clone(),
        gateway_namespace: args.gateway_namespace.clone(),
        label_filter: args.label_filter.clone(),
        gateway_label_filter: args.gateway_label_filter.clone(),
        annotation_filter: args.annotation_filter.clone(),
        fqdn_template: args.fqdn_template.clone(),
        combine_fqdn_annotation: args.combine_fqdn_annotation,
        ignore_hostname_annotation: args.ignore_hostname_annotation,
    };

    let source: Box<dyn Source> = match args.kind {
        RouteKind::Httproute => Box::new(HttpRouteSource::new(client, config)?),
        RouteKind::Tlsroute => Box::new(TlsRouteSource::new(client, config)?),
        RouteKind::Tcproute => Box::new(TcpRouteSource::new(client, config)?),
    };

    loop {
        match source.endpoints().await {
            Ok(endpoints) => {
                info!(count = endpoints.len(), "Resolved desired endpoints");
                for endpoint in &endpoints {
                    info!(
                        "{} {} {} ttl={}",
                        endpoint.dns_name,
                        endpoint.record_type,
                        endpoint.targets.join(","),
                        endpoint
                            .record_ttl
                            .map_or_else(|| "default".to_string(), |t| t.to_string()),
                    );
                }
                if args.once {
                    println!("{}", serde_json::to_string_pretty(&endpoints)?);
                    return Ok(());
                }
            }
            Err(err) => {
                // Listing failures are retried on the next cycle
                error!(error = %err, "Resolution cycle failed");
                if args.once {
                    return Err(err.into());
                }
            }
        }
        tokio::time::sleep(Duration::from_secs(args.interval)).await;
    }
}
