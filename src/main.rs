mod api;
mod browser;
mod config;
mod datastore;
mod metrics;
mod seed;
mod twoface;

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;
#[macro_use]
extern crate guard;
#[macro_use]
extern crate diesel;

use crate::browser::{backend::HttpBackend, console, session::PostsSession};
use crate::config::Config;
use crate::datastore::postgres::PostgresStore;
use actix::Actor;
use actix_service::Service;
use actix_web::{dev::ServiceResponse, middleware, web, App, HttpServer};
use anyhow::{anyhow, Context};
use futures::future::FutureExt;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{error, info, Level};

const USAGE: &str = "usage: blogbrowse <config file> [serve|seed|browse]";

fn main() {
    let args: Vec<_> = std::env::args().collect();
    guard!(let [_, config_file_path, ..] = &args[..] else {
        eprintln!("{}", USAGE);
        std::process::exit(2)
    });

    let config = match Config::from_file(config_file_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(2)
        }
    };

    // Set up logger output. Logs go to stderr; `browse` draws on stdout.
    let subscriber_builder = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr);
    if config.human_logs {
        subscriber_builder.init();
    } else {
        subscriber_builder.json().init();
    }

    let result = match args.get(2).map(String::as_str).unwrap_or("serve") {
        "serve" => serve(config),
        "seed" => seed(config),
        "browse" => browse(config),
        other => Err(anyhow!("unknown command {:?}; {}", other, USAGE)),
    };
    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::cognitive_complexity)]
fn serve(config: Config) -> anyhow::Result<()> {
    info!("starting blogbrowse");
    let sys = actix_rt::System::new("blogbrowse");

    let db = PostgresStore::connect(&config)?;
    let state = api::State { ds: Arc::new(db) };

    info!(addr = &config.listen_address[..], "starting API server");
    HttpServer::new(move || {
        App::new()
            // Middleware for Prometheus
            .wrap_fn(|request, srv| srv.call(request).map(increment_response_metrics))
            .data(state.clone())
            // enable logger
            .wrap(middleware::Logger::default())
            .service(web::scope("/api").configure(api::configure::<PostgresStore>))
    })
    .bind(config.listen_address.clone())
    .context("couldn't start API server")?
    .run();

    info!(addr = &config.metrics_address[..], "starting metrics server");
    HttpServer::new(|| {
        App::new().service(
            web::scope("/metrics")
                .service(web::resource("/").route(web::get().to(metrics::endpoint::gather)))
                .service(web::resource("").route(web::get().to(metrics::endpoint::gather))),
        )
    })
    .bind(config.metrics_address.clone())
    .context("couldn't start metrics server")?
    .run();

    sys.run().context("actix runtime terminated")
}

fn seed(config: Config) -> anyhow::Result<()> {
    let mut sys = actix_rt::System::new("blogbrowse-seed");
    let db = PostgresStore::connect(&config)?;
    let source = config.seed_source_url;
    let summary = sys.block_on(async move { seed::run(&db, &source).await })?;
    println!("seeded {} users and {} posts", summary.users, summary.posts);
    Ok(())
}

fn browse(config: Config) -> anyhow::Result<()> {
    let mut sys = actix_rt::System::new("blogbrowse-browse");
    info!(api = %config.api_base_url, "browsing posts");
    let debounce = config.debounce();
    let base = config.api_base_url;
    let (addr, system) = sys.block_on(async move {
        let backend = Rc::new(HttpBackend::new(base));
        let addr = PostsSession::new(backend, debounce).start();
        (addr, actix_rt::System::current())
    });

    // The console blocks on stdin, so it gets its own thread; the session stays on this one.
    let console_thread = std::thread::spawn(move || {
        let result = console::run(addr);
        system.stop();
        result
    });
    sys.run().context("actix runtime terminated")?;
    console_thread
        .join()
        .map_err(|_| anyhow!("console thread panicked"))?
}

/// If response is OK, increment the metrics for HTTP statuses.
fn increment_response_metrics<E, B>(
    response: Result<ServiceResponse<B>, E>,
) -> Result<ServiceResponse<B>, E> {
    match response {
        Ok(response) => {
            metrics::HTTP_RESPONSES
                .with_label_values(&[response.status().as_str()])
                .inc();
            Ok(response)
        }
        other => other,
    }
}
