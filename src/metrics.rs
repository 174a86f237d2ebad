lazy_static! {

    pub static ref HANDLER_SECS: prometheus::HistogramVec = register_histogram_vec!(
        "blogbrowse_handler_secs",
        "Seconds taken for each response, partitioned by endpoint name",
        &["endpoint_name"],
        vec![0.005, 0.05, 0.5, 2.0] // Prometheus buckets
    )
    .expect("couldn't make HANDLER_SECS");

    pub static ref RESPONSES: prometheus::IntCounterVec = register_int_counter_vec!(
        "blogbrowse_responses",
        "How many responses of Ok/Err per endpoint",
        &["endpoint_name", "result"]
    )
    .expect("couldn't make RESPONSES");

    pub static ref HTTP_RESPONSES: prometheus::IntCounterVec = register_int_counter_vec!(
        "blogbrowse_http_responses",
        "Count of each HTTP status code served by the API",
        &["status"]
    )
    .expect("couldn't make HTTP_RESPONSES");

    pub static ref DB_CONNECTIONS: prometheus::IntGaugeVec = register_int_gauge_vec!(
        "blogbrowse_db_connections",
        "Connections held by the Postgres pool, partitioned by idle/in_use",
        &["state"]
    )
    .expect("couldn't make DB_CONNECTIONS");
}

/// Refreshed whenever the store checks out a connection.
pub fn record_db_pool(connections: u32, idle: u32) {
    DB_CONNECTIONS
        .with_label_values(&["idle"])
        .set(i64::from(idle));
    DB_CONNECTIONS
        .with_label_values(&["in_use"])
        .set(i64::from(connections.saturating_sub(idle)));
}

pub mod endpoint {
    use actix_web::{http, HttpResponse};
    use prometheus::Encoder;

    pub async fn gather() -> HttpResponse {
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = vec![];
        let metric_families = prometheus::gather();
        match encoder.encode(&metric_families, &mut buffer) {
            Ok(()) => HttpResponse::build(http::StatusCode::OK)
                .content_type(encoder.format_type())
                .body(buffer),
            Err(e) => {
                let message = format!("{:?}", e);
                HttpResponse::build(http::StatusCode::INTERNAL_SERVER_ERROR).body(message)
            }
        }
    }
}
