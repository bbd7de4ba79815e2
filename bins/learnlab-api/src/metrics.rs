// Prometheus counters exposed on GET /metrics

use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

lazy_static! {
    static ref VERIFICATIONS: IntCounterVec = register_int_counter_vec!(
        "learnlab_verifications_total",
        "Verifier verdicts by outcome",
        &["outcome"]
    )
    .expect("verification counter registers once");
    static ref HTTP_REQUESTS: IntCounterVec = register_int_counter_vec!(
        "learnlab_http_requests_total",
        "HTTP requests by route",
        &["route"]
    )
    .expect("request counter registers once");
}

pub fn record_request(route: &str) {
    HTTP_REQUESTS.with_label_values(&[route]).inc();
}

pub fn record_verification(correct: bool) {
    let outcome = if correct { "correct" } else { "incorrect" };
    VERIFICATIONS.with_label_values(&[outcome]).inc();
}

/// Render every registered metric in the text exposition format
pub fn render() -> prometheus::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
