//! tests/common/harness.rs
use kestrel_sim::config::{FlowConfig, LossConfig, SimConfig};
use std::sync::Once;

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter =
            std::env::var("RUST_LOG").unwrap_or_else(|_| "kestrel_sim=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// The reference scenario: buffer of 15 packets, service rate 3.0, equal
/// 50-unit RTTs, horizon 1000.
pub fn base_config() -> SimConfig {
    SimConfig {
        buffer_capacity: 15,
        service_rate: 3.0,
        horizon: 1000.0,
        flow_a: FlowConfig { rtt: 50.0 },
        flow_b: FlowConfig { rtt: 50.0 },
        ..Default::default()
    }
}

/// The reference scenario with the independent random-loss channel turned
/// off, leaving overflow and duplicate-count losses only.
pub fn lossless_config() -> SimConfig {
    SimConfig {
        loss: LossConfig {
            random_loss_probability: 0.0,
            dup_ack_threshold: 3,
        },
        ..base_config()
    }
}
