//! Tests for the AIMD window controller.
use super::CongestionControl;
use super::aimd::Aimd;
use crate::config::WindowConfig;

fn test_window_config() -> WindowConfig {
    WindowConfig {
        initial_window: 1,
        min_window: 1,
    }
}

#[test]
fn grows_by_one_per_ack() {
    let mut aimd = Aimd::new(&test_window_config());
    assert_eq!(aimd.congestion_window(), 1);

    aimd.on_ack();
    assert_eq!(aimd.congestion_window(), 2);

    aimd.on_ack();
    assert_eq!(aimd.congestion_window(), 3);
}

#[test]
fn halves_on_loss() {
    let mut aimd = Aimd::new(&test_window_config());
    aimd.congestion_window = 9;

    aimd.on_packet_loss();
    // Integer division: 9 / 2 = 4.
    assert_eq!(aimd.congestion_window(), 4);

    aimd.on_packet_loss();
    assert_eq!(aimd.congestion_window(), 2);
}

#[test]
fn never_shrinks_below_floor() {
    let mut aimd = Aimd::new(&test_window_config());
    assert_eq!(aimd.congestion_window(), 1);

    aimd.on_packet_loss();
    assert_eq!(aimd.congestion_window(), 1);
}

#[test]
fn respects_configured_floor() {
    let config = WindowConfig {
        initial_window: 16,
        min_window: 4,
    };
    let mut aimd = Aimd::new(&config);

    aimd.on_packet_loss(); // 8
    aimd.on_packet_loss(); // 4
    aimd.on_packet_loss(); // floored
    assert_eq!(aimd.congestion_window(), 4);
}
