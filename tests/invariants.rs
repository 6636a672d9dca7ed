//! Whole-run structural properties, checked after every processed event.

pub mod common;

use common::harness::{base_config, init_tracing};
use kestrel_sim::config::SimConfig;
use kestrel_sim::error::Error;
use kestrel_sim::sim::Simulation;

#[test]
fn per_event_invariants_hold_for_a_full_run() {
    init_tracing();

    let mut sim = Simulation::with_seed(&base_config(), 1234).unwrap();
    let mut last_event_time = 0.0;
    let mut events = 0u64;

    while let Some(time) = sim.step().unwrap() {
        events += 1;

        // Events are processed in non-decreasing time order.
        assert!(time >= last_event_time);
        last_event_time = time;

        for connection in sim.connections() {
            assert!(connection.window() >= 1);
            assert!(connection.active_packets() <= connection.window());
        }
        assert!(sim.buffer().len() <= sim.buffer().capacity());

        // One sample per flow per event, stamped at the current clock.
        assert_eq!(sim.metrics().sample_count(0), events as usize);
        assert_eq!(sim.metrics().sample_count(1), events as usize);
    }

    assert!(events > 0);
    assert!(sim.clock() >= sim.metrics().series(0).last().unwrap().time - 1e-9);
}

#[test]
fn shorter_horizon_processes_a_prefix_of_the_same_run() {
    init_tracing();

    let short_config = SimConfig {
        horizon: 120.0,
        ..base_config()
    };
    let mut short = Simulation::with_seed(&short_config, 8).unwrap();
    let mut long = Simulation::with_seed(&base_config(), 8).unwrap();
    short.run().unwrap();
    long.run().unwrap();

    // Same seed, same draw sequence: the shorter horizon sees exactly a
    // prefix of the longer run's samples, and the cut-off events are
    // dropped rather than reported.
    let short_series = short.metrics().series(0);
    let long_series = long.metrics().series(0);
    assert!(!short_series.is_empty());
    assert!(short_series.len() < long_series.len());
    assert_eq!(short_series, &long_series[..short_series.len()]);
}

#[test]
fn construction_rejects_fatal_parameters() {
    let zero_capacity = SimConfig {
        buffer_capacity: 0,
        ..base_config()
    };
    assert!(matches!(
        Simulation::with_seed(&zero_capacity, 1),
        Err(Error::InvalidBufferCapacity)
    ));

    let bad_rate = SimConfig {
        service_rate: -1.0,
        ..base_config()
    };
    assert!(matches!(
        Simulation::with_seed(&bad_rate, 1),
        Err(Error::InvalidServiceRate(_))
    ));

    let bad_horizon = SimConfig {
        horizon: f64::NAN,
        ..base_config()
    };
    assert!(matches!(
        Simulation::with_seed(&bad_horizon, 1),
        Err(Error::InvalidHorizon(_))
    ));
}
