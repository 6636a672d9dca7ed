//! M/M/1 等待系统估计器。
//! An M/M/1 waiting-system estimator.
//!
//! A companion to the congestion simulator that shares the time-ordered
//! event-list idea but carries no congestion-control state machine: a
//! single queue fed by Poisson arrivals and drained by one exponential
//! server, raced two events at a time (next arrival versus next departure).
//! It estimates the time-averaged number of customers in the system for
//! comparison with the closed-form `ρ / (1 − ρ)`.
//!
//! 拥塞仿真器的配套组件，复用按时间排序的事件列表思想，但没有拥塞控制状态
//! 机：一个由泊松到达馈入、单个指数服务台排空的队列，每次在下一个到达与
//! 下一个离开两个事件之间竞争。它估计系统内顾客数的时间平均值，用于与闭式
//! 解 `ρ / (1 − ρ)` 对比。

use crate::error::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Exp};
use tracing::debug;


/// Parameters for one estimation run.
///
/// 一次估计运行的参数。
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Mean arrival rate, customers per time unit.
    /// 平均到达速率（顾客/时间单位）。
    pub arrival_rate: f64,

    /// Mean service rate, customers per time unit.
    /// 平均服务速率（顾客/时间单位）。
    pub service_rate: f64,

    /// Number of arrivals to simulate before stopping.
    /// 停止前要仿真的到达数量。
    pub arrivals: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 1.5,
            service_rate: 3.0,
            arrivals: 100_000,
        }
    }
}

impl QueueConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.arrival_rate.is_finite() || self.arrival_rate <= 0.0 {
            return Err(Error::InvalidArrivalRate(self.arrival_rate));
        }
        if !self.service_rate.is_finite() || self.service_rate <= 0.0 {
            return Err(Error::InvalidServiceRate(self.service_rate));
        }
        if self.arrivals == 0 {
            return Err(Error::InvalidArrivalCount);
        }
        Ok(())
    }

    /// Offered load `ρ = λ / μ`.
    pub fn load(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }
}

/// The outcome of an estimation run.
///
/// 一次估计运行的结果。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueEstimate {
    /// Time-averaged number of customers in the system.
    /// 系统内顾客数的时间平均值。
    pub mean_in_system: f64,

    /// Virtual time between the first and last processed event.
    /// 第一个与最后一个处理事件之间的虚拟时间。
    pub elapsed: f64,

    /// Offered load of the run.
    pub load: f64,
}

/// Closed-form `E[N] = ρ / (1 − ρ)` for a stable M/M/1 system.
///
/// 稳定M/M/1系统的闭式解 `E[N] = ρ / (1 − ρ)`。
pub fn theoretical_mean_in_system(load: f64) -> f64 {
    load / (1.0 - load)
}

/// Races arrivals against departures until the configured number of
/// customers has entered the system, accumulating the time-weighted
/// customer count along the way.
///
/// 在到达与离开之间竞争，直到配置数量的顾客进入系统为止，沿途累积按时间
/// 加权的顾客数。
pub fn estimate<R: Rng>(config: &QueueConfig, rng: &mut R) -> Result<QueueEstimate> {
    config.validate()?;
    let interarrival = Exp::new(config.arrival_rate)
        .map_err(|_| Error::InvalidArrivalRate(config.arrival_rate))?;
    let service = Exp::new(config.service_rate)
        .map_err(|_| Error::InvalidServiceRate(config.service_rate))?;

    let mut clock = 0.0_f64;
    let mut next_arrival = interarrival.sample(rng);
    let mut next_departure = f64::INFINITY;
    let mut in_system: u64 = 0;
    let mut arrived: u64 = 0;
    let mut first_event_time: Option<f64> = None;
    let mut weighted_area = 0.0_f64;

    while arrived < config.arrivals {
        let event_time = next_arrival.min(next_departure);
        // Weight the interval since the previous event by the count that
        // held across it.
        match first_event_time {
            None => first_event_time = Some(event_time),
            Some(_) => weighted_area += in_system as f64 * (event_time - clock),
        }
        clock = event_time;

        if next_arrival < next_departure {
            in_system += 1;
            arrived += 1;
            next_arrival = clock + interarrival.sample(rng);
            // An arrival to an idle server starts a service immediately.
            if in_system == 1 {
                next_departure = clock + service.sample(rng);
            }
        } else {
            in_system -= 1;
            next_departure = if in_system > 0 {
                clock + service.sample(rng)
            } else {
                f64::INFINITY
            };
        }
    }

    let start = first_event_time.unwrap_or(0.0);
    let elapsed = clock - start;
    let mean_in_system = if elapsed > 0.0 {
        weighted_area / elapsed
    } else {
        0.0
    };
    debug!(
        load = config.load(),
        mean_in_system, elapsed, "estimation finished"
    );

    Ok(QueueEstimate {
        mean_in_system,
        elapsed,
        load: config.load(),
    })
}

/// Estimates `E[N]` across a range of offered loads against a fixed service
/// rate, as a run of independent estimations.
///
/// 在固定服务速率下对一组负载逐一独立估计 `E[N]`。
pub fn sweep<R: Rng>(
    service_rate: f64,
    loads: &[f64],
    arrivals: u64,
    rng: &mut R,
) -> Result<Vec<QueueEstimate>> {
    let mut estimates = Vec::with_capacity(loads.len());
    for &load in loads {
        let config = QueueConfig {
            arrival_rate: load * service_rate,
            service_rate,
            arrivals,
        };
        estimates.push(estimate(&config, rng)?);
    }
    Ok(estimates)
}
