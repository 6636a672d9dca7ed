//! 吞吐量与有效吞吐量时间序列的采集。
//! Collection of throughput and goodput time series.

use crate::connection::Connection;
use crate::scheduler::ConnectionId;

/// One throughput/goodput observation for a single flow.
///
/// 单条流的一次吞吐量/有效吞吐量观测。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Virtual time of the observation.
    pub time: f64,
    /// Acknowledgments per time unit since the start of the run.
    /// 自运行开始以来每时间单位的确认数。
    pub throughput: f64,
    /// Throughput minus the rate attributable to losses. Can go negative
    /// early in a run when losses outnumber acknowledgments.
    ///
    /// 吞吐量减去丢包所占的速率。运行早期丢包多于确认时可为负。
    pub goodput: f64,
}

/// Appends one sample per flow after every processed event. The series are
/// read-only to every other component.
///
/// 每处理一个事件就为每条流追加一个样本。序列对其他组件只读。
#[derive(Debug, Default)]
pub struct MetricsCollector {
    series: Vec<Vec<Sample>>,
}

impl MetricsCollector {
    /// Creates a collector for the given number of flows.
    pub fn new(connections: usize) -> Self {
        Self {
            series: vec![Vec::new(); connections],
        }
    }

    /// Records the flow's rates as observed at virtual time `now`. Both
    /// rates are defined as zero at time zero.
    ///
    /// 记录该流在虚拟时间 `now` 的速率。时间为零时两个速率都定义为零。
    pub fn record(&mut self, now: f64, connection: &Connection) {
        let (throughput, goodput) = if now > 0.0 {
            let acks = connection.ack_count() as f64;
            let losses = connection.loss_count() as f64;
            (acks / now, (acks - losses) / now)
        } else {
            (0.0, 0.0)
        };
        if let Some(series) = self.series.get_mut(connection.id()) {
            series.push(Sample {
                time: now,
                throughput,
                goodput,
            });
        }
    }

    /// The recorded time series for one flow.
    /// 某条流已记录的时间序列。
    pub fn series(&self, connection: ConnectionId) -> &[Sample] {
        self.series.get(connection).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of samples recorded for one flow.
    pub fn sample_count(&self, connection: ConnectionId) -> usize {
        self.series(connection).len()
    }
}
