//! 仿真驱动器：虚拟时钟、事件循环与共享资源的所有者。
//! The simulation driver: owner of the virtual clock, event loop, and
//! shared resources.
//!
//! Control flow per popped event: the clock takes the event's time, the
//! acknowledgment runs through buffer admission and the departure process,
//! an independent random-loss draw may penalize the owning flow, the flow
//! refills its window with new sends, and one metrics sample is recorded
//! per flow. The loop ends when the clock reaches the horizon or the queue
//! drains; remaining events are silently dropped.
//!
//! 每弹出一个事件：时钟取该事件的时间，确认经过缓冲区准入与离开过程，一次
//! 独立的随机丢包抽样可能惩罚所属流，该流补满窗口发出新包，并为每条流记录
//! 一个指标样本。时钟到达时域或队列耗尽时循环结束；剩余事件被静默丢弃。

use crate::buffer::{Admission, BufferedPacket, SharedBuffer};
use crate::config::SimConfig;
use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::metrics::MetricsCollector;
use crate::scheduler::{ConnectionId, EventKind, EventQueue};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp};
use tracing::{debug, trace};


/// Number of flows competing for the shared buffer.
const FLOW_COUNT: usize = 2;

/// A single simulation run: two AIMD flows, one shared buffer, one
/// exponential server.
///
/// 一次仿真运行：两条AIMD流、一个共享缓冲区、一个指数服务台。
pub struct Simulation<R: Rng> {
    clock: f64,
    horizon: f64,
    queue: EventQueue,
    buffer: SharedBuffer,
    connections: [Connection; FLOW_COUNT],
    metrics: MetricsCollector,
    rng: R,
    service: Exp<f64>,
    random_loss_probability: f64,
}

impl Simulation<StdRng> {
    /// Creates a run with a deterministic seeded generator. Two runs built
    /// from the same configuration and seed produce identical series.
    ///
    /// 以确定性的种子生成器创建一次运行。相同配置与种子构建的两次运行产生
    /// 完全相同的序列。
    pub fn with_seed(config: &SimConfig, seed: u64) -> Result<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Validates the configuration, builds both flows, and seeds the event
    /// queue with their first windows. The first flow starts at time zero;
    /// the second at a uniform random offset.
    ///
    /// 校验配置，构建两条流，并把它们的第一批窗口送入事件队列。第一条流在
    /// 时间零启动；第二条流在一个均匀随机偏移处启动。
    pub fn new(config: &SimConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let service = Exp::new(config.service_rate)
            .map_err(|_| Error::InvalidServiceRate(config.service_rate))?;

        let mut queue = EventQueue::new();
        let mut connections = [
            Connection::new(0, config.flow_a.rtt, &config.window, &config.loss),
            Connection::new(1, config.flow_b.rtt, &config.window, &config.loss),
        ];

        let offset = rng.random::<f64>() * config.max_start_offset;
        connections[0].send_packets(0.0, &mut queue)?;
        connections[1].send_packets(offset, &mut queue)?;
        debug!(offset, "flows started");

        Ok(Self {
            clock: 0.0,
            horizon: config.horizon,
            queue,
            buffer: SharedBuffer::new(config.buffer_capacity),
            connections,
            metrics: MetricsCollector::new(FLOW_COUNT),
            rng,
            service,
            random_loss_probability: config.loss.random_loss_probability,
        })
    }

    /// Processes the next pending event and returns its virtual time, or
    /// `None` once the clock has reached the horizon or the queue is empty.
    /// Times returned by consecutive calls never decrease.
    ///
    /// 处理下一个待处理事件并返回其虚拟时间；时钟到达时域或队列为空时返回
    /// `None`。连续调用返回的时间不会减小。
    pub fn step(&mut self) -> Result<Option<f64>> {
        if self.clock >= self.horizon {
            return Ok(None);
        }
        let Some(event) = self.queue.pop_next() else {
            return Ok(None);
        };
        self.clock = event.time;
        trace!(time = event.time, connection = event.connection, "event popped");

        match event.kind {
            EventKind::Ack => self.on_ack(event.connection, event.sequence),
        }

        // Independent random-loss channel, drawn after every acknowledgment
        // regardless of what the acknowledgment itself produced.
        if self.rng.random::<f64>() < self.random_loss_probability {
            debug!(connection = event.connection, "random loss");
            self.connections[event.connection].handle_packet_loss();
        }

        self.connections[event.connection].send_packets(self.clock, &mut self.queue)?;

        for connection in &self.connections {
            self.metrics.record(self.clock, connection);
        }
        Ok(Some(event.time))
    }

    /// Runs the event loop to completion.
    ///
    /// 运行事件循环直到结束。
    pub fn run(&mut self) -> Result<()> {
        while self.step()?.is_some() {}
        debug!(clock = self.clock, "simulation finished");
        Ok(())
    }

    /// Admission: a full buffer turns the acknowledgment into an overflow
    /// drop for the owning flow; otherwise the acknowledgment is accepted
    /// into the system and a departure is served.
    ///
    /// 准入：缓冲区满时该确认成为所属流的溢出丢包；否则确认被系统接受，并
    /// 服务一次离开。
    fn on_ack(&mut self, connection: ConnectionId, sequence: u64) {
        let packet = BufferedPacket {
            connection,
            sequence,
        };
        match self.buffer.try_admit(packet) {
            Admission::Accepted => {
                self.connections[connection].process_ack(sequence);
                self.serve_one();
            }
            Admission::Dropped => {
                debug!(connection, sequence, "buffer overflow drop");
                self.connections[connection].handle_packet_loss();
            }
        }
    }

    /// Departure: the front packet leaves after an exponential service
    /// duration that advances the clock, and acknowledgment processing runs
    /// a second time for the packet's owner. Admission and departure are
    /// two distinct acknowledgment passes over one packet.
    ///
    /// 离开：队首的包经过一段推进时钟的指数服务时长后离开，并为该包的所属
    /// 流再执行一次确认处理。准入与离开是同一个包上两次独立的确认处理。
    fn serve_one(&mut self) {
        let Some(packet) = self.buffer.pop_front() else {
            return;
        };
        let service_time = self.service.sample(&mut self.rng);
        self.clock += service_time;
        trace!(
            connection = packet.connection,
            sequence = packet.sequence,
            service_time,
            "departure"
        );
        self.connections[packet.connection].process_ack(packet.sequence);
    }

    /// Current virtual time.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Both flows, indexed by connection id.
    pub fn connections(&self) -> &[Connection; FLOW_COUNT] {
        &self.connections
    }

    /// The recorded per-flow time series.
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// The shared buffer.
    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    /// Number of events still pending.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }
}
