//! 每条流的窗口状态机。
//! The per-flow window state machine.
//!
//! A connection owns its sequence counters, duplicate-acknowledgment
//! tracking, and window controller. It reacts to acknowledgment and loss
//! signals and issues new send events into the scheduler; nothing outside
//! the connection mutates this state.
//!
//! 连接拥有自己的序列计数器、重复确认跟踪和窗口控制器。它对确认与丢包信号
//! 作出反应，并向调度器发出新的发送事件；连接之外不会改变这些状态。

use crate::config::{LossConfig, WindowConfig};
use crate::congestion::CongestionControl;
use crate::congestion::aimd::Aimd;
use crate::error::Result;
use crate::scheduler::{ConnectionId, Event, EventKind, EventQueue};
use std::collections::HashMap;
use tracing::{debug, trace};


/// The acknowledgment-processing state of a flow.
///
/// 流的确认处理状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Fresh acknowledgments are advancing the window.
    /// 新确认正在推进窗口。
    Growing,
    /// One or more duplicate acknowledgments have been observed since the
    /// last fresh one.
    ///
    /// 自上一个新确认以来已观察到一个或多个重复确认。
    DuplicateCounting,
    /// A loss was just handled; outstanding packets were rolled back and
    /// will be resent as new sends.
    ///
    /// 刚处理完一次丢包；未确认的包已回滚，将作为新发送重发。
    Recovering,
}

/// A single simulated flow competing for the shared buffer.
///
/// 竞争共享缓冲区的一条被仿真的流。
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,

    /// Round-trip delay between a send and its acknowledgment.
    rtt: f64,

    controller: Aimd,

    state: FlowState,

    /// Highest sequence number handed to the scheduler so far.
    /// 迄今为止交给调度器的最高序列号。
    sequence: u64,

    ack_count: u64,

    loss_count: u64,

    /// Packets sent but not yet acknowledged.
    /// 已发送但尚未确认的包数。
    active_packets: u32,

    dup_ack_count: u8,

    dup_ack_threshold: u8,

    /// Highest acknowledged sequence number; `None` until the first
    /// acknowledgment is processed.
    ///
    /// 已确认的最高序列号；在处理第一个确认之前为 `None`。
    last_acked: Option<u64>,

    /// Send timestamps by sequence number. Instrumentation only; nothing in
    /// the control logic reads it back.
    ///
    /// 按序列号记录的发送时间戳。仅用于观测；控制逻辑不会读取它。
    sent_timings: HashMap<u64, f64>,
}

impl Connection {
    /// Creates a flow starting with the configured initial window.
    ///
    /// 创建一条以配置的初始窗口启动的流。
    pub fn new(id: ConnectionId, rtt: f64, window: &WindowConfig, loss: &LossConfig) -> Self {
        Self {
            id,
            rtt,
            controller: Aimd::new(window),
            state: FlowState::Growing,
            sequence: 0,
            ack_count: 0,
            loss_count: 0,
            active_packets: 0,
            dup_ack_count: 0,
            dup_ack_threshold: loss.dup_ack_threshold,
            last_acked: None,
            sent_timings: HashMap::new(),
        }
    }

    /// Sends as many packets as the current window allows, scheduling each
    /// one's acknowledgment one round trip into the future.
    ///
    /// 在当前窗口允许的范围内尽量发送，并把每个包的确认调度到一个往返之后。
    pub fn send_packets(&mut self, now: f64, queue: &mut EventQueue) -> Result<()> {
        while self.active_packets < self.controller.congestion_window() {
            self.sequence += 1;
            self.sent_timings.insert(self.sequence, now);
            queue.schedule(Event {
                time: now + self.rtt,
                kind: EventKind::Ack,
                connection: self.id,
                sequence: self.sequence,
            })?;
            self.active_packets += 1;
            trace!(
                id = self.id,
                seq = self.sequence,
                active = self.active_packets,
                "packet sent"
            );
        }
        Ok(())
    }

    /// Processes one acknowledgment.
    ///
    /// A strictly newer sequence advances the window by one packet; a repeat
    /// of the last acknowledged sequence counts toward the duplicate
    /// threshold and signals a loss when it is reached; anything older is a
    /// stale acknowledgment and is ignored.
    ///
    /// 处理一个确认。严格更新的序列号使窗口加一；与上次确认相同的序列号计入
    /// 重复阈值，达到阈值即视为丢包信号；更旧的序列号是过期确认，直接忽略。
    pub fn process_ack(&mut self, sequence: u64) {
        match self.last_acked {
            Some(last) if sequence == last => {
                self.dup_ack_count += 1;
                self.state = FlowState::DuplicateCounting;
                trace!(
                    id = self.id,
                    seq = sequence,
                    dups = self.dup_ack_count,
                    "duplicate acknowledgment"
                );
                if self.dup_ack_count == self.dup_ack_threshold {
                    debug!(id = self.id, seq = sequence, "duplicate threshold reached");
                    self.handle_packet_loss();
                }
            }
            Some(last) if sequence < last => {
                // Stale acknowledgment, tolerated.
                trace!(id = self.id, seq = sequence, "stale acknowledgment ignored");
            }
            _ => {
                self.dup_ack_count = 0;
                self.last_acked = Some(sequence);
                self.controller.on_ack();
                self.ack_count += 1;
                self.active_packets = self.active_packets.saturating_sub(1);
                self.state = FlowState::Growing;
            }
        }
    }

    /// Reacts to a loss signal, whichever channel raised it: the window is
    /// halved, outstanding packets are considered lost, and the sequence
    /// counter rolls back so they are resent as new sends.
    ///
    /// 对丢包信号作出反应，无论它来自哪个通道：窗口减半，未确认的包视为丢失，
    /// 序列计数器回滚以便它们作为新发送重发。
    pub fn handle_packet_loss(&mut self) {
        self.loss_count += 1;
        self.controller.on_packet_loss();
        self.active_packets = 0;
        self.sequence = self.last_acked.unwrap_or(0);
        self.dup_ack_count = 0;
        self.state = FlowState::Recovering;
        debug!(
            id = self.id,
            cwnd = self.controller.congestion_window(),
            losses = self.loss_count,
            "packet loss handled"
        );
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Current congestion window in packets.
    pub fn window(&self) -> u32 {
        self.controller.congestion_window()
    }

    pub fn ack_count(&self) -> u64 {
        self.ack_count
    }

    pub fn loss_count(&self) -> u64 {
        self.loss_count
    }

    pub fn active_packets(&self) -> u32 {
        self.active_packets
    }

    pub fn dup_ack_count(&self) -> u8 {
        self.dup_ack_count
    }

    pub fn last_acked(&self) -> Option<u64> {
        self.last_acked
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Next-send watermark: the highest sequence number issued so far.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Virtual time at which a sequence number was last sent, if recorded.
    pub fn sent_at(&self, sequence: u64) -> Option<f64> {
        self.sent_timings.get(&sequence).copied()
    }
}
