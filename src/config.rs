//! 定义了仿真运行的可配置参数。
//! Defines configurable parameters for simulation runs.

use crate::error::{Error, Result};

/// A structure containing all configurable parameters for a simulation run.
///
/// 包含一次仿真运行所有可配置参数的结构体。
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Capacity of the shared buffer, in packets. Acknowledgments arriving
    /// while the buffer is full are dropped and count as losses.
    ///
    /// 共享缓冲区的容量（以包为单位）。缓冲区满时到达的确认会被丢弃并计为丢包。
    pub buffer_capacity: usize,

    /// Rate of the shared departure process, in packets per time unit.
    /// Service durations are drawn from an exponential distribution with
    /// this rate.
    ///
    /// 共享离开过程的速率（包/时间单位）。服务时长从该速率的指数分布中抽取。
    pub service_rate: f64,

    /// The virtual-time horizon. No event is processed once the clock has
    /// reached it; a horizon of zero terminates before the first event.
    ///
    /// 虚拟时间时域。时钟到达时域后不再处理任何事件；时域为零时在第一个事件前终止。
    pub horizon: f64,

    /// Parameters of the first flow.
    /// 第一条流的参数。
    pub flow_a: FlowConfig,

    /// Parameters of the second flow.
    /// 第二条流的参数。
    pub flow_b: FlowConfig,

    /// Loss-model parameters shared by both flows.
    /// 两条流共享的丢包模型参数。
    pub loss: LossConfig,

    /// Window-control parameters shared by both flows.
    /// 两条流共享的窗口控制参数。
    pub window: WindowConfig,

    /// Upper bound of the uniform draw for the second flow's start offset.
    /// The first flow always starts at virtual time zero.
    ///
    /// 第二条流起始偏移均匀抽样的上界。第一条流总是在虚拟时间零启动。
    pub max_start_offset: f64,
}

/// Per-flow parameters.
///
/// 每条流的参数。
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Round-trip delay between sending a packet and the arrival of its
    /// acknowledgment.
    ///
    /// 从发送一个包到其确认到达之间的往返延迟。
    pub rtt: f64,
}

/// Loss-model parameters.
///
/// 丢包模型参数。
#[derive(Debug, Clone)]
pub struct LossConfig {
    /// Probability of an independent random loss drawn after every
    /// processed acknowledgment event, regardless of buffer state.
    ///
    /// 每个确认事件处理后抽取的独立随机丢包概率，与缓冲区状态无关。
    pub random_loss_probability: f64,

    /// Number of consecutive duplicate acknowledgments that signals a loss.
    /// 连续重复确认达到多少次即视为丢包信号。
    pub dup_ack_threshold: u8,
}

/// Window-control parameters.
///
/// 窗口控制参数。
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// The initial congestion window size in packets.
    /// 初始拥塞窗口大小（以包为单位）。
    pub initial_window: u32,

    /// The minimum congestion window size in packets. Every decrease is
    /// floored at this value.
    ///
    /// 最小拥塞窗口大小（以包为单位）。每次减小都以该值为下限。
    pub min_window: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 15,
            service_rate: 3.0,
            horizon: 1000.0,
            flow_a: FlowConfig::default(),
            flow_b: FlowConfig::default(),
            loss: LossConfig::default(),
            window: WindowConfig::default(),
            max_start_offset: 10.0,
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self { rtt: 50.0 }
    }
}

impl Default for LossConfig {
    fn default() -> Self {
        Self {
            random_loss_probability: 0.15,
            dup_ack_threshold: 3,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            initial_window: 1,
            min_window: 1,
        }
    }
}

impl SimConfig {
    /// Checks the fatal-parameter conditions. Everything else the simulator
    /// handles as policy rather than failure.
    ///
    /// 检查致命参数条件。除此之外的情况仿真器均作为策略处理，而非失败。
    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(Error::InvalidBufferCapacity);
        }
        if !self.service_rate.is_finite() || self.service_rate <= 0.0 {
            return Err(Error::InvalidServiceRate(self.service_rate));
        }
        for flow in [&self.flow_a, &self.flow_b] {
            if !flow.rtt.is_finite() || flow.rtt <= 0.0 {
                return Err(Error::InvalidRtt(flow.rtt));
            }
        }
        if !self.horizon.is_finite() || self.horizon < 0.0 {
            return Err(Error::InvalidHorizon(self.horizon));
        }
        let p = self.loss.random_loss_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidLossProbability(p));
        }
        if self.loss.dup_ack_threshold == 0 {
            return Err(Error::InvalidDupAckThreshold);
        }
        if self.window.initial_window == 0 {
            return Err(Error::InvalidWindow(self.window.initial_window));
        }
        if self.window.min_window == 0 {
            return Err(Error::InvalidWindow(self.window.min_window));
        }
        if !self.max_start_offset.is_finite() || self.max_start_offset < 0.0 {
            return Err(Error::InvalidStartOffset(self.max_start_offset));
        }
        Ok(())
    }
}
