//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.

use thiserror::Error;

/// The primary error type for the simulation library.
/// 仿真库的主要错误类型。
#[derive(Debug, Error)]
pub enum Error {
    /// The shared buffer must hold at least one packet for a full run.
    /// 共享缓冲区在一次完整运行中必须至少能容纳一个包。
    #[error("buffer capacity must be at least 1")]
    InvalidBufferCapacity,

    /// The shared service rate must be positive and finite.
    /// 共享服务速率必须为正且有限。
    #[error("service rate must be positive and finite, got {0}")]
    InvalidServiceRate(f64),

    /// A flow's round-trip time must be positive and finite.
    /// 流的往返时间必须为正且有限。
    #[error("round-trip time must be positive and finite, got {0}")]
    InvalidRtt(f64),

    /// The simulation horizon must be non-negative and finite.
    /// 仿真时域必须非负且有限。
    #[error("simulation horizon must be non-negative and finite, got {0}")]
    InvalidHorizon(f64),

    /// A loss probability must lie within `[0, 1]`.
    /// 丢包概率必须位于 `[0, 1]` 区间内。
    #[error("loss probability must lie in [0, 1], got {0}")]
    InvalidLossProbability(f64),

    /// The start-offset bound for the second flow must be non-negative and finite.
    /// 第二条流起始偏移的上界必须非负且有限。
    #[error("start offset bound must be non-negative and finite, got {0}")]
    InvalidStartOffset(f64),

    /// Congestion windows are floored at one packet; zero is not a valid
    /// initial or minimum window.
    ///
    /// 拥塞窗口下限为一个包；零不是有效的初始或最小窗口。
    #[error("congestion window must be at least 1, got {0}")]
    InvalidWindow(u32),

    /// The duplicate-acknowledgment loss threshold must be at least one.
    /// 重复确认丢包阈值必须至少为一。
    #[error("duplicate acknowledgment threshold must be at least 1")]
    InvalidDupAckThreshold,

    /// An event was scheduled at a non-finite virtual time.
    /// 事件被调度到了非有限的虚拟时间点。
    #[error("event time is not finite: {0}")]
    NonFiniteEventTime(f64),

    /// The arrival rate of the waiting-system estimator must be positive
    /// and finite.
    ///
    /// 等待系统估计器的到达速率必须为正且有限。
    #[error("arrival rate must be positive and finite, got {0}")]
    InvalidArrivalRate(f64),

    /// The waiting-system estimator needs at least one arrival to average over.
    /// 等待系统估计器至少需要一个到达事件才能求平均。
    #[error("arrival count must be at least 1")]
    InvalidArrivalCount,
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;
