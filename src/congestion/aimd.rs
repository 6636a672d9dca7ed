//! An implementation of the additive-increase/multiplicative-decrease window law.
//!
//! 加性增、乘性减窗口算法的实现。

use crate::config::WindowConfig;
use crate::congestion::CongestionControl;
use tracing::{debug, trace};

/// An AIMD window controller.
///
/// Grows the window by one packet per acknowledgment (not per round trip)
/// and halves it on loss, never dropping below the configured floor. The
/// per-ack growth is an intentional simplification for comparative RTT
/// studies rather than a faithful TCP variant.
///
/// 一个AIMD窗口控制器。每收到一个确认（而非每个往返）窗口加一，丢包时窗口
/// 减半，且永不低于配置的下限。按确认增长是为对比RTT研究而做的有意简化，
/// 并非忠实的TCP变体。
#[derive(Debug)]
pub struct Aimd {
    pub(super) congestion_window: u32,

    min_window: u32,
}

impl Aimd {
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            congestion_window: config.initial_window,
            min_window: config.min_window,
        }
    }
}

impl CongestionControl for Aimd {
    fn on_ack(&mut self) {
        self.congestion_window += 1;
        trace!(cwnd = self.congestion_window, "additive increase");
    }

    fn on_packet_loss(&mut self) {
        self.congestion_window = (self.congestion_window / 2).max(self.min_window);
        debug!(cwnd = self.congestion_window, "multiplicative decrease");
    }

    fn congestion_window(&self) -> u32 {
        self.congestion_window
    }
}
