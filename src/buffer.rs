//! 共享的有界FIFO缓冲区。
//! The shared bounded FIFO buffer.
//!
//! Both flows' acknowledged packets pass through this buffer on their way
//! to the departure process. The buffer itself is a pure data structure; the
//! simulation couples its admission verdicts back into the owning flow's
//! loss handling.
//!
//! 两条流的已确认包在前往离开过程的途中都要经过该缓冲区。缓冲区本身是纯数据
//! 结构；仿真器把它的准入结果耦合回所属流的丢包处理。

use crate::scheduler::ConnectionId;
use std::collections::VecDeque;

/// A packet admitted to the shared buffer, awaiting departure.
///
/// 已进入共享缓冲区、等待离开的包。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferedPacket {
    pub connection: ConnectionId,
    pub sequence: u64,
}

/// The verdict of an admission attempt.
///
/// 准入尝试的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The packet was appended to the buffer.
    /// 包已追加到缓冲区。
    Accepted,
    /// The buffer was full; the packet was dropped.
    /// 缓冲区已满；包被丢弃。
    Dropped,
}

/// A capacity-bounded FIFO of packets pending departure. Packets are
/// appended on admission and removed from the front on departure; there is
/// no reordering.
///
/// 容量受限的待离开包FIFO队列。包在准入时追加，离开时从队首移除；不会重排。
#[derive(Debug)]
pub struct SharedBuffer {
    queue: VecDeque<BufferedPacket>,
    capacity: usize,
}

impl SharedBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends the packet if there is room, or reports a drop.
    ///
    /// 有空间则追加该包，否则报告丢弃。
    pub fn try_admit(&mut self, packet: BufferedPacket) -> Admission {
        if self.queue.len() < self.capacity {
            self.queue.push_back(packet);
            Admission::Accepted
        } else {
            Admission::Dropped
        }
    }

    /// Removes and returns the packet at the front, if any.
    ///
    /// 移除并返回队首的包（如果有）。
    pub fn pop_front(&mut self) -> Option<BufferedPacket> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.queue.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(connection: usize, sequence: u64) -> BufferedPacket {
        BufferedPacket {
            connection,
            sequence,
        }
    }

    #[test]
    fn serves_in_fifo_order() {
        let mut buffer = SharedBuffer::new(4);
        assert_eq!(buffer.try_admit(packet(0, 1)), Admission::Accepted);
        assert_eq!(buffer.try_admit(packet(1, 1)), Admission::Accepted);
        assert_eq!(buffer.try_admit(packet(0, 2)), Admission::Accepted);

        assert_eq!(buffer.pop_front(), Some(packet(0, 1)));
        assert_eq!(buffer.pop_front(), Some(packet(1, 1)));
        assert_eq!(buffer.pop_front(), Some(packet(0, 2)));
        assert_eq!(buffer.pop_front(), None);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut buffer = SharedBuffer::new(2);
        assert_eq!(buffer.try_admit(packet(0, 1)), Admission::Accepted);
        assert_eq!(buffer.try_admit(packet(0, 2)), Admission::Accepted);
        assert!(buffer.is_full());

        assert_eq!(buffer.try_admit(packet(0, 3)), Admission::Dropped);
        assert_eq!(buffer.len(), 2);

        // Room reopens after a departure.
        buffer.pop_front();
        assert_eq!(buffer.try_admit(packet(0, 3)), Admission::Accepted);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn zero_capacity_drops_every_admission() {
        let mut buffer = SharedBuffer::new(0);
        assert!(buffer.is_full());

        for sequence in 1..=5 {
            assert_eq!(buffer.try_admit(packet(0, sequence)), Admission::Dropped);
        }
        assert!(buffer.is_empty());
        assert_eq!(buffer.pop_front(), None);
    }
}
