//! Host-side message queue.

use im::Vector;

use super::message::{MessageBody, ReplicationMessage};

/// Ordered, gapless queue of outgoing messages.
///
/// Messages are stamped with a logical counter at emission. Snapshots are
/// cheap (`im::Vector` shares structure), so presentation and tests can hold
/// the full history while the transport drains it.
#[derive(Clone, Debug, Default)]
pub struct Outbox {
    pending: Vector<ReplicationMessage>,
    history: Vector<ReplicationMessage>,
    next_timestamp: u64,
}

impl Outbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outbox whose first message carries `next_timestamp`.
    #[must_use]
    pub fn starting_at(next_timestamp: u64) -> Self {
        Self {
            next_timestamp,
            ..Self::default()
        }
    }

    /// Stamp and queue a message body.
    pub fn emit(&mut self, turn: u32, round: u32, body: MessageBody) -> &ReplicationMessage {
        let message = ReplicationMessage {
            timestamp: self.next_timestamp,
            turn,
            round,
            body,
        };
        self.next_timestamp += 1;
        self.history.push_back(message.clone());
        self.pending.push_back(message);
        // Just pushed.
        &self.pending[self.pending.len() - 1]
    }

    /// Take every message not yet handed to the transport.
    pub fn drain(&mut self) -> Vec<ReplicationMessage> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Every message emitted so far, drained or not.
    #[must_use]
    pub fn history(&self) -> Vector<ReplicationMessage> {
        self.history.clone()
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Timestamp the next message will carry.
    #[must_use]
    pub fn next_timestamp(&self) -> u64 {
        self.next_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replication::message::BattleEnded;

    fn ended() -> MessageBody {
        MessageBody::BattleEnded(BattleEnded {
            winner: None,
            rounds: 1,
        })
    }

    #[test]
    fn test_timestamps_are_gapless() {
        let mut outbox = Outbox::new();
        outbox.emit(1, 1, ended());
        outbox.emit(1, 1, ended());
        let first = outbox.drain();
        outbox.emit(2, 1, ended());
        let second = outbox.drain();

        let stamps: Vec<_> = first.iter().chain(&second).map(|m| m.timestamp).collect();
        assert_eq!(stamps, vec![0, 1, 2]);
        assert_eq!(outbox.pending_len(), 0);
        assert_eq!(outbox.history().len(), 3);
    }

    #[test]
    fn test_resumed_outbox_continues_stamps() {
        let mut outbox = Outbox::starting_at(7);
        let message = outbox.emit(3, 2, ended());
        assert_eq!((message.timestamp, message.turn, message.round), (7, 3, 2));
        assert_eq!(outbox.next_timestamp(), 8);
    }
}
