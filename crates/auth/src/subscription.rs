//! Subscription handle for session events.
//!
//! Same mechanics as a broadcast bus: each subscriber owns a receiver, the
//! publisher keeps the matching senders and prunes the dead ones on publish.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub(crate) fn channel() -> (Sender<M>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { receiver: rx })
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Take every message published since the last call.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Fan-out list of live subscribers.
#[derive(Debug)]
pub(crate) struct Subscribers<M> {
    senders: Vec<Sender<M>>,
}

impl<M> Default for Subscribers<M> {
    fn default() -> Self {
        Self {
            senders: Vec::new(),
        }
    }
}

impl<M: Clone> Subscribers<M> {
    pub(crate) fn subscribe(&mut self) -> Subscription<M> {
        let (tx, sub) = Subscription::channel();
        self.senders.push(tx);
        sub
    }

    pub(crate) fn publish(&mut self, message: M) {
        // Drop any dead subscribers while publishing.
        self.senders.retain(|tx| tx.send(message.clone()).is_ok());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}
