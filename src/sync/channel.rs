//! Transport contract and an in-process implementation.
//!
//! Delivery is at-most-once and best-effort. `send` cannot fail from the
//! caller's point of view: a frame that cannot be delivered is dropped
//! and logged, never retried, and never rolls back the change that
//! produced it.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{trace, warn};

use super::protocol::SyncMessage;
use crate::core::error::SyncError;

/// Callback run once a frame has been handed to the transport.
pub type Ack = Box<dyn FnOnce()>;

/// Duplex transport between the two peers of a match.
pub trait SyncChannel {
    /// Fire-and-forget send. `ack`, if any, runs after the frame is handed off.
    fn send(&mut self, message: &SyncMessage, ack: Option<Ack>);

    /// Next inbound message, if one is waiting.
    ///
    /// Undecodable frames surface as `Err` so the receiver can log them.
    fn try_recv(&mut self) -> Option<Result<SyncMessage, SyncError>>;
}

type Queue = Rc<RefCell<VecDeque<String>>>;

/// One end of an in-memory duplex link.
///
/// Frames are JSON-encoded on send and decoded on receive, so both peers
/// only ever see what crossed the boundary.
///
/// ```
/// use castle_duel::sync::{LocalChannel, SyncChannel, SyncMessage};
/// use castle_duel::core::MatchId;
///
/// let (mut a, mut b) = LocalChannel::pair();
/// let msg = SyncMessage::CastleRevealed { match_id: MatchId::random() };
/// a.send(&msg, None);
/// assert_eq!(b.try_recv().unwrap().unwrap(), msg);
/// assert!(a.try_recv().is_none());
/// ```
#[derive(Debug)]
pub struct LocalChannel {
    outbound: Queue,
    inbound: Queue,
    link_up: Rc<Cell<bool>>,
    sent: usize,
}

impl LocalChannel {
    /// Create two linked endpoints.
    #[must_use]
    pub fn pair() -> (Self, Self) {
        let a_to_b: Queue = Rc::default();
        let b_to_a: Queue = Rc::default();
        let link_up = Rc::new(Cell::new(true));

        let a = Self {
            outbound: Rc::clone(&a_to_b),
            inbound: Rc::clone(&b_to_a),
            link_up: Rc::clone(&link_up),
            sent: 0,
        };
        let b = Self {
            outbound: b_to_a,
            inbound: a_to_b,
            link_up,
            sent: 0,
        };
        (a, b)
    }

    /// Cut or restore the link for both ends. Frames sent while down are lost.
    pub fn set_link_up(&self, up: bool) {
        self.link_up.set(up);
    }

    /// Frames this end has delivered.
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent
    }

    /// Frames waiting to be received at this end.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inbound.borrow().len()
    }

    /// Push a raw frame to the peer, bypassing encoding.
    pub fn send_raw(&mut self, frame: impl Into<String>) {
        self.outbound.borrow_mut().push_back(frame.into());
    }
}

impl SyncChannel for LocalChannel {
    fn send(&mut self, message: &SyncMessage, ack: Option<Ack>) {
        if !self.link_up.get() {
            trace!(event = message.event().name(), "link down, frame dropped");
            return;
        }
        match message.to_frame() {
            Ok(frame) => {
                self.outbound.borrow_mut().push_back(frame);
                self.sent += 1;
                if let Some(ack) = ack {
                    ack();
                }
            }
            Err(e) => warn!(event = message.event().name(), error = %e, "frame not sent"),
        }
    }

    fn try_recv(&mut self) -> Option<Result<SyncMessage, SyncError>> {
        let frame = self.inbound.borrow_mut().pop_front()?;
        Some(SyncMessage::from_frame(&frame))
    }
}
