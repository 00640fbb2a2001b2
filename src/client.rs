//! Transport and completion-queue plumbing shared by admin clients.
//!
//! The pieces here form the narrow seam between the synchronous request
//! construction in [`crate::admin`] and whatever performs the actual broker
//! exchange: a transport receives a fully-validated [`AdminRequest`] together
//! with a [`CompletionSender`], does its work on its own thread(s), and hands
//! exactly one [`AdminEvent`] back through the sender. The event travels over
//! the client's completion queue and is forwarded to the waiting caller by
//! the client's polling thread.

use std::sync::mpsc;

use futures_channel::oneshot;

use crate::admin::{AdminEvent, AdminRequest};
use crate::log::warn;

/// A collaborator that carries admin requests to a broker.
///
/// Implementations own connection management, leader discovery, and the wire
/// encoding of requests and responses; none of that is visible to the admin
/// client. The contract is exactly one completion per dispatched request:
/// call [`CompletionSender::complete`] once the outcome is known, or drop the
/// sender to signal that no outcome will ever be produced (the caller then
/// observes [`KafkaError::Canceled`]).
///
/// Result batches handed back through the sender must contain one item per
/// submitted spec, in submission order, regardless of any reordering that
/// happened on the wire.
///
/// [`KafkaError::Canceled`]: crate::error::KafkaError::Canceled
pub trait AdminTransport: Send + Sync + 'static {
    /// Dispatches a request. Must not block on broker I/O.
    fn dispatch(&self, request: AdminRequest, completion: CompletionSender);
}

/// The write half of one admin completion.
///
/// Consumed by [`complete`](CompletionSender::complete); dropping it without
/// completing cancels the associated caller future.
pub struct CompletionSender {
    queue: mpsc::Sender<CompletionEvent>,
    reply: oneshot::Sender<AdminEvent>,
}

impl CompletionSender {
    pub(crate) fn new(
        queue: mpsc::Sender<CompletionEvent>,
        reply: oneshot::Sender<AdminEvent>,
    ) -> CompletionSender {
        CompletionSender { queue, reply }
    }

    /// Enqueues the completion event for delivery to the caller.
    pub fn complete(self, event: AdminEvent) {
        let completion = CompletionEvent {
            event,
            reply: self.reply,
        };
        if self.queue.send(completion).is_err() {
            warn!("completion queue closed, dropping admin completion");
        }
    }
}

/// A completion event plus the channel it must be delivered on.
pub(crate) struct CompletionEvent {
    pub(crate) event: AdminEvent,
    pub(crate) reply: oneshot::Sender<AdminEvent>,
}
