//! Message plumbing between the adapter and a peer. Wire framing and
//! handshakes live outside the crate; implementations only move
//! [`Message`] values in order.

use crate::protocol::Message;

#[async_trait::async_trait]
pub trait Transport: Send {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod in_memory;

pub use in_memory::InMemoryTransport;
