//! Outbound frame channel for one request

use crate::state_machine::Frame;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Frames buffered between the runtime and the SSE body
const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmitError {
    #[error("client disconnected")]
    Disconnected,
    #[error("stream already ended")]
    Finished,
}

/// Sending half of a request's frame stream. Order of `emit` calls is the
/// order the client sees. Nothing is accepted after `End`.
#[derive(Debug, Clone)]
pub struct FrameEmitter {
    tx: mpsc::Sender<Frame>,
    finished: Arc<AtomicBool>,
    typing: Arc<AtomicBool>,
}

impl FrameEmitter {
    pub fn channel() -> (Self, mpsc::Receiver<Frame>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (
            Self {
                tx,
                finished: Arc::new(AtomicBool::new(false)),
                typing: Arc::new(AtomicBool::new(false)),
            },
            rx,
        )
    }

    pub async fn emit(&self, frame: Frame) -> Result<(), EmitError> {
        if frame.is_end() {
            if self.finished.swap(true, Ordering::AcqRel) {
                return Err(EmitError::Finished);
            }
        } else if self.is_finished() {
            return Err(EmitError::Finished);
        }

        let typing = match frame {
            Frame::Typing { on } => Some(on),
            _ => None,
        };

        self.tx
            .send(frame)
            .await
            .map_err(|_| EmitError::Disconnected)?;

        if let Some(on) = typing {
            self.typing.store(on, Ordering::Release);
        }
        Ok(())
    }

    /// Whether the last typing frame sent was `on`
    pub fn is_typing(&self) -> bool {
        self.typing.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Resolves once the receiving side (the client connection) is gone
    pub async fn closed(&self) {
        self.tx.closed().await;
    }
}
