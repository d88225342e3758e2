//! Server-Sent Events support

use crate::state_machine::Frame;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

/// Convert a request's frame channel to an SSE body.
///
/// Frames go out as unnamed events so `EventSource.onmessage` sees them. The
/// body ends when the runtime drops its emitter.
pub fn sse_stream(
    frames: mpsc::Receiver<Frame>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = ReceiverStream::new(frames).filter_map(|frame| match frame_to_sse(&frame) {
        Ok(event) => Some(Ok(event)),
        Err(e) => {
            tracing::error!(error = %e, ?frame, "Failed to encode frame");
            None
        }
    });

    Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn frame_to_sse(frame: &Frame) -> Result<Event, serde_json::Error> {
    Ok(Event::default().data(frame.to_json()?))
}
