//! # Cache Worker
//!
//! Serves asset requests on a background thread so callers never block on
//! the fetcher.
//!
//! ```text
//! ┌──────────┐   Request    ┌──────────────┐   respond()   ┌────────────┐
//! │  caller  │ ───────────▶ │  CacheWorker │ ────────────▶ │ AssetCache │
//! │          │ ◀─────────── │   (thread)   │               │ + Fetcher  │
//! └──────────┘  reply chan  └──────────────┘               └────────────┘
//! ```

use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use tracing::{debug, warn};

use crate::error::{CacheError, CacheResult};
use crate::fetcher::Fetcher;
use crate::store::{AssetCache, Response};

enum Message {
    Fetch {
        path: String,
        reply: Sender<CacheResult<Response>>,
    },
    Shutdown,
}

/// Background thread answering asset requests.
pub struct CacheWorker {
    sender: Sender<Message>,
    handle: Option<JoinHandle<()>>,
}

impl CacheWorker {
    /// Starts the worker thread.
    pub fn spawn(cache: Arc<AssetCache>, fetcher: Arc<dyn Fetcher>) -> CacheResult<Self> {
        let (sender, receiver) = unbounded::<Message>();
        let handle = std::thread::Builder::new()
            .name("ffcts-cache".to_string())
            .spawn(move || serve(&cache, fetcher.as_ref(), &receiver))
            .map_err(CacheError::Spawn)?;

        Ok(Self {
            sender,
            handle: Some(handle),
        })
    }

    /// Queues a request; the answer arrives on the returned receiver.
    pub fn request(&self, path: &str) -> CacheResult<Receiver<CacheResult<Response>>> {
        let (reply, answer) = bounded(1);
        self.sender
            .send(Message::Fetch {
                path: path.to_string(),
                reply,
            })
            .map_err(|_| CacheError::WorkerGone)?;
        Ok(answer)
    }

    /// Requests `path` and waits for the answer.
    pub fn fetch(&self, path: &str) -> CacheResult<Response> {
        self.request(path)?.recv().map_err(|_| CacheError::WorkerGone)?
    }

    /// Stops the thread after it finishes queued requests.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.sender.send(Message::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("cache worker panicked");
            }
        }
    }
}

impl Drop for CacheWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn serve(cache: &AssetCache, fetcher: &dyn Fetcher, receiver: &Receiver<Message>) {
    debug!(key = %cache.key(), "cache worker started");
    while let Ok(message) = receiver.recv() {
        match message {
            Message::Fetch { path, reply } => {
                let response = cache.respond(&path, fetcher);
                // Caller may have stopped waiting
                let _ = reply.send(response);
            }
            Message::Shutdown => break,
        }
    }
    debug!("cache worker stopped");
}
