use std::sync::Arc;

use futures::channel::oneshot;
use image::RgbaImage;

use crate::error::{EditorError, EditorResult};

/// Asynchronous image source: dropped or pasted image bytes are decoded as
/// single-shot tasks and collected by the shell once per frame.
///
/// On native targets the decode runs on a spawned thread; on wasm it runs
/// inline. Either way the result is delivered through a one-shot channel and
/// consumed on the UI thread, which then performs resize + draw + one
/// history capture synchronously.
pub struct ImageLoader {
    pending: Vec<oneshot::Receiver<EditorResult<RgbaImage>>>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// True while at least one decode is still in flight.
    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Queue a decode of raw encoded bytes (PNG, JPEG, ...).
    pub fn submit_bytes(&mut self, bytes: Arc<[u8]>) {
        let (tx, rx) = oneshot::channel();
        self.pending.push(rx);

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let _ = tx.send(decode(&bytes));
        });

        #[cfg(target_arch = "wasm32")]
        {
            let _ = tx.send(decode(&bytes));
        }
    }

    /// Pick up files dropped onto the window this frame.
    pub fn collect_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|input| input.raw.dropped_files.clone());
        for file in dropped {
            if let Some(bytes) = file.bytes {
                log::info!("decoding dropped file: {} ({} bytes)", file.name, bytes.len());
                self.submit_bytes(bytes);
                continue;
            }
            #[cfg(not(target_arch = "wasm32"))]
            if let Some(path) = file.path {
                match std::fs::read(&path) {
                    Ok(bytes) => {
                        log::info!("decoding dropped file: {}", path.display());
                        self.submit_bytes(Arc::from(bytes.into_boxed_slice()));
                    }
                    Err(err) => {
                        log::error!("failed to read dropped file {}: {err}", path.display());
                    }
                }
            }
        }
    }

    /// Drain every decode that has finished since the last call.
    pub fn poll(&mut self) -> Vec<EditorResult<RgbaImage>> {
        let mut done = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            match self.pending[i].try_recv() {
                Ok(Some(result)) => {
                    done.push(result);
                    self.pending.swap_remove(i);
                }
                Ok(None) => i += 1,
                Err(_cancelled) => {
                    done.push(Err(EditorError::DecodeCancelled));
                    self.pending.swap_remove(i);
                }
            }
        }
        done
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(bytes: &[u8]) -> EditorResult<RgbaImage> {
    let img = image::load_from_memory(bytes)?;
    log::debug!("decoded image: {}x{}", img.width(), img.height());
    Ok(img.to_rgba8())
}
