use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    audio::levels::{AudioBlock, MAX_AUDIO_MIXES},
    foundation::error::{MultiviewError, MultiviewResult},
};

/// Handle returned by [`AudioOutput::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Callback invoked on the audio thread once per delivered block.
pub type AudioCallback = Box<dyn FnMut(&AudioBlock<'_>) + Send + 'static>;

/// The audio subsystem's per-mix output tap.
pub trait AudioOutput: Send + Sync {
    fn subscribe(&self, mix: usize, callback: AudioCallback) -> MultiviewResult<SubscriptionId>;

    /// Detach a callback. Must not return while that callback is running, and the callback
    /// is never invoked again afterwards.
    fn unsubscribe(&self, id: SubscriptionId);
}

struct Tap {
    id: SubscriptionId,
    mix: usize,
    callback: AudioCallback,
}

#[derive(Default)]
struct TapList {
    next_id: u64,
    taps: Vec<Tap>,
}

/// An [`AudioOutput`] driven by hand: blocks are pushed through [`MemoryAudioOutput::deliver`].
///
/// Delivery holds the tap lock for the whole dispatch, so `unsubscribe` waits for any
/// in-flight callback.
#[derive(Default)]
pub struct MemoryAudioOutput {
    taps: Mutex<TapList>,
}

impl MemoryAudioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn taps(&self) -> MutexGuard<'_, TapList> {
        self.taps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Invoke every callback subscribed to `mix`; returns how many ran.
    pub fn deliver(&self, mix: usize, block: &AudioBlock<'_>) -> usize {
        let mut list = self.taps();
        let mut ran = 0;
        for tap in list.taps.iter_mut().filter(|t| t.mix == mix) {
            (tap.callback)(block);
            ran += 1;
        }
        ran
    }

    /// Active subscriptions as `(id, mix)` pairs.
    pub fn subscriptions(&self) -> Vec<(SubscriptionId, usize)> {
        self.taps().taps.iter().map(|t| (t.id, t.mix)).collect()
    }
}

impl AudioOutput for MemoryAudioOutput {
    fn subscribe(&self, mix: usize, callback: AudioCallback) -> MultiviewResult<SubscriptionId> {
        if mix >= MAX_AUDIO_MIXES {
            return Err(MultiviewError::audio(format!(
                "mix {mix} out of range (max {MAX_AUDIO_MIXES})"
            )));
        }
        let mut list = self.taps();
        let id = SubscriptionId(list.next_id);
        list.next_id += 1;
        list.taps.push(Tap { id, mix, callback });
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.taps().taps.retain(|t| t.id != id);
    }
}

impl std::fmt::Debug for MemoryAudioOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryAudioOutput")
            .field("subscriptions", &self.subscriptions())
            .finish()
    }
}
