//! Thread-safe registry owning every live layer.

use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use crate::synth::layer::Layer;

/// Shared container for all currently sounding layers.
///
/// The control context and the render context meet here on separate
/// locks: [`add`](Self::add) appends to a pending inbox, and
/// [`render_snapshot`](Self::render_snapshot) — called only from the
/// render context — drains that inbox into the active list it hands
/// back. Synthesis therefore never holds the lock `add` takes, so a
/// control thread registering layers cannot stall an audio callback,
/// and a layer added before a render call begins is picked up by that
/// call or a later one, never an earlier one.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    pending: Mutex<Vec<Layer>>,
    active: Mutex<Vec<Layer>>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one layer. Ownership moves to the registry; the render
    /// context picks it up on its next snapshot.
    pub fn add(&self, layer: Layer) {
        self.pending.lock().unwrap().push(layer);
    }

    /// Register a batch of layers under a single lock acquisition.
    pub fn add_all(&self, mut layers: Vec<Layer>) {
        self.pending.lock().unwrap().append(&mut layers);
    }

    /// Prune expired layers and hand the live list to the render context.
    ///
    /// This is the only place layers are destroyed: anything whose
    /// lifetime has elapsed at `now` is dropped before the guard is
    /// returned. The active-side lock is only ever taken here, so
    /// holding the guard through synthesis never blocks [`add`](Self::add).
    pub fn render_snapshot(&self, now: Instant) -> MutexGuard<'_, Vec<Layer>> {
        let mut active = self.active.lock().unwrap();
        {
            let mut pending = self.pending.lock().unwrap();
            active.append(&mut pending);
        }
        active.retain(|layer| !layer.is_expired(now));
        active
    }

    /// Number of layers the registry currently owns, including those
    /// not yet pruned. Control-side use only (logging, drain waits).
    ///
    /// The locks are taken one at a time, never together:
    /// `render_snapshot` acquires `pending` while holding `active`, so
    /// holding both here in the opposite order could deadlock against
    /// a concurrent render call.
    pub fn len(&self) -> usize {
        let pending = self.pending.lock().unwrap().len();
        pending + self.active.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::layer::Waveform;
    use std::time::Duration;

    fn layer_with_duration(duration: f32, created_at: Instant) -> Layer {
        Layer::new(220.0, duration, 0.5, 0.0, Waveform::Sine, created_at)
    }

    #[test]
    fn empty_registry_snapshots_to_silence() {
        let registry = LayerRegistry::new();
        assert!(registry.render_snapshot(Instant::now()).is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn added_layer_appears_in_the_next_snapshot() {
        let registry = LayerRegistry::new();
        let now = Instant::now();
        registry.add(layer_with_duration(5.0, now));
        assert_eq!(registry.render_snapshot(now).len(), 1);
    }

    #[test]
    fn layer_is_live_iff_lifetime_has_not_elapsed() {
        let registry = LayerRegistry::new();
        let now = Instant::now();
        registry.add(layer_with_duration(1.0, now));

        let just_before = now + Duration::from_millis(999);
        assert_eq!(registry.render_snapshot(just_before).len(), 1);

        let just_after = now + Duration::from_millis(1001);
        assert_eq!(registry.render_snapshot(just_after).len(), 0);

        // Once pruned a layer never reappears, even at an earlier `now`.
        assert_eq!(registry.render_snapshot(now).len(), 0);
    }

    #[test]
    fn concurrent_adds_never_stall_the_render_context() {
        use std::sync::{mpsc, Arc};
        use std::thread;

        let registry = Arc::new(LayerRegistry::new());
        let (done_tx, done_rx) = mpsc::channel();

        // Render context: snapshot in a tight loop, as the audio
        // callback does every block.
        let render_registry = registry.clone();
        let render_done = done_tx.clone();
        thread::spawn(move || {
            let start = Instant::now();
            for i in 0..50_000_u64 {
                let now = start + Duration::from_micros(i);
                let _ = render_registry.render_snapshot(now).len();
            }
            let _ = render_done.send("render");
        });

        // Control context: interleave adds with len polls, as the
        // orchestrator and drain wait do.
        let control_registry = registry.clone();
        thread::spawn(move || {
            let now = Instant::now();
            for _ in 0..50_000 {
                control_registry.add(layer_with_duration(0.0005, now));
                let _ = control_registry.len();
            }
            let _ = done_tx.send("control");
        });

        for _ in 0..2 {
            done_rx
                .recv_timeout(Duration::from_secs(10))
                .expect("a registry context stalled; add/len must never block against render_snapshot");
        }
    }

    #[test]
    fn batch_add_keeps_every_layer() {
        let registry = LayerRegistry::new();
        let now = Instant::now();
        registry.add_all(vec![
            layer_with_duration(5.0, now),
            layer_with_duration(6.0, now),
            layer_with_duration(0.5, now),
        ]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.render_snapshot(now + Duration::from_secs(1)).len(), 2);
    }
}
