//! Asynchronous mesh building.
//!
//! [`AsyncMeshBuilder`] owns one long-lived worker thread and a depth-1
//! request slot with last-request-wins coalescing. The owning thread calls
//! [`request`](AsyncMeshBuilder::request) when an input changes and
//! [`poll`](AsyncMeshBuilder::poll) once per processing tick; neither call
//! blocks. Completed builds cross threads through a single-slot
//! [`HandoffCell`], the only datum both threads touch.
//!
//! There is no forced cancellation: a superseded build runs to completion
//! (it is pure CPU work with no side effects to abort) and its result is
//! simply overwritten in the cell by the build for the latest input.

mod handoff;

pub use handoff::HandoffCell;

use std::sync::Arc;
use std::thread;

use parking_lot::{Condvar, Mutex};

use crate::mesh::MeshBuffer;
use crate::source::MeshSource;

/// Outcome of [`AsyncMeshBuilder::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The input was placed in the pending slot; the worker will build it.
    Scheduled,
    /// The same input is already being built; nothing to do.
    InFlight,
    /// The builder is idle and its most recent build was for this input.
    AlreadyBuilt,
}

struct WorkerState<I> {
    /// Latest requested input the worker has not picked up yet. Depth-1:
    /// a newer request replaces it, never queues behind it.
    pending: Option<I>,
    /// Input currently being built.
    in_flight: Option<I>,
    /// Input of the most recently finished build, successful or not.
    completed: Option<I>,
    shutdown: bool,
}

struct Shared<I> {
    state: Mutex<WorkerState<I>>,
    work_ready: Condvar,
    handoff: HandoffCell<Vec<MeshBuffer>>,
}

/// Schedules mesh builds on a background worker and hands completed
/// results to the owning thread.
///
/// Dropping the builder signals the worker, joins it, and discards any
/// undrained result.
pub struct AsyncMeshBuilder<S: MeshSource> {
    shared: Arc<Shared<S::Input>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl<S: MeshSource> AsyncMeshBuilder<S> {
    /// Create a builder around `source` and start its worker thread.
    pub fn new(source: S) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(WorkerState {
                pending: None,
                in_flight: None,
                completed: None,
                shutdown: false,
            }),
            work_ready: Condvar::new(),
            handoff: HandoffCell::new(),
        });

        let worker = {
            let shared = shared.clone();
            thread::Builder::new()
                .name("mesh-builder".into())
                .spawn(move || worker_loop(source, shared))
                .expect("failed to spawn mesh builder worker")
        };

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Schedule a build for `input`. Never blocks.
    ///
    /// Duplicate requests are dropped: an input equal to the in-flight
    /// build, the pending slot, or (while idle) the most recently
    /// completed build is a no-op. Anything else overwrites the pending
    /// slot, discarding a superseded intermediate request.
    pub fn request(&self, input: S::Input) -> RequestOutcome {
        let mut state = self.shared.state.lock();
        if state.in_flight.as_ref() == Some(&input) {
            return RequestOutcome::InFlight;
        }
        if state.pending.as_ref() == Some(&input) {
            return RequestOutcome::Scheduled;
        }
        if state.pending.is_none()
            && state.in_flight.is_none()
            && state.completed.as_ref() == Some(&input)
        {
            return RequestOutcome::AlreadyBuilt;
        }
        if state.pending.replace(input).is_some() {
            log::debug!("superseding pending mesh build request");
        }
        drop(state);
        self.shared.work_ready.notify_one();
        RequestOutcome::Scheduled
    }

    /// Drain the handoff cell. Called once per owning-thread tick; never
    /// blocks. This is the only point where build results cross from the
    /// worker to the consumer.
    pub fn poll(&self) -> Option<Vec<MeshBuffer>> {
        self.shared.handoff.take()
    }

    /// True while a build is pending or in flight.
    pub fn is_busy(&self) -> bool {
        let state = self.shared.state.lock();
        state.pending.is_some() || state.in_flight.is_some()
    }
}

impl<S: MeshSource> Drop for AsyncMeshBuilder<S> {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock();
            state.shutdown = true;
            state.pending = None;
        }
        self.shared.work_ready.notify_one();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn worker_loop<S: MeshSource>(source: S, shared: Arc<Shared<S::Input>>) {
    loop {
        let input = {
            let mut state = shared.state.lock();
            loop {
                if state.shutdown {
                    return;
                }
                if let Some(input) = state.pending.take() {
                    state.in_flight = Some(input.clone());
                    break input;
                }
                shared.work_ready.wait(&mut state);
            }
        };

        // No locks held while the source runs.
        let result = source.build(&input);

        let mut state = shared.state.lock();
        if state.shutdown {
            return;
        }
        // Fill the handoff slot before the builder can look idle, so a
        // consumer that observed `is_busy() == false` finds the result on
        // its next poll.
        match result {
            Ok(buffers) => {
                let buffers: Vec<MeshBuffer> =
                    buffers.into_iter().filter(|b| !b.is_empty()).collect();
                if buffers.is_empty() {
                    log::debug!("mesh build produced no geometry, keeping previous output");
                } else if shared.handoff.store(buffers) {
                    log::debug!("replaced an undrained mesh build result");
                }
            }
            Err(e) => log::warn!("mesh build failed: {e}"),
        }
        state.in_flight = None;
        state.completed = Some(input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::mesh::Topology;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    struct CountingSource {
        builds: Arc<AtomicUsize>,
    }

    impl MeshSource for CountingSource {
        type Input = u64;

        fn build(&self, input: &u64) -> Result<Vec<MeshBuffer>, MeshError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            let triangles = *input as usize;
            let positions = vec![0.0f32; triangles * 9];
            Ok(vec![MeshBuffer::from_streams(
                positions,
                None,
                None,
                Topology::Triangles,
            )])
        }
    }

    fn wait_for<T>(mut f: impl FnMut() -> Option<T>) -> T {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(value) = f() {
                return value;
            }
            assert!(Instant::now() < deadline, "timed out");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_request_then_poll() {
        let builds = Arc::new(AtomicUsize::new(0));
        let builder = AsyncMeshBuilder::new(CountingSource {
            builds: builds.clone(),
        });

        assert_eq!(builder.request(2), RequestOutcome::Scheduled);
        let result = wait_for(|| builder.poll());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].vertex_count(), 6);
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rerequest_after_completion_is_noop() {
        let builds = Arc::new(AtomicUsize::new(0));
        let builder = AsyncMeshBuilder::new(CountingSource {
            builds: builds.clone(),
        });

        builder.request(1);
        let _ = wait_for(|| builder.poll());
        wait_for(|| (!builder.is_busy()).then_some(()));

        assert_eq!(builder.request(1), RequestOutcome::AlreadyBuilt);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(builder.poll().is_none());
    }

    #[test]
    fn test_zero_vertex_result_never_surfaces() {
        let builds = Arc::new(AtomicUsize::new(0));
        let builder = AsyncMeshBuilder::new(CountingSource {
            builds: builds.clone(),
        });

        builder.request(0);
        wait_for(|| (builds.load(Ordering::SeqCst) == 1).then_some(()));
        wait_for(|| (!builder.is_busy()).then_some(()));
        assert!(builder.poll().is_none());
    }

    #[test]
    fn test_drop_while_idle() {
        let builder = AsyncMeshBuilder::new(CountingSource {
            builds: Arc::new(AtomicUsize::new(0)),
        });
        drop(builder); // must not deadlock
    }
}
