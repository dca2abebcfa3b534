//! Bounded scoped worker pool for per-block container work.
//!
//! [`WorkerPool::for_each`] feeds items to a `rayon::ThreadPool` from the
//! calling thread inside an in-place scope, so jobs may borrow from the
//! caller's stack and the call returns only once every job has run.  A
//! `crossbeam_channel::bounded` channel pre-filled with tokens acts as a
//! counting semaphore: at most `queue_size + nb_threads` items are handed
//! out at a time, which keeps the number of block buffers alive bounded no
//! matter how large the input is.

use crossbeam_channel::{bounded, Receiver, Sender};
use rayon::ThreadPool as RayonPool;

/// Returns its in-flight slot when the job ends, panicking or not.
struct Slot<'a>(&'a Sender<()>);

impl Drop for Slot<'_> {
    fn drop(&mut self) {
        // The pool owns a receiver, so this can't fail while jobs run.
        let _ = self.0.send(());
    }
}

/// Fixed set of worker threads plus an in-flight limit.
pub struct WorkerPool {
    pool: RayonPool,
    /// Each token in the channel is one free in-flight slot.
    slot_tx: Sender<()>,
    slot_rx: Receiver<()>,
    nb_threads: usize,
}

impl WorkerPool {
    /// Builds a pool with `nb_threads` workers and room for `queue_size`
    /// handed-out items beyond the running ones.  Returns `None` when either
    /// count is zero or the threads can't be spawned.
    pub fn new(nb_threads: usize, queue_size: usize) -> Option<Self> {
        if nb_threads < 1 || queue_size < 1 {
            return None;
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(nb_threads)
            .thread_name(|i| format!("lz77-worker-{i}"))
            .build()
            .ok()?;

        let capacity = queue_size + nb_threads;
        let (slot_tx, slot_rx) = bounded(capacity);
        for _ in 0..capacity {
            slot_tx.send(()).ok()?;
        }

        Some(WorkerPool {
            pool,
            slot_tx,
            slot_rx,
            nb_threads,
        })
    }

    pub fn nb_threads(&self) -> usize {
        self.nb_threads
    }

    /// Runs `work` once per item of `items` on the workers and returns when
    /// all of them have finished.
    ///
    /// `items` is pulled on the calling thread, one item per free slot, so a
    /// lazy iterator (e.g. one ending in `take_while` on a failure flag)
    /// stops submission as soon as it yields `None`.  A panic in `work` is
    /// re-raised here after the remaining jobs complete.
    pub fn for_each<I, F>(&self, items: I, work: F)
    where
        I: IntoIterator,
        I::Item: Send,
        F: Fn(I::Item) + Sync,
    {
        let work = &work;
        let slot_tx = &self.slot_tx;
        self.pool.in_place_scope(|scope| {
            for item in items {
                if self.slot_rx.recv().is_err() {
                    break;
                }
                scope.spawn(move |_| {
                    let _slot = Slot(slot_tx);
                    work(item);
                });
            }
        });
    }
}
