//! Work-stealing parallel harness (spec.md §4.5).
//!
//! Indices `[0, len)` of a mutable slice are split into disjoint chunks up
//! front (`chunk = max(1, len / (10W))`), queued FIFO behind a mutex, and
//! handed out to `W` workers as they finish their previous chunk. Because
//! the chunks are disjoint mutable sub-slices (produced once via
//! `split_at_mut`, never re-derived), every index is written by exactly
//! one worker with no unsafe code required.
//!
//! Workers run on rayon's global thread pool (`rayon::scope`), which is
//! itself backed by a small fixed set of OS threads — the substitute
//! spec.md §9 recommends in place of a hand-rolled pool, while the chunk
//! queue above preserves the tunable chunking semantics the spec
//! describes rather than relying on rayon's own (different) default
//! split strategy.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;

use crate::error::SimError;

/// Distributes work over an index range across a small worker pool.
pub struct ParallelHarness {
    workers: usize,
}

impl ParallelHarness {
    /// `W = 2 × hardware_parallelism` by default (a hyperthreading heuristic).
    pub fn new() -> Self {
        let hw = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { workers: 2 * hw }
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Call `f(global_index, item)` for every element of `items`, across
    /// workers, each element touched by exactly one worker. Returns the
    /// first worker panic message observed, if any; acceleration fields
    /// left untouched by a panicking worker retain their pre-call value
    /// (spec.md §7's "restore to zero" — callers reset `acceleration` to
    /// zero before calling this, so an untouched field is already zero).
    pub fn for_each_indexed_mut<T, F>(&self, items: &mut [T], f: F) -> Result<(), SimError>
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        let total = items.len();
        if total == 0 {
            return Ok(());
        }

        let chunk_size = (total / (10 * self.workers)).max(1);

        let mut queue: VecDeque<(usize, &mut [T])> = VecDeque::new();
        let mut rest = items;
        let mut offset = 0usize;
        while !rest.is_empty() {
            let take = chunk_size.min(rest.len());
            let (chunk, remainder) = rest.split_at_mut(take);
            queue.push_back((offset, chunk));
            offset += take;
            rest = remainder;
        }

        let queue = Mutex::new(queue);
        let worker_count = self.workers.min(queue.lock().unwrap().len().max(1));
        let first_panic: Mutex<Option<String>> = Mutex::new(None);

        rayon::scope(|scope| {
            for _ in 0..worker_count {
                let queue = &queue;
                let f = &f;
                let first_panic = &first_panic;
                scope.spawn(move |_| loop {
                    let next = queue.lock().unwrap().pop_front();
                    let Some((start, chunk)) = next else {
                        break;
                    };
                    for (i, item) in chunk.iter_mut().enumerate() {
                        let global_index = start + i;
                        let result = panic::catch_unwind(AssertUnwindSafe(|| f(global_index, item)));
                        if let Err(payload) = result {
                            let msg = payload
                                .downcast_ref::<&str>()
                                .map(|s| s.to_string())
                                .or_else(|| payload.downcast_ref::<String>().cloned())
                                .unwrap_or_else(|| "worker panicked".to_string());
                            log::warn!("worker panicked during parallel acceleration: {msg}");
                            let mut slot = first_panic.lock().unwrap();
                            if slot.is_none() {
                                *slot = Some(msg);
                            }
                        }
                    }
                });
            }
        });

        match first_panic.into_inner().unwrap() {
            Some(msg) => Err(SimError::WorkerPanic(msg)),
            None => Ok(()),
        }
    }
}

impl Default for ParallelHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn every_index_touched_exactly_once() {
        let harness = ParallelHarness::with_workers(4);
        let mut items = vec![0usize; 137];
        harness
            .for_each_indexed_mut(&mut items, |i, slot| *slot = i)
            .unwrap();
        for (i, v) in items.iter().enumerate() {
            assert_eq!(*v, i);
        }
    }

    #[test]
    fn call_count_matches_length() {
        let harness = ParallelHarness::with_workers(8);
        let mut items = vec![0u8; 1000];
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        harness
            .for_each_indexed_mut(&mut items, move |_, _| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1000);
    }

    #[test]
    fn empty_range_is_a_no_op() {
        let harness = ParallelHarness::with_workers(4);
        let mut items: Vec<u8> = Vec::new();
        harness.for_each_indexed_mut(&mut items, |_, _| panic!("should never run")).unwrap();
    }

    #[test]
    fn worker_panic_is_surfaced_after_join() {
        let harness = ParallelHarness::with_workers(4);
        let mut items = vec![0u8; 50];
        let result = harness.for_each_indexed_mut(&mut items, |i, _| {
            if i == 25 {
                panic!("boom");
            }
        });
        assert!(matches!(result, Err(SimError::WorkerPanic(_))));
    }
}
