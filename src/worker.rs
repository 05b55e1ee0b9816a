// Copyright 2019 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

// Permission is hereby granted, free of charge, to any person obtaining a copy of this
// software and associated documentation files (the "Software"), to deal in the Software
// without restriction, including without limitation the rights to use, copy, modify,
// merge, publish, distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED,
// INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT
// HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE
// SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
use crate::ErrorKind;
use log::debug;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rayon::{ThreadPool, ThreadPoolBuilder};

/// A fixed size pool of threads conversions can fan out to.
///
/// Conversions split their rows into contiguous subsets, one per thread at most, and
/// block until every subset has been processed.
pub struct Worker {
    pool: ThreadPool,
}

impl Worker {
    /// Creates a pool with the given number of threads, 0 selects one thread per
    /// logical cpu
    ///
    /// # Errors
    ///
    /// * [`InvalidOperation`] if the threads cannot be spawned
    ///
    /// [`InvalidOperation`]: ./enum.ErrorKind.html#variant.InvalidOperation
    pub fn new(threads: usize) -> Result<Worker, ErrorKind> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("frame-converter-{index}"))
            .build()
            .map_err(|_| ErrorKind::InvalidOperation)?;

        debug!("worker created with {} threads", pool.current_num_threads());
        Ok(Worker { pool })
    }

    /// Number of threads of the pool
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Number of subsets `size` elements are split into
    pub(crate) fn subsets(&self, size: u32, minimum_per_task: u32) -> u32 {
        let maximum = size / minimum_per_task.max(1);
        let threads = u32::try_from(self.threads()).unwrap_or(u32::MAX);
        maximum.min(threads).max(1)
    }

    /// Invokes `function(first_element, elements)` over contiguous subsets covering
    /// `[first, first + size)`, each at least `minimum_per_task` long.
    ///
    /// Returns once every subset has been processed. A single subset runs on the
    /// calling thread.
    pub fn execute_function<F>(&self, first: u32, size: u32, minimum_per_task: u32, function: F)
    where
        F: Fn(u32, u32) + Sync,
    {
        if size == 0 {
            return;
        }

        let subsets = self.subsets(size, minimum_per_task);
        if subsets == 1 {
            function(first, size);
            return;
        }

        let bound = |index: u32| {
            // Cannot overflow, the quotient is at most size
            (u64::from(size) * u64::from(index) / u64::from(subsets)) as u32
        };

        self.pool.install(|| {
            (0..subsets).into_par_iter().for_each(|index| {
                let begin = bound(index);
                let end = bound(index + 1);
                function(first + begin, end - begin);
            });
        });
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("threads", &self.threads())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn collect(worker: &Worker, first: u32, size: u32, minimum: u32) -> Vec<(u32, u32)> {
        let subsets = Mutex::new(Vec::new());
        worker.execute_function(first, size, minimum, |begin, count| {
            subsets.lock().unwrap().push((begin, count));
        });

        let mut subsets = subsets.into_inner().unwrap();
        subsets.sort_unstable();
        subsets
    }

    #[test]
    fn covers_range() {
        let worker = Worker::new(4).unwrap();
        assert_eq!(worker.threads(), 4);

        let subsets = collect(&worker, 10, 1000, 20);
        assert_eq!(subsets.len(), 4);
        let mut next = 10;
        for (begin, count) in subsets {
            assert_eq!(begin, next);
            assert!(count >= 20);
            next += count;
        }
        assert_eq!(next, 1010);
    }

    #[test]
    fn honors_minimum() {
        let worker = Worker::new(8).unwrap();
        assert_eq!(collect(&worker, 0, 50, 20).len(), 2);
        assert_eq!(collect(&worker, 0, 19, 20), vec![(0, 19)]);
        assert!(collect(&worker, 0, 0, 20).is_empty());
    }
}
