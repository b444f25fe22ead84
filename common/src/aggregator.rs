//! Collect narcissistic numbers from many workers at once.
//!
//! Workers never share a collection. Each one holds a `ResultSink` that feeds
//! an unbounded channel, and the aggregator is the single consumer that reads
//! it back once every worker has finished.

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;

/// The consuming end of the results channel.
#[derive(Debug)]
pub struct ResultAggregator {
    sender: Sender<i64>,
    receiver: Receiver<i64>,
}

/// A cheap, cloneable handle for adding results from a worker.
#[derive(Debug, Clone)]
pub struct ResultSink {
    sender: Sender<i64>,
}

impl ResultSink {
    pub fn add(&self, value: i64) {
        // only fails once the aggregator has been drained
        if self.sender.send(value).is_err() {
            warn!("Dropped result {value}, the aggregator was already drained");
        }
    }
}

impl ResultAggregator {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Get a new handle to give to a worker.
    #[must_use]
    pub fn sink(&self) -> ResultSink {
        ResultSink {
            sender: self.sender.clone(),
        }
    }

    /// Add a value directly, safe to call from any number of threads.
    pub fn add(&self, value: i64) {
        // the aggregator holds the receiver, so this cannot fail
        let _ = self.sender.send(value);
    }

    /// The number of values added so far and not yet drained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Take every value added so far, in ascending order.
    /// Only call this after all producers have finished, anything added later is dropped.
    #[must_use]
    pub fn drain_sorted(self) -> Vec<i64> {
        let mut values: Vec<i64> = self.receiver.try_iter().collect();
        values.sort_unstable();
        values
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test_log::test]
    fn test_drain_sorted() {
        let aggregator = ResultAggregator::new();
        for value in [371, 0, 153, 9, 407, 370] {
            aggregator.add(value);
        }
        assert_eq!(aggregator.len(), 6);
        assert_eq!(aggregator.drain_sorted(), vec![0, 9, 153, 370, 371, 407]);
    }

    #[test_log::test]
    fn test_drain_empty() {
        let aggregator = ResultAggregator::default();
        assert!(aggregator.is_empty());
        assert!(aggregator.drain_sorted().is_empty());
    }

    #[test_log::test]
    fn test_concurrent_adds() {
        let aggregator = ResultAggregator::new();
        thread::scope(|scope| {
            for worker in 0..50i64 {
                let aggregator = &aggregator;
                scope.spawn(move || {
                    for i in 0..1000 {
                        aggregator.add(worker * 1000 + i);
                    }
                });
            }
        });
        let values = aggregator.drain_sorted();
        assert_eq!(values.len(), 50_000);
        assert_eq!(values.iter().collect::<HashSet<_>>().len(), 50_000);
        assert_eq!(values, (0..50_000).collect::<Vec<i64>>());
    }

    #[test_log::test]
    fn test_concurrent_sinks() {
        let aggregator = ResultAggregator::new();
        let handles: Vec<_> = (0..50i64)
            .map(|worker| {
                let sink = aggregator.sink();
                thread::spawn(move || {
                    for i in 0..1000 {
                        sink.add(worker * 1000 + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(aggregator.drain_sorted().len(), 50_000);
    }

    #[test_log::test]
    fn test_sink_after_drain() {
        let aggregator = ResultAggregator::new();
        let sink = aggregator.sink();
        sink.add(1);
        assert_eq!(aggregator.drain_sorted(), vec![1]);
        // the value is dropped with a warning, not a panic
        sink.add(2);
    }
}
