//! Bounded pool of interchangeable units with FIFO-fair blocking acquisition.
//!
//! A request that cannot be granted immediately is parked in `waiters`.
//! Every [`PartsPool::release`] hands freed units to parked requests in
//! arrival order before anyone else can see them, so a later arrival can
//! never overtake an earlier one.
//!
//! The pool is generic over the waiter token `W`: the token is the
//! continuation handed back to the caller when the request is resumed.

use std::collections::VecDeque;

use crate::error::PoolOverflowError;

/// Outcome of a single [`PartsPool::acquire`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire<W> {
    /// A unit was available and has been taken.
    Granted(W),
    /// No unit was available; the request is parked at the back of the queue.
    Queued,
}

/// Shared resource: `level` available units out of a fixed `capacity`.
///
/// Invariant: `0 <= level <= capacity`, and `waiters` is non-empty only
/// while `level == 0`.
#[derive(Debug, Clone)]
pub struct PartsPool<W> {
    level: u64,
    capacity: u64,
    waiters: VecDeque<W>,
}

impl<W> PartsPool<W> {
    /// Create a full pool holding `capacity` units.
    pub fn new(capacity: u64) -> Self {
        Self {
            level: capacity,
            capacity,
            waiters: VecDeque::new(),
        }
    }

    /// Request one unit on behalf of `waiter`.
    ///
    /// Grants immediately when a unit is available. Otherwise `waiter` is
    /// appended to the FIFO queue and comes back out of a later
    /// [`release`](Self::release).
    pub fn acquire(&mut self, waiter: W) -> Acquire<W> {
        if self.level >= 1 && self.waiters.is_empty() {
            self.level -= 1;
            Acquire::Granted(waiter)
        } else {
            self.waiters.push_back(waiter);
            Acquire::Queued
        }
    }

    /// Return `qty` units and resume queued requests in FIFO order.
    ///
    /// Returns the waiters granted by this release, oldest first. Each one
    /// has already been charged one unit. Fails without touching the pool
    /// if the release would exceed capacity.
    pub fn release(&mut self, qty: u64) -> Result<Vec<W>, PoolOverflowError> {
        let overflow = PoolOverflowError {
            level: self.level,
            released: qty,
            capacity: self.capacity,
        };
        match self.level.checked_add(qty) {
            Some(level) if level <= self.capacity => self.level = level,
            _ => return Err(overflow),
        }

        let mut granted = Vec::new();
        while self.level >= 1 {
            let Some(waiter) = self.waiters.pop_front() else {
                break;
            };
            self.level -= 1;
            granted.push(waiter);
        }
        Ok(granted)
    }

    /// Units available right now.
    pub fn level(&self) -> u64 {
        self.level
    }

    /// Fixed number of units the pool was created with.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of parked requests.
    pub fn backlog(&self) -> usize {
        self.waiters.len()
    }

    /// Parked requests, head of the queue first.
    pub fn waiters(&self) -> impl Iterator<Item = &W> {
        self.waiters.iter()
    }
}
