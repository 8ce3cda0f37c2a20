//! Fixed-capacity permit pool bounding concurrent lookups.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Default number of lookups allowed in flight at once.
pub const DEFAULT_CAPACITY: usize = 10;

/// The pool was closed while waiting for a permit.
#[derive(Debug, Error)]
#[error("permit pool is closed")]
pub struct PoolClosed;

/// Fixed-capacity pool of lookup permits.
///
/// Cloning shares the same underlying pool.
#[derive(Debug, Clone)]
pub struct PermitPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// The right to run one lookup. Returned to the pool when dropped.
#[derive(Debug)]
pub struct Permit {
    _permit: OwnedSemaphorePermit,
}

impl Default for PermitPool {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl PermitPool {
    /// Create a pool with `capacity` permits. A capacity of 0 is raised to 1
    /// so that acquisition can always make progress.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Wait until a permit is free and take it.
    pub async fn acquire(&self) -> Result<Permit, PoolClosed> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| PoolClosed)?;
        Ok(Permit { _permit: permit })
    }

    /// Total number of permits.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Permits currently held.
    pub fn in_use(&self) -> usize {
        self.capacity - self.available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let pool = PermitPool::new(0);
        assert_eq!(pool.capacity(), 1);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(PermitPool::default().capacity(), DEFAULT_CAPACITY);
    }

    #[tokio::test]
    async fn test_permit_released_on_drop() {
        let pool = PermitPool::new(2);
        let first = pool.acquire().await.unwrap();
        let second = pool.acquire().await.unwrap();
        assert_eq!(pool.in_use(), 2);
        assert_eq!(pool.available(), 0);

        drop(first);
        assert_eq!(pool.available(), 1);
        drop(second);
        assert_eq!(pool.in_use(), 0);
    }

    #[tokio::test]
    async fn test_acquire_waits_for_release() {
        let pool = PermitPool::new(1);
        let held = pool.acquire().await.unwrap();

        let waiter = {
            let pool = pool.clone();
            tokio::spawn(async move { pool.acquire().await.map(|_| ()) })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(held);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should acquire after release")
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_permits() {
        let pool = PermitPool::new(3);
        let clone = pool.clone();
        let _permit = clone.acquire().await.unwrap();
        assert_eq!(pool.in_use(), 1);
    }
}
