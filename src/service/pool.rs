//! Bounded pool of scratch buffers for input normalization.
//!
//! # Responsibilities
//! - Hand out cleared byte buffers without allocating on the hot path
//! - Take buffers back when their guard drops, on every exit path
//!
//! # Design Decisions
//! - At most `capacity` idle buffers are retained, extras are freed
//! - A buffer is exclusively owned by its guard; it is cleared on return

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

/// Concurrency-safe pool of reusable `Vec<u8>` buffers.
#[derive(Debug)]
pub struct BufferPool {
    idle: Mutex<Vec<Vec<u8>>>,
    capacity: usize,
    buffer_capacity: usize,
}

impl BufferPool {
    /// Create a pool retaining up to `capacity` buffers, each starting with
    /// `buffer_capacity` bytes of room.
    pub fn new(capacity: usize, buffer_capacity: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
            buffer_capacity,
        }
    }

    /// Take a buffer, reusing an idle one when available.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let reused = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        let buf = reused.unwrap_or_else(|| Vec::with_capacity(self.buffer_capacity));
        PooledBuffer {
            pool: self,
            buf,
        }
    }

    /// Number of idle buffers currently retained.
    pub fn idle(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn release(&self, mut buf: Vec<u8>) {
        buf.clear();
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < self.capacity {
            idle.push(buf);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(64, 256)
    }
}

/// A RAII guard that returns its buffer to the pool on drop.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_returned_on_drop() {
        let pool = BufferPool::new(4, 16);
        assert_eq!(pool.idle(), 0);
        {
            let mut buf = pool.acquire();
            buf.extend_from_slice(b"mozilla");
        }
        assert_eq!(pool.idle(), 1);

        let buf = pool.acquire();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 16);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_pool_is_bounded() {
        let pool = BufferPool::new(2, 8);
        let guards: Vec<_> = (0..5).map(|_| pool.acquire()).collect();
        drop(guards);
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn test_returned_on_panic() {
        let pool = BufferPool::new(2, 8);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _buf = pool.acquire();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_concurrent_acquire() {
        let pool = BufferPool::new(8, 32);
        std::thread::scope(|s| {
            for i in 0..8u8 {
                let pool = &pool;
                s.spawn(move || {
                    for _ in 0..100 {
                        let mut buf = pool.acquire();
                        assert!(buf.is_empty());
                        buf.push(i);
                    }
                });
            }
        });
        assert!(pool.idle() <= 8);
    }
}
