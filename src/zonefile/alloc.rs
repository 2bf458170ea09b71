//! Allocation strategies for input buffers.
//!
//! The loader never grows its buffers directly. Instead it asks an
//! [`Allocator`] which may refuse. A refusal ends loading with
//! [`Code::OutOfMemory`][super::error::Code::OutOfMemory].

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

//------------ Allocator -----------------------------------------------------

/// A strategy for providing buffer memory.
pub trait Allocator: Send + Sync {
    /// Grows `buf` so that its capacity is at least `capacity` octets.
    fn grow(&self, buf: &mut Vec<u8>, capacity: usize)
        -> Result<(), AllocError>;

    /// Returns the memory of a buffer no longer in use.
    fn release(&self, buf: Vec<u8>) {
        drop(buf)
    }
}

//------------ Global --------------------------------------------------------

/// An allocator using the global heap.
///
/// Allocation failures are reported rather than aborting the process.
#[derive(Clone, Copy, Debug, Default)]
pub struct Global;

impl Allocator for Global {
    fn grow(
        &self,
        buf: &mut Vec<u8>,
        capacity: usize,
    ) -> Result<(), AllocError> {
        if capacity <= buf.capacity() {
            return Ok(());
        }
        buf.try_reserve_exact(capacity - buf.len())
            .map_err(|_| AllocError)
    }
}

//------------ Bounded -------------------------------------------------------

/// An allocator that hands out at most a fixed number of octets.
///
/// The budget covers the capacity of all buffers that are currently alive.
/// Released buffers return their share.
#[derive(Debug)]
pub struct Bounded {
    limit: usize,
    used: AtomicUsize,
}

impl Bounded {
    /// Creates an allocator with a budget of `limit` octets.
    pub fn new(limit: usize) -> Self {
        Bounded {
            limit,
            used: AtomicUsize::new(0),
        }
    }

    /// Returns the budget.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of octets currently handed out.
    pub fn used(&self) -> usize {
        self.used.load(Ordering::Relaxed)
    }
}

impl Allocator for Bounded {
    fn grow(
        &self,
        buf: &mut Vec<u8>,
        capacity: usize,
    ) -> Result<(), AllocError> {
        let old = buf.capacity();
        if capacity <= old {
            return Ok(());
        }
        let extra = capacity - old;
        if self.used().saturating_add(extra) > self.limit {
            return Err(AllocError);
        }
        Global.grow(buf, capacity)?;
        self.used
            .fetch_add(buf.capacity() - old, Ordering::Relaxed);
        Ok(())
    }

    fn release(&self, buf: Vec<u8>) {
        let cap = buf.capacity().min(self.used());
        self.used.fetch_sub(cap, Ordering::Relaxed);
    }
}

//------------ AllocError ----------------------------------------------------

/// An allocator refused to provide memory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AllocError;

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("memory allocation failed")
    }
}

impl std::error::Error for AllocError {}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn global_grows() {
        let mut buf = Vec::new();
        Global.grow(&mut buf, 100).unwrap();
        assert!(buf.capacity() >= 100);
    }

    #[test]
    fn bounded_budget() {
        let alloc = Bounded::new(128);
        let mut first = Vec::new();
        alloc.grow(&mut first, 64).unwrap();
        assert_eq!(alloc.used(), 64);

        let mut second = Vec::new();
        assert_eq!(alloc.grow(&mut second, 65), Err(AllocError));
        alloc.grow(&mut second, 64).unwrap();
        assert_eq!(alloc.used(), 128);

        alloc.release(first);
        assert_eq!(alloc.used(), 64);
        alloc.grow(&mut second, 128).unwrap();
        assert_eq!(alloc.used(), 128);
    }
}
