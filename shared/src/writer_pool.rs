use std::{
    cell::RefCell,
    ops::{Deref, DerefMut},
};

use replicant_serde::BitWriter;

/// A bounded pool of scratch BitWriters.
///
/// `acquire` hands out a guard; the writer goes back to the pool, cleared,
/// when the guard is dropped, whichever way the caller leaves its scope.
pub struct WriterPool {
    writers: RefCell<Vec<BitWriter>>,
    capacity: usize,
}

impl WriterPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            writers: RefCell::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn acquire(&self) -> PooledWriter<'_> {
        let writer = self.writers.borrow_mut().pop().unwrap_or_default();
        PooledWriter { pool: self, writer }
    }

    /// Number of idle writers waiting in the pool
    pub fn idle(&self) -> usize {
        self.writers.borrow().len()
    }

    fn release(&self, mut writer: BitWriter) {
        let mut writers = self.writers.borrow_mut();
        if writers.len() >= self.capacity {
            return;
        }
        writer.clear();
        writers.push(writer);
    }
}

pub struct PooledWriter<'p> {
    pool: &'p WriterPool,
    writer: BitWriter,
}

impl Deref for PooledWriter<'_> {
    type Target = BitWriter;

    fn deref(&self) -> &BitWriter {
        &self.writer
    }
}

impl DerefMut for PooledWriter<'_> {
    fn deref_mut(&mut self) -> &mut BitWriter {
        &mut self.writer
    }
}

impl Drop for PooledWriter<'_> {
    fn drop(&mut self) {
        // an empty Vec does not allocate
        let writer = std::mem::replace(&mut self.writer, BitWriter::with_capacity(0));
        self.pool.release(writer);
    }
}
