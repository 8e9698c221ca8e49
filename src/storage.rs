//! Byte storage shared between an array and its views.

use std::cell::UnsafeCell;

/// Fixed-length byte buffer backing one or more array handles.
///
/// A base array and every view reshaped from it hold an `Rc<Storage>`, so
/// the buffer is freed only when the last handle is dropped. Cells are
/// accessed through [`read_bytes`](Storage::read_bytes) and
/// [`write_bytes`](Storage::write_bytes), which copy bytes in or out, so no
/// reference into the buffer outlives a call. Writes go through the
/// `UnsafeCell` and are visible through every aliasing handle, which is the
/// point of a view. `Storage` is not `Sync`, so the aliasing is confined to
/// a single thread by construction.
pub struct Storage {
    buf: UnsafeCell<Box<[u8]>>,
}

impl Storage {
    /// Allocate a zero-initialized buffer of `len` bytes.
    pub fn zeroed(len: usize) -> Storage {
        Storage {
            buf: UnsafeCell::new(vec![0; len].into_boxed_slice()),
        }
    }

    /// Return the buffer length in bytes.
    pub fn len(&self) -> usize {
        // Safety: the shared reference is dropped before this call returns.
        let buf = unsafe { &*self.buf.get() };
        buf.len()
    }

    /// Return true if the buffer is zero bytes long.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy out the `N` bytes starting at `offset`.
    ///
    /// Panics if `offset + N` is past the end of the buffer.
    pub fn read_bytes<const N: usize>(&self, offset: usize) -> [u8; N] {
        // Safety: the shared reference is dropped before this call returns,
        // and no write can happen while it exists since `Storage` is
        // confined to one thread.
        let buf = unsafe { &*self.buf.get() };
        let mut bytes = [0; N];
        bytes.copy_from_slice(&buf[offset..offset + N]);
        bytes
    }

    /// Overwrite the `N` bytes starting at `offset`.
    ///
    /// Takes `&self` because views alias the buffer and a write through one
    /// handle must be visible through all of them. Panics if `offset + N`
    /// is past the end of the buffer.
    pub fn write_bytes<const N: usize>(&self, offset: usize, bytes: [u8; N]) {
        // Safety: as for `read_bytes`, the mutable reference is created and
        // dropped entirely within this call.
        let buf = unsafe { &mut *self.buf.get() };
        buf[offset..offset + N].copy_from_slice(&bytes);
    }
}
