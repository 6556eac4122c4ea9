//! Ownership-tagged sample storage.
//!
//! A buffer either owns its samples or borrows the storage of another buffer. Only the
//! owning variant releases memory when dropped; the borrowing variants are plain
//! references, so the borrow checker keeps a view from outliving its source.

/// Sample storage of an [`crate::ImageBuffer`].
#[derive(Debug)]
pub enum Storage<'a> {
    /// Storage exclusively owned by the buffer, freed on drop.
    Owned(Vec<f64>),
    /// Read-only view into the storage of another buffer.
    Borrowed(&'a [f64]),
    /// Writable view into the storage of another buffer.
    BorrowedMut(&'a mut [f64]),
}

impl Storage<'_> {
    /// The whole underlying storage as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Storage::Owned(data) => data.as_slice(),
            Storage::Borrowed(data) => *data,
            Storage::BorrowedMut(data) => &data[..],
        }
    }

    /// The whole underlying storage as a mutable slice, `None` for read-only views.
    #[inline]
    pub fn as_mut_slice(&mut self) -> Option<&mut [f64]> {
        match self {
            Storage::Owned(data) => Some(data.as_mut_slice()),
            Storage::Borrowed(_) => None,
            Storage::BorrowedMut(data) => Some(&mut data[..]),
        }
    }

    /// Number of elements in the underlying storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the underlying storage holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the storage belongs to another buffer.
    #[inline]
    pub fn is_aliased(&self) -> bool {
        !matches!(self, Storage::Owned(_))
    }
}

#[cfg(test)]
mod tests {
    use super::Storage;

    #[test]
    fn owned_is_writable() {
        let mut storage = Storage::Owned(vec![1.0, 2.0]);
        assert!(!storage.is_aliased());
        if let Some(data) = storage.as_mut_slice() {
            data[1] = 5.0;
        }
        assert_eq!(storage.as_slice(), &[1.0, 5.0]);
    }

    #[test]
    fn borrowed_is_read_only() {
        let data = vec![1.0, 2.0, 3.0];
        let mut storage = Storage::Borrowed(&data);
        assert!(storage.is_aliased());
        assert!(storage.as_mut_slice().is_none());
        assert_eq!(storage.len(), 3);
    }

    #[test]
    fn borrowed_mut_writes_through() {
        let mut data = vec![0.0; 3];
        {
            let mut storage = Storage::BorrowedMut(&mut data);
            assert!(storage.is_aliased());
            if let Some(slice) = storage.as_mut_slice() {
                slice[0] = 9.0;
            }
        }
        assert_eq!(data, vec![9.0, 0.0, 0.0]);
    }
}
