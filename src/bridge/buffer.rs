//! Flat transfer buffers handed over the C ABI.

use std::{
    iter::FromIterator,
    ops::{Deref, DerefMut},
    ptr,
};

use crate::sdk::SdkList;

/// Contiguous snapshot of an SDK-owned list.
///
/// Once handed over with [`FlatBuffer::into_raw()`], it's owned by the
/// receiving side until returned back with [`FlatBuffer::from_raw()`].
#[derive(Debug, Eq, PartialEq)]
pub struct FlatBuffer<T>(Box<[T]>);

impl<T> FlatBuffer<T> {
    /// Copies the provided SDK `list` item by item in its order, converting
    /// each item with `convert`.
    pub fn copy_from_list<S, F>(list: &dyn SdkList<S>, convert: F) -> Self
    where
        F: FnMut(S) -> T,
    {
        (0..list.count())
            .filter_map(|i| list.item(i))
            .map(convert)
            .collect()
    }

    /// Leaks this [`FlatBuffer`] into a raw pointer and its length.
    ///
    /// An empty buffer still gives a non-null pointer.
    #[must_use]
    pub fn into_raw(self) -> (*mut T, u32) {
        let len = self.0.len() as u32;
        (Box::into_raw(self.0).cast::<T>(), len)
    }

    /// Restores a [`FlatBuffer`] from the parts returned by
    /// [`FlatBuffer::into_raw()`]. `None` for a null pointer.
    ///
    /// # Safety
    ///
    /// `ptr` and `len` must come from the same [`FlatBuffer::into_raw()`]
    /// call, and the buffer must not have been restored before.
    #[must_use]
    pub unsafe fn from_raw(ptr: *mut T, len: u32) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }
        let slice = ptr::slice_from_raw_parts_mut(ptr, len as usize);
        Some(Self(Box::from_raw(slice)))
    }
}

impl<T> FromIterator<T> for FlatBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> Deref for FlatBuffer<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> DerefMut for FlatBuffer<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

/// Hands the provided `buffer` over, writing its length into `len`.
///
/// A missing buffer gives a null pointer and zero length, which is distinct
/// from a non-null pointer to an empty buffer.
///
/// # Safety
///
/// `len` must be null or valid for writes.
pub unsafe fn hand_over<T>(
    buffer: Option<FlatBuffer<T>>,
    len: *mut u32,
) -> *mut T {
    let (ptr, count) = match buffer {
        Some(buffer) => buffer.into_raw(),
        None => (ptr::null_mut(), 0),
    };
    if let Some(len) = len.as_mut() {
        *len = count;
    }
    ptr
}
