// src/buffer.rs

//! Pixel buffer: a `width x height` grid of packed 32-bit colors, row-major,
//! row 0 at the top.
//!
//! The cells either live in storage the buffer owns, or in memory lent by the
//! caller (for example a window surface) through [`ExternalPixels`].

use crate::color::Color;
use crate::error::BufferError;
use std::ptr::NonNull;
use std::sync::{Arc, Mutex};

/// Buffer shared between the render thread (writer) and the caller (reader
/// after a drain).
pub type SharedBuffer = Arc<Mutex<PixelBuffer>>;

/// Memory region owned by the caller and lent to a [`PixelBuffer`].
#[derive(Debug)]
pub struct ExternalPixels {
    ptr: NonNull<u32>,
    len: usize,
}

// SAFETY: the caller of `from_raw_parts` hands exclusive access to the region
// over to the buffer, which is itself only ever reached through a mutex.
unsafe impl Send for ExternalPixels {}

impl ExternalPixels {
    /// Wraps `len` cells starting at `ptr`.
    ///
    /// # Safety
    /// `ptr` must be valid for reads and writes of `len` `u32` values, must not
    /// be accessed through any other path while the buffer is alive, and must
    /// outlive the buffer (and therefore the plotter it is handed to). None of
    /// this can be checked here.
    pub unsafe fn from_raw_parts(ptr: *mut u32, len: usize) -> Result<Self, BufferError> {
        let ptr = NonNull::new(ptr).ok_or(BufferError::NullStorage)?;
        Ok(Self { ptr, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn as_slice(&self) -> &[u32] {
        // SAFETY: validity and exclusivity are guaranteed by the constructor's contract.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    fn as_mut_slice(&mut self) -> &mut [u32] {
        // SAFETY: as above; `&mut self` keeps this the only live view.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

/// Where the cells of a [`PixelBuffer`] live.
#[derive(Debug)]
pub enum PixelStorage {
    /// Allocated and freed by the buffer.
    Owned(Box<[u32]>),
    /// Lent by the caller; see [`ExternalPixels::from_raw_parts`].
    Borrowed(ExternalPixels),
}

impl PixelStorage {
    pub fn len(&self) -> usize {
        match self {
            PixelStorage::Owned(cells) => cells.len(),
            PixelStorage::Borrowed(external) => external.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_slice(&self) -> &[u32] {
        match self {
            PixelStorage::Owned(cells) => cells,
            PixelStorage::Borrowed(external) => external.as_slice(),
        }
    }

    fn as_mut_slice(&mut self) -> &mut [u32] {
        match self {
            PixelStorage::Owned(cells) => cells,
            PixelStorage::Borrowed(external) => external.as_mut_slice(),
        }
    }
}

impl From<Vec<u32>> for PixelStorage {
    fn from(cells: Vec<u32>) -> Self {
        PixelStorage::Owned(cells.into_boxed_slice())
    }
}

/// Fixed-size grid of packed colors with bounds-checked access.
///
/// A buffer with a zero dimension is "not ready": every operation on it is a
/// no-op reporting failure.
#[derive(Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    storage: PixelStorage,
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            storage: PixelStorage::Owned(Box::default()),
        }
    }
}

impl PixelBuffer {
    /// Allocates a zero-filled buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let cells = vec![0u32; width as usize * height as usize];
        Self {
            width,
            height,
            storage: PixelStorage::from(cells),
        }
    }

    /// Uses `storage` as the buffer cells.
    ///
    /// # Errors
    /// `BufferError::SizeMismatch` unless `storage` holds exactly
    /// `width * height` cells.
    pub fn with_storage(
        width: u32,
        height: u32,
        storage: PixelStorage,
    ) -> Result<Self, BufferError> {
        let expected = width as usize * height as usize;
        if storage.len() != expected {
            return Err(BufferError::SizeMismatch {
                expected,
                actual: storage.len(),
            });
        }
        Ok(Self {
            width,
            height,
            storage,
        })
    }

    /// Wraps the buffer for sharing with a render thread.
    pub fn into_shared(self) -> SharedBuffer {
        Arc::new(Mutex::new(self))
    }

    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0 && !self.storage.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read-only view of all cells, row-major.
    pub fn pixels(&self) -> &[u32] {
        self.storage.as_slice()
    }

    pub fn storage(&self) -> &PixelStorage {
        &self.storage
    }

    pub fn into_storage(self) -> PixelStorage {
        self.storage
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Fills every cell with `color`.
    pub fn clear(&mut self, color: Color) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.storage.as_mut_slice().fill(color.0);
        true
    }

    /// Writes `color` at `(x, y)`. Returns `false`, writing nothing, when the
    /// position is outside the buffer.
    pub fn plot(&mut self, x: i32, y: i32, color: Color) -> bool {
        if !self.is_ready() {
            return false;
        }
        match self.index_of(x, y) {
            Some(index) => {
                self.storage.as_mut_slice()[index] = color.0;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if !self.is_ready() {
            return None;
        }
        self.index_of(x, y).map(|index| Color(self.pixels()[index]))
    }

    /// Copies all cells into the front of `dest`, returning the number copied.
    pub fn copy_into(&self, dest: &mut [u32]) -> Result<usize, BufferError> {
        let src = self.pixels();
        if dest.len() < src.len() {
            return Err(BufferError::DestinationTooSmall {
                required: src.len(),
                actual: dest.len(),
            });
        }
        dest[..src.len()].copy_from_slice(src);
        Ok(src.len())
    }

    /// Copies all cells into `dest` as native-endian bytes (4 per cell),
    /// returning the number of bytes written.
    pub fn copy_bytes_into(&self, dest: &mut [u8]) -> Result<usize, BufferError> {
        let src = self.pixels();
        let required = src.len() * 4;
        if dest.len() < required {
            return Err(BufferError::DestinationTooSmall {
                required,
                actual: dest.len(),
            });
        }
        for (chunk, cell) in dest.chunks_exact_mut(4).zip(src) {
            chunk.copy_from_slice(&cell.to_ne_bytes());
        }
        Ok(required)
    }
}
