//! Binary buffer writer with auto-growing capacity.

/// A binary buffer writer that grows automatically as needed.
///
/// Bytes between `x0` and `x` are the pending output. [`Writer::flush`] hands
/// them out and [`Writer::discard`] drops them, which is how encoders avoid
/// leaking a half-written value after a failure.
///
/// # Example
///
/// ```
/// use extpack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0xd4);
/// writer.u16(0x0b01);
/// assert_eq!(writer.flush(), [0xd4, 0x0b, 0x01]);
/// ```
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
    /// Position where last flush happened.
    pub x0: usize,
    /// Current cursor position.
    pub x: usize,
    /// Allocation size when buffer needs to grow.
    alloc_size: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with the default allocation size (4KB).
    pub fn new() -> Self {
        Self::with_alloc_size(4 * 1024)
    }

    /// Creates a new writer with custom allocation size.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        let alloc_size = alloc_size.max(16);
        Self {
            uint8: vec![0u8; alloc_size],
            x0: 0,
            x: 0,
            alloc_size,
        }
    }

    /// Makes room for `capacity` more bytes. When the buffer runs out the
    /// pending bytes are compacted to the front and the buffer is resized.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if self.uint8.len() - self.x >= capacity {
            return;
        }
        let needed = self.pending() + capacity;
        let size = if needed <= self.alloc_size {
            self.alloc_size
        } else {
            needed * 2
        };
        self.uint8.copy_within(self.x0..self.x, 0);
        self.x -= self.x0;
        self.x0 = 0;
        self.uint8.resize(size, 0);
    }

    /// Resets the flush position.
    pub fn reset(&mut self) {
        self.x0 = self.x;
    }

    /// Drops everything written since the last flush.
    pub fn discard(&mut self) {
        self.x = self.x0;
    }

    /// Number of bytes written since the last flush.
    pub fn pending(&self) -> usize {
        self.x - self.x0
    }

    /// Returns the written data and advances the flush position.
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        result
    }

    /// Copies a fixed-width chunk at the cursor.
    #[inline]
    fn put<const N: usize>(&mut self, bytes: [u8; N]) {
        self.ensure_capacity(N);
        self.uint8[self.x..self.x + N].copy_from_slice(&bytes);
        self.x += N;
    }

    /// Copies a marker byte followed by a fixed-width chunk.
    #[inline]
    fn put_tagged<const N: usize>(&mut self, tag: u8, bytes: [u8; N]) {
        self.ensure_capacity(N + 1);
        self.uint8[self.x] = tag;
        self.uint8[self.x + 1..self.x + 1 + N].copy_from_slice(&bytes);
        self.x += N + 1;
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.put([val]);
    }

    /// Big-endian u16.
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.put(val.to_be_bytes());
    }

    /// Big-endian u32.
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.put(val.to_be_bytes());
    }

    /// Marker byte followed by a big-endian u16 length or value.
    pub fn u8u16(&mut self, tag: u8, val: u16) {
        self.put_tagged(tag, val.to_be_bytes());
    }

    pub fn u8u32(&mut self, tag: u8, val: u32) {
        self.put_tagged(tag, val.to_be_bytes());
    }

    pub fn u8u64(&mut self, tag: u8, val: u64) {
        self.put_tagged(tag, val.to_be_bytes());
    }

    /// Marker byte followed by a big-endian IEEE 754 double.
    pub fn u8f64(&mut self, tag: u8, val: f64) {
        self.put_tagged(tag, val.to_be_bytes());
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.ensure_capacity(length);
        self.uint8[self.x..self.x + length].copy_from_slice(buf);
        self.x += length;
    }

    /// Writes a UTF-8 string. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        let bytes = s.as_bytes();
        self.buf(bytes);
        bytes.len()
    }
}
