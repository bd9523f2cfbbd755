//! ByteSource trait for deterministic byte streams.
//!
//! Defines the interface between a byte generator and its consumers. The
//! key deriver only needs "the next N bytes" and does not care which
//! generator produced them.

/// Trait for deterministic sources of bytes.
///
/// Implementations must return the same sequence for the same initial
/// state. [`Prbg`](crate::random::prbg::Prbg) is the reference
/// implementation; tests may plug in fixed vectors.
pub trait ByteSource {
    /// Returns the next byte of the stream.
    fn next_byte(&mut self) -> u8;

    /// Fills `buf` with the next `buf.len()` bytes of the stream.
    fn fill_bytes(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            *byte = self.next_byte();
        }
    }

    /// Returns the next `count` bytes of the stream.
    fn take_bytes(&mut self, count: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; count];
        self.fill_bytes(&mut bytes);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(u8);

    impl ByteSource for Counter {
        fn next_byte(&mut self) -> u8 {
            self.0 = self.0.wrapping_add(1);
            self.0
        }
    }

    #[test]
    fn test_take_bytes_in_order() {
        let mut source = Counter(0);
        assert_eq!(source.take_bytes(4), vec![1, 2, 3, 4]);
        assert_eq!(source.take_bytes(2), vec![5, 6]);
    }

    #[test]
    fn test_fill_bytes_wraps() {
        let mut source = Counter(254);
        let mut buf = [0u8; 3];
        source.fill_bytes(&mut buf);
        assert_eq!(buf, [255, 0, 1]);
    }

    #[test]
    fn test_take_zero_bytes() {
        let mut source = Counter(0);
        assert!(source.take_bytes(0).is_empty());
        assert_eq!(source.next_byte(), 1);
    }
}
