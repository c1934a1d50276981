// SPDX-License-Identifier: Apache-2.0

/// Trait for byte sources that refill the decoder's buffer.
pub trait Reader {
    /// The error type returned by read operations
    type Error;

    /// Read data into the provided buffer.
    /// Returns the number of bytes read, or an error.
    ///
    /// # Contract
    /// - A return value of 0 **MUST** indicate true end of stream
    /// - Implementations **MUST NOT** return 0 unless no more data will ever be available
    /// - Returning 0 followed by non-zero reads in subsequent calls violates this contract
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: Reader + ?Sized> Reader for &mut T {
    type Error = T::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(buf)
    }
}

/// Adapts any [`std::io::Read`] (files, sockets, stdin) into a [`Reader`].
///
/// Interrupted reads are retried; every other I/O error is passed through.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoReader<T> {
    inner: T,
}

#[cfg(feature = "std")]
impl<T: std::io::Read> IoReader<T> {
    /// Wrap an I/O source.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Unwrap the I/O source.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<T: std::io::Read> Reader for IoReader<T> {
    type Error = std::io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_io_reader_reads_cursor() {
        let mut reader = IoReader::new(std::io::Cursor::new(b"1.5, 2".to_vec()));
        let mut buf = [0u8; 4];
        assert_eq!(reader.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"1.5,");
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }
}
