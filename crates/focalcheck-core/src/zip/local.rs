//! `unz64local_getShort`: read a little-endian `u16` from a zip stream.

pub const UNZ_OK: i32 = 0;
pub const UNZ_EOF: i32 = 0;
pub const UNZ_ERRNO: i32 = -1;

/// The `ZREAD64` / `ZERROR64` pair of a `zlib_filefunc64_32_def`.
pub trait ZipStream {
    /// Read up to `buf.len()` bytes, returning how many were read.
    fn read(&mut self, buf: &mut [u8]) -> usize;
    /// Whether the stream is in an error state.
    fn error(&self) -> bool;
}

/// Read two bytes and combine them into `x`.
///
/// On a short read `x` is zeroed and the result tells an I/O error apart
/// from end of file.
pub fn get_short<S: ZipStream + ?Sized>(stream: &mut S, x: &mut u64) -> i32 {
    let mut c = [0u8; 2];
    if stream.read(&mut c) == 2 {
        *x = u64::from(u16::from_le_bytes(c));
        UNZ_OK
    } else {
        *x = 0;
        if stream.error() { UNZ_ERRNO } else { UNZ_EOF }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bytes<'a> {
        data: &'a [u8],
        failed: bool,
    }

    impl ZipStream for Bytes<'_> {
        fn read(&mut self, buf: &mut [u8]) -> usize {
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            n
        }

        fn error(&self) -> bool {
            self.failed
        }
    }

    #[test]
    fn reads_little_endian() {
        let mut s = Bytes {
            data: &[0x34, 0x12, 0xff],
            failed: false,
        };
        let mut x = 0;
        assert_eq!(get_short(&mut s, &mut x), UNZ_OK);
        assert_eq!(x, 0x1234);
        assert_eq!(s.data, &[0xff]);
    }

    #[test]
    fn one_byte_left_is_eof() {
        let mut s = Bytes {
            data: &[0x01],
            failed: false,
        };
        let mut x = 99;
        assert_eq!(get_short(&mut s, &mut x), UNZ_EOF);
        assert_eq!(x, 0);
    }
}
