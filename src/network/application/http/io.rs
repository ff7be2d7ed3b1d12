//! Framing helpers over a raw [`Read`] stream.
//!
//! Neither helper buffers ahead: [`read_line`] pulls one byte per call so that
//! nothing past the line terminator is consumed, which keeps the header block
//! and the body that follows it correctly framed.

use crate::network::Read;

/// Longest header or status line kept, in bytes, excluding the terminator.
pub const MAX_LINE_LEN: usize = 511;

/// The stream failed or closed before a read completed.
///
/// `read` is the number of bytes that were stored before the failure.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ShortRead {
    /// Bytes stored in the output buffer before the failure.
    pub read: usize,
}

/// Reads one line into `buf`.
///
/// Bytes are read until a line feed is seen or `buf` is full. The line feed
/// is consumed but not stored. Carriage returns are consumed and dropped
/// wherever they appear. Returns the number of bytes stored; `Ok(0)` is an
/// empty line.
///
/// When `buf` fills up before a line feed arrives, the rest of the line is
/// left on the stream and will be returned by the next call. A return value
/// equal to `buf.len()` means the terminator has not been consumed yet; see
/// [`skip_line`].
///
/// # Errors
///
/// Returns [`ShortRead`] with the partial count if the stream reports an
/// error or end of stream before the line is complete.
pub fn read_line<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize, ShortRead> {
    let mut len = 0;
    let mut byte = [0u8; 1];

    while len < buf.len() {
        match reader.read(&mut byte) {
            Ok(1) => {}
            Ok(_) | Err(_) => return Err(ShortRead { read: len }),
        }
        match byte[0] {
            b'\r' => continue,
            b'\n' => return Ok(len),
            b => {
                buf[len] = b;
                len += 1;
            }
        }
    }

    Ok(len)
}

/// Reads and discards bytes up to and including the next line feed.
///
/// # Errors
///
/// Returns [`ShortRead`] with the number of bytes discarded if the stream
/// reports an error or end of stream first.
pub fn skip_line<R: Read + ?Sized>(reader: &mut R) -> Result<usize, ShortRead> {
    let mut skipped = 0;
    let mut byte = [0u8; 1];

    loop {
        match reader.read(&mut byte) {
            Ok(1) => {}
            Ok(_) | Err(_) => return Err(ShortRead { read: skipped }),
        }
        if byte[0] == b'\n' {
            return Ok(skipped);
        }
        skipped += 1;
    }
}

/// Fills `buf` completely, retrying short reads.
///
/// There is no timeout: the call blocks for as long as the underlying stream
/// does.
///
/// # Errors
///
/// Returns [`ShortRead`] with the number of bytes already stored if a read
/// returns zero bytes or an error before `buf` is full.
pub fn read_exact<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize, ShortRead> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) | Err(_) => return Err(ShortRead { read: filled }),
            Ok(n) => filled += n,
        }
    }

    Ok(filled)
}
