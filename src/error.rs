//! Error taxonomy untuk sockmsg
//!
//! Semua error terdeteksi synchronous di call yang memicunya.
//! Truncation BUKAN error: dilaporkan lewat result flags (`MSG_TRUNC`,
//! `MSG_CTRUNC`) atau lewat byte count pada partial send.

use std::fmt;
use std::io;

/// Result alias untuk seluruh crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error dari send_message/receive_message
///
/// Variant non-`Os` selalu raised SEBELUM syscall terjadi,
/// jadi tidak ada partial side effect di kernel.
#[derive(Debug)]
pub enum Error {
    /// Gather list punya lebih banyak segmen daripada IOV_MAX
    TooManyBuffers(usize),
    /// Payload ancillary terlalu besar untuk field `cmsg_len`
    AncillaryTooLarge(usize),
    /// Descriptor dari handle tidak muat di native int width (c_int)
    DescriptorOutOfRange(i64),
    /// Explicit destination address belum di-support
    AddressNotSupported,
    /// Syscall gagal - membawa OS error code asli
    Os(io::Error),
}

impl Error {
    /// OS error code asli, kalau variant-nya `Os`
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Error::Os(e) => e.raw_os_error(),
            _ => None,
        }
    }

    pub(crate) fn last_os() -> Self {
        Error::Os(io::Error::last_os_error())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TooManyBuffers(n) => {
                write!(f, "gather list has {} segments, exceeding IOV_MAX", n)
            }
            Error::AncillaryTooLarge(n) => {
                write!(f, "ancillary payload of {} bytes overflows cmsg_len", n)
            }
            Error::DescriptorOutOfRange(fd) => {
                write!(f, "descriptor {} does not fit the native int width", fd)
            }
            Error::AddressNotSupported => {
                write!(f, "explicit destination address is not supported")
            }
            Error::Os(e) => write!(f, "syscall failed: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Os(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Os(e) => e,
            Error::AddressNotSupported => io::Error::new(io::ErrorKind::Unsupported, err),
            _ => io::Error::new(io::ErrorKind::InvalidInput, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_error_code_preserved() {
        let err = Error::Os(io::Error::from_raw_os_error(libc::ECONNRESET));
        assert_eq!(err.raw_os_error(), Some(libc::ECONNRESET));
    }

    #[test]
    fn test_pre_syscall_errors_have_no_os_code() {
        assert_eq!(Error::AddressNotSupported.raw_os_error(), None);
        assert_eq!(Error::DescriptorOutOfRange(1 << 40).raw_os_error(), None);
    }
}
