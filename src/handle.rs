//! Socket handle capability
//!
//! Kita tidak butuh socket object konkret - cukup sesuatu yang bisa
//! kasih OS-level descriptor (setara `fileno()`). Semua tipe std yang
//! implement `AsRawFd` otomatis memenuhi trait ini.

use std::os::unix::io::AsRawFd;

/// Apapun yang bisa menghasilkan OS-level socket descriptor.
///
/// Return type-nya sengaja `i64`, lebih lebar dari `c_int`: validasi
/// bahwa nilainya muat di native int width terjadi di syscall wrapper,
/// SEBELUM kernel disentuh. Implementor custom boleh mengembalikan
/// nilai apapun; yang tidak muat akan ditolak dengan
/// [`Error::DescriptorOutOfRange`](crate::Error::DescriptorOutOfRange).
pub trait SocketHandle {
    /// OS-level numeric descriptor dari handle ini
    fn raw_descriptor(&self) -> i64;
}

impl<T: AsRawFd> SocketHandle for T {
    #[inline(always)]
    fn raw_descriptor(&self) -> i64 {
        i64::from(self.as_raw_fd())
    }
}
