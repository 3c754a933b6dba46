//! Gather List: buffer caller -> iovec array
//!
//! Konversi sequence of byte buffer jadi scatter/gather descriptor
//! untuk kernel. Kernel memperlakukan seluruh list sebagai SATU
//! message: concatenation semua buffer, urut.

use std::marker::PhantomData;

use crate::error::{Error, Result};

/// Fallback kalau sysconf tidak melaporkan limit
const IOV_MAX_FALLBACK: usize = 1024;

/// Jumlah maksimum segmen per syscall (IOV_MAX)
fn max_segments() -> usize {
    let n = unsafe { libc::sysconf(libc::_SC_IOV_MAX) };
    if n > 0 {
        n as usize
    } else {
        IOV_MAX_FALLBACK
    }
}

/// Gather list untuk satu kali send.
///
/// Meminjam memori buffer caller selama call berlangsung - tidak ada
/// copy payload, dan tidak ada pointer yang hidup melewati call.
/// List kosong valid: itu "empty message" send/probe.
pub(crate) struct GatherList<'a> {
    iov: Vec<libc::iovec>,
    _buffers: PhantomData<&'a [u8]>,
}

impl<'a> GatherList<'a> {
    pub(crate) fn new(buffers: &[&'a [u8]]) -> Result<Self> {
        if buffers.len() > max_segments() {
            return Err(Error::TooManyBuffers(buffers.len()));
        }

        let iov = buffers
            .iter()
            .map(|buf| libc::iovec {
                iov_base: buf.as_ptr() as *mut libc::c_void,
                iov_len: buf.len(),
            })
            .collect();

        Ok(Self {
            iov,
            _buffers: PhantomData,
        })
    }

    /// Pointer untuk field `msg_iov`
    #[inline(always)]
    pub(crate) fn as_ptr(&self) -> *mut libc::iovec {
        self.iov.as_ptr() as *mut libc::iovec
    }

    /// Jumlah segmen
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.iov.len()
    }

    /// Total bytes di seluruh segmen
    #[inline(always)]
    #[allow(dead_code)]
    pub(crate) fn total_len(&self) -> usize {
        self.iov.iter().map(|v| v.iov_len).sum()
    }
}
