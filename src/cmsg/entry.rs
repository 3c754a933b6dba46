//! Ancillary Entry dan Layout Kernel
//!
//! Layout satu record di control buffer:
//! ┌─────────────────────────────────────────────────────┐
//! │ cmsghdr (cmsg_len, cmsg_level, cmsg_type)           │
//! ├─────────────────────────────────────────────────────┤
//! │ Payload (variable)                                  │
//! ├─────────────────────────────────────────────────────┤
//! │ Padding sampai CMSG_ALIGN boundary                  │
//! └─────────────────────────────────────────────────────┘
//!
//! Konstanta alignment diambil dari ABI target, bukan hardcoded.

use std::mem;
use std::os::unix::io::RawFd;

use libc::c_int;

/// Alignment boundary untuk cmsg record (CMSG_ALIGN di C).
///
/// Kernel align ke lebar size_t, BUKAN ke alignment struct cmsghdr -
/// di musl 64-bit keduanya beda. Darwin satu-satunya yang align 32-bit.
#[cfg(target_os = "macos")]
pub(crate) const ALIGN: usize = mem::size_of::<u32>();
#[cfg(not(target_os = "macos"))]
pub(crate) const ALIGN: usize = mem::size_of::<libc::size_t>();

/// Ukuran header record
pub(crate) const HDR_SIZE: usize = mem::size_of::<libc::cmsghdr>();

/// Round `len` ke atas sampai alignment boundary cmsg
#[inline(always)]
pub(crate) const fn cmsg_align(len: usize) -> usize {
    (len + ALIGN - 1) & !(ALIGN - 1)
}

/// Nilai field `cmsg_len` untuk payload sebesar `payload_len` bytes.
///
/// Setara macro `CMSG_LEN` di C: header (aligned) + payload, TANPA
/// padding akhir.
#[inline(always)]
pub const fn cmsg_len(payload_len: usize) -> usize {
    cmsg_align(HDR_SIZE) + payload_len
}

/// Ruang total yang dipakai satu record di buffer, termasuk padding.
///
/// Setara macro `CMSG_SPACE` di C. Pakai ini untuk sizing
/// `max_ancillary_size` di sisi receive.
#[inline(always)]
pub const fn cmsg_space(payload_len: usize) -> usize {
    cmsg_align(HDR_SIZE) + cmsg_align(payload_len)
}

/// Satu ancillary (control) message: `(level, type, payload)`
///
/// Payload-nya raw bytes; crate ini tidak memvalidasi kecocokan
/// semantik level/type/payload - itu urusan kernel, dan penolakan
/// kernel muncul sebagai OS error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncillaryEntry {
    /// Protocol level, misal `SOL_SOCKET`
    pub level: c_int,
    /// Control message type, misal `SCM_RIGHTS`
    pub ty: c_int,
    /// Payload bytes, encoding-nya ditentukan oleh `ty`
    pub payload: Vec<u8>,
}

impl AncillaryEntry {
    /// Membuat entry dari level, type, dan payload bytes
    pub fn new(level: c_int, ty: c_int, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            level,
            ty,
            payload: payload.into(),
        }
    }

    /// Entry `SCM_RIGHTS` yang membawa descriptor-descriptor `fds`.
    ///
    /// Kernel men-duplicate descriptor ke proses penerima; penerima
    /// yang bertanggung jawab menutupnya.
    pub fn rights(fds: &[RawFd]) -> Self {
        Self::new(libc::SOL_SOCKET, libc::SCM_RIGHTS, pack_descriptors(fds))
    }

    /// Unpack payload sebagai descriptor list.
    ///
    /// Returns `None` kalau entry ini bukan `SCM_RIGHTS`.
    pub fn descriptors(&self) -> Option<Vec<RawFd>> {
        if self.level == libc::SOL_SOCKET && self.ty == libc::SCM_RIGHTS {
            Some(unpack_descriptors(&self.payload))
        } else {
            None
        }
    }
}

/// Pack descriptor list jadi payload bytes (native-endian c_int array)
pub fn pack_descriptors(fds: &[RawFd]) -> Vec<u8> {
    let mut out = Vec::with_capacity(fds.len() * mem::size_of::<c_int>());
    for fd in fds {
        out.extend_from_slice(&fd.to_ne_bytes());
    }
    out
}

/// Unpack payload bytes jadi descriptor list.
///
/// Trailing bytes yang bukan kelipatan ukuran c_int diabaikan
/// (kernel tidak pernah mengirim partial descriptor).
pub fn unpack_descriptors(payload: &[u8]) -> Vec<RawFd> {
    payload
        .chunks_exact(mem::size_of::<c_int>())
        .map(|chunk| c_int::from_ne_bytes(chunk.try_into().unwrap()))
        .collect()
}
