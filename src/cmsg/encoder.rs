//! Encode/Decode Control Buffer
//!
//! Encode menulis record-record `cmsghdr` ke satu buffer zero-filled,
//! decode menjalankannya balik. Semua akses header pakai unaligned
//! read/write supaya buffer byte biasa (`Vec<u8>`) valid sebagai input.

use std::ptr;

use super::entry::{cmsg_align, cmsg_len, cmsg_space, AncillaryEntry, ALIGN, HDR_SIZE};
use crate::error::{Error, Result};

/// Ruang satu record dengan checked arithmetic.
///
/// Payload length datang dari caller, jadi overflow harus ketahuan
/// di sini, bukan di kernel.
fn checked_space(payload_len: usize) -> Option<usize> {
    let padded = payload_len.checked_add(ALIGN - 1)? & !(ALIGN - 1);
    let space = padded.checked_add(cmsg_align(HDR_SIZE))?;
    // Field cmsg_len bertipe socklen_t di beberapa platform
    u32::try_from(cmsg_len(payload_len)).ok()?;
    Some(space)
}

/// Encode entries jadi satu control buffer siap-kirim.
///
/// Returns `None` kalau tidak ada entry (pesan biasa, tanpa control
/// channel). Urutan record di buffer = urutan `entries`. Tidak ada
/// validasi semantik level/type - penolakan kernel muncul sebagai
/// OS error saat send.
pub fn encode(entries: &[AncillaryEntry]) -> Result<Option<Vec<u8>>> {
    if entries.is_empty() {
        return Ok(None);
    }

    let mut total = 0usize;
    for entry in entries {
        let space = checked_space(entry.payload.len())
            .ok_or(Error::AncillaryTooLarge(entry.payload.len()))?;
        total = total
            .checked_add(space)
            .ok_or(Error::AncillaryTooLarge(entry.payload.len()))?;
    }

    // Zero-fill sekali di awal: padding antar record harus nol
    let mut buf = vec![0u8; total];
    let mut offset = 0usize;

    for entry in entries {
        let mut hdr: libc::cmsghdr = unsafe { std::mem::zeroed() };
        hdr.cmsg_len = cmsg_len(entry.payload.len()) as _;
        hdr.cmsg_level = entry.level;
        hdr.cmsg_type = entry.ty;

        // Header ditulis per-byte: Vec<u8> tidak dijamin aligned
        unsafe {
            ptr::copy_nonoverlapping(
                &hdr as *const libc::cmsghdr as *const u8,
                buf.as_mut_ptr().add(offset),
                HDR_SIZE,
            );
        }

        let data_start = offset + cmsg_align(HDR_SIZE);
        buf[data_start..data_start + entry.payload.len()].copy_from_slice(&entry.payload);

        offset += cmsg_space(entry.payload.len());
    }

    debug_assert_eq!(offset, total);
    Ok(Some(buf))
}

/// Decode control buffer hasil receive jadi entries, urutan terjaga.
///
/// Buffer kosong menghasilkan vec kosong. Record terakhir yang
/// terpotong (kernel set `MSG_CTRUNC` di result flags) TIDAK
/// dikeluarkan - hanya record utuh yang muncul, dan caller tahu ada
/// truncation dari flags, bukan dari sini.
pub fn decode(control: &[u8]) -> Vec<AncillaryEntry> {
    let mut out = Vec::new();
    let mut offset = 0usize;

    while offset + HDR_SIZE <= control.len() {
        // SAFETY: bounds sudah dicek; unaligned read supaya alokasi
        // byte biasa valid
        let hdr =
            unsafe { ptr::read_unaligned(control.as_ptr().add(offset) as *const libc::cmsghdr) };

        let record_len = hdr.cmsg_len as usize;
        if record_len < cmsg_len(0) {
            // Header tidak masuk akal, stop di sini
            break;
        }

        let payload_len = record_len - cmsg_len(0);
        let data_start = offset + cmsg_align(HDR_SIZE);
        let data_end = match data_start.checked_add(payload_len) {
            Some(end) if end <= control.len() => end,
            _ => break, // record terpotong
        };

        out.push(AncillaryEntry {
            level: hdr.cmsg_level,
            ty: hdr.cmsg_type,
            payload: control[data_start..data_end].to_vec(),
        });

        offset += cmsg_space(payload_len);
    }

    out
}
