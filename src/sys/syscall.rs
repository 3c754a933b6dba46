//! Blocking sendmsg/recvmsg Wrapper
//!
//! Satu operasi = satu blocking kernel call di thread pemanggil.
//! Thread lain tetap jalan selama call berlangsung - tidak ada lock
//! global yang perlu dilepas di Rust, cukup native blocking call.
//!
//! Interrupt dari signal (EINTR) di-retry transparan; error lain
//! diterjemahkan ke [`Error::Os`] dengan OS error code asli.

use std::mem;
use std::os::unix::io::RawFd;

use libc::c_int;

use super::iovec::GatherList;
use crate::error::{Error, Result};
use crate::handle::SocketHandle;

/// Ambil descriptor dari handle dan pastikan muat di `c_int`.
///
/// Gagal di sini berarti belum ada syscall sama sekali - beda dengan
/// EBADF yang datang dari kernel.
pub(crate) fn checked_descriptor<H: SocketHandle + ?Sized>(handle: &H) -> Result<RawFd> {
    let raw = handle.raw_descriptor();
    c_int::try_from(raw).map_err(|_| Error::DescriptorOutOfRange(raw))
}

fn last_errno() -> c_int {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Satu blocking sendmsg.
///
/// Return value = bytes yang diterima kernel. Di stream socket itu
/// bisa lebih kecil dari total gather list (partial send) - caller
/// yang mengirim ulang sisanya, ini bukan failure.
pub(crate) fn send(
    fd: RawFd,
    gather: &GatherList<'_>,
    control: Option<&[u8]>,
    flags: c_int,
) -> Result<usize> {
    let mut mhdr: libc::msghdr = unsafe { mem::zeroed() };
    mhdr.msg_iov = gather.as_ptr();
    mhdr.msg_iovlen = gather.len() as _;
    if let Some(control) = control {
        mhdr.msg_control = control.as_ptr() as *mut libc::c_void;
        mhdr.msg_controllen = control.len() as _;
    }

    loop {
        let sent = unsafe { libc::sendmsg(fd, &mhdr, flags) };
        if sent >= 0 {
            return Ok(sent as usize);
        }
        if last_errno() == libc::EINTR {
            continue;
        }
        return Err(Error::last_os());
    }
}

/// Hasil mentah satu recvmsg, sebelum control buffer di-decode
pub(crate) struct RawInbound {
    pub data: Vec<u8>,
    pub control: Vec<u8>,
    /// `msg_flags` dari kernel, verbatim - termasuk MSG_TRUNC/MSG_CTRUNC
    pub flags: c_int,
}

/// Satu blocking recvmsg.
///
/// `max_data` dan `max_control` menentukan ukuran buffer yang diminta
/// ke kernel; keduanya dipotong ke panjang yang benar-benar terisi
/// sebelum dikembalikan. `max_control == 0` berarti tanpa control
/// channel (plain receive).
pub(crate) fn recv(
    fd: RawFd,
    max_data: usize,
    max_control: usize,
    flags: c_int,
) -> Result<RawInbound> {
    let mut data = vec![0u8; max_data];
    let mut control = vec![0u8; max_control];

    let mut iov = libc::iovec {
        iov_base: data.as_mut_ptr() as *mut libc::c_void,
        iov_len: data.len(),
    };

    let mut mhdr: libc::msghdr = unsafe { mem::zeroed() };
    mhdr.msg_iov = &mut iov;
    mhdr.msg_iovlen = 1;
    if max_control > 0 {
        mhdr.msg_control = control.as_mut_ptr() as *mut libc::c_void;
        mhdr.msg_controllen = control.len() as _;
    }

    let received = loop {
        let n = unsafe { libc::recvmsg(fd, &mut mhdr, flags) };
        if n >= 0 {
            break n as usize;
        }
        if last_errno() == libc::EINTR {
            continue;
        }
        return Err(Error::last_os());
    };

    data.truncate(received);
    control.truncate(mhdr.msg_controllen as usize);

    Ok(RawInbound {
        data,
        control,
        flags: mhdr.msg_flags,
    })
}
