//! Message Facade: send_message dan receive_message
//!
//! Komposisi dari gather list, cmsg codec, dan syscall wrapper.
//! Stateless - tiap call berdiri sendiri, tidak ada session object.

use std::net::SocketAddr;

use libc::c_int;

use crate::cmsg::{self, AncillaryEntry};
use crate::error::{Error, Result};
use crate::handle::SocketHandle;
use crate::sys;

/// Hasil satu receive_message
#[derive(Debug)]
pub struct InboundMessage {
    /// Payload bytes, sudah dipotong ke panjang yang benar-benar
    /// diterima (boleh kosong)
    pub data: Vec<u8>,
    /// Ancillary entries, urut seperti di wire
    pub ancillary: Vec<AncillaryEntry>,
    /// `msg_flags` dari kernel, verbatim. Cek `MSG_TRUNC` dan
    /// `MSG_CTRUNC` di sini setiap kali - ancillary yang hilang
    /// karena buffer kekecilan HANYA kelihatan dari flag ini.
    pub flags: c_int,
    /// Selalu `None`: address retrieval belum di-support
    pub address: Option<SocketAddr>,
}

/// Kirim satu message lewat `handle` sebagai satu sendmsg.
///
/// Semua buffer di `buffers` digabung urut jadi SATU message
/// (satu datagram, atau satu run contiguous bytes di stream socket).
/// `ancillary` di-encode jadi control buffer sesuai ABI kernel.
///
/// Returns jumlah bytes yang diterima kernel. Di stream socket itu
/// bisa kurang dari total - kirim ulang sisanya dari caller.
///
/// `address` harus `None`: destination address belum di-support dan
/// menolak dengan [`Error::AddressNotSupported`] sebelum kernel
/// disentuh.
///
/// Call ini blocking, tapi hanya untuk thread pemanggil.
pub fn send_message<H: SocketHandle + ?Sized>(
    handle: &H,
    buffers: &[&[u8]],
    ancillary: &[AncillaryEntry],
    flags: c_int,
    address: Option<SocketAddr>,
) -> Result<usize> {
    if address.is_some() {
        return Err(Error::AddressNotSupported);
    }

    let fd = sys::checked_descriptor(handle)?;
    let gather = sys::GatherList::new(buffers)?;
    let control = cmsg::encode(ancillary)?;

    sys::send(fd, &gather, control.as_deref(), flags)
}

/// Terima satu message lewat `handle` sebagai satu recvmsg.
///
/// `max_data_size` adalah ukuran buffer data yang diminta;
/// `max_ancillary_size` ukuran control buffer (0 = tidak mengharapkan
/// ancillary sama sekali, persis plain receive). Pakai
/// [`cmsg_space`](crate::cmsg_space) untuk menghitung ukuran control
/// buffer yang cukup.
///
/// Kalau salah satu buffer kekecilan, kernel memotong dan menandai
/// lewat `MSG_TRUNC`/`MSG_CTRUNC` di [`InboundMessage::flags`] -
/// itu BUKAN error dari sini. `address` yang dikembalikan selalu
/// `None`.
///
/// Call ini blocking, tapi hanya untuk thread pemanggil.
pub fn receive_message<H: SocketHandle + ?Sized>(
    handle: &H,
    max_data_size: usize,
    max_ancillary_size: usize,
    flags: c_int,
) -> Result<InboundMessage> {
    let fd = sys::checked_descriptor(handle)?;
    let raw = sys::recv(fd, max_data_size, max_ancillary_size, flags)?;

    Ok(InboundMessage {
        data: raw.data,
        ancillary: cmsg::decode(&raw.control),
        flags: raw.flags,
        address: None,
    })
}
