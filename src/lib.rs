//! Sockmsg - Scatter-Gather Socket Messaging dengan Ancillary Data
//!
//! Akses langsung ke `sendmsg(2)`/`recvmsg(2)`:
//! - Gather list: beberapa buffer dikirim sebagai SATU message
//! - Cmsg codec: encode/decode control message (misal `SCM_RIGHTS`
//!   untuk descriptor passing) persis layout ABI kernel
//! - Syscall wrapper: blocking call per-thread, retry EINTR,
//!   descriptor width check sebelum kernel disentuh
//!
//! Truncation bukan error: cek `MSG_TRUNC`/`MSG_CTRUNC` di
//! [`InboundMessage::flags`] setiap kali receive.
//!
//! ```no_run
//! use std::os::unix::net::UnixDatagram;
//! use sockmsg::{send_message, receive_message, AncillaryEntry, cmsg_space};
//!
//! # fn main() -> sockmsg::Result<()> {
//! let (tx, rx) = UnixDatagram::pair().unwrap();
//!
//! // Dua buffer + satu descriptor, satu datagram
//! let entry = AncillaryEntry::rights(&[0]);
//! send_message(&tx, &[b"hel", b"lo"], &[entry], 0, None)?;
//!
//! let msg = receive_message(&rx, 64, cmsg_space(4), 0)?;
//! assert_eq!(msg.data, b"hello");
//! # Ok(())
//! # }
//! ```

#[cfg(not(unix))]
compile_error!("sockmsg hanya support target Unix (butuh sendmsg/recvmsg)");

mod cmsg;
mod error;
mod handle;
mod msg;
mod sys;

pub use cmsg::{cmsg_len, cmsg_space, pack_descriptors, unpack_descriptors, AncillaryEntry};
pub use error::{Error, Result};
pub use handle::SocketHandle;
pub use msg::{receive_message, send_message, InboundMessage};

/// Konstanta OS yang dibutuhkan caller untuk membangun entry dan
/// membaca result flags, supaya tidak perlu depend ke libc langsung
pub use libc::{MSG_CTRUNC, MSG_TRUNC, SCM_RIGHTS, SOL_SOCKET};
