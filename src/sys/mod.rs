//! Syscall Layer: iovec Marshaling dan Blocking sendmsg/recvmsg
//!
//! Prinsip desain:
//! - Satu call = satu syscall (plus retry EINTR)
//! - Blocking hanya di thread pemanggil, tidak ada lock crate-level
//! - Descriptor divalidasi sebelum kernel disentuh

mod iovec;
mod syscall;

pub(crate) use iovec::GatherList;
pub(crate) use syscall::{checked_descriptor, recv, send, RawInbound};
