//! Control Message Layer: cmsghdr Binary Codec
//!
//! Prinsip desain:
//! - Bit-exact: layout record mengikuti ABI kernel (`cmsghdr` + padding)
//! - Order-preserving: urutan record = urutan input
//! - Truncation-tolerant: decode berhenti bersih di record yang terpotong

mod encoder;
mod entry;

pub use encoder::{decode, encode};
pub use entry::{
    cmsg_len, cmsg_space, pack_descriptors, unpack_descriptors, AncillaryEntry,
};
