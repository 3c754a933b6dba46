//! Socketpair Integration Test
//!
//! End-to-end lewat kernel beneran: scatter-gather, descriptor
//! passing via SCM_RIGHTS, dan truncation flags.
//!
//! Usage:
//!   cargo test --test socketpair_test

use std::fs::File;
use std::io::{Read, Write};
use std::net::SocketAddr;
use std::os::unix::io::{AsRawFd, FromRawFd, RawFd};
use std::os::unix::net::{UnixDatagram, UnixStream};

use sockmsg::{
    cmsg_space, receive_message, send_message, AncillaryEntry, Error, SocketHandle, MSG_CTRUNC,
    MSG_TRUNC,
};

/// Pipe helper - File supaya kedua ujung ketutup otomatis
fn pipe() -> (File, File) {
    let mut fds = [0 as RawFd; 2];
    let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
    assert_eq!(rc, 0, "pipe() failed");
    unsafe { (File::from_raw_fd(fds[0]), File::from_raw_fd(fds[1])) }
}

#[test]
fn test_scatter_gather_is_one_datagram() {
    let (tx, rx) = UnixDatagram::pair().unwrap();

    let sent = send_message(&tx, &[b"vec1", b"vec2", b"vec3"], &[], 0, None).unwrap();
    assert_eq!(sent, 12);

    let msg = receive_message(&rx, 400, 0, 0).unwrap();
    assert_eq!(msg.data, b"vec1vec2vec3");
    assert!(msg.ancillary.is_empty());
    assert_eq!(msg.flags & (MSG_TRUNC | MSG_CTRUNC), 0);
    assert!(msg.address.is_none());
}

#[test]
fn test_empty_message_send_and_probe() {
    let (tx, rx) = UnixDatagram::pair().unwrap();

    // Gather list kosong = zero-length datagram, tetap valid
    assert_eq!(send_message(&tx, &[], &[], 0, None).unwrap(), 0);

    let msg = receive_message(&rx, 16, 0, 0).unwrap();
    assert!(msg.data.is_empty());
    assert!(msg.ancillary.is_empty());
}

#[test]
fn test_stream_bytes_are_contiguous() {
    let (tx, mut rx) = UnixStream::pair().unwrap();

    assert_eq!(send_message(&tx, &[b"ab", b"cd"], &[], 0, None).unwrap(), 4);
    assert_eq!(send_message(&tx, &[b"ef"], &[], 0, None).unwrap(), 2);

    // Receiver biasa melihat satu run bytes, tanpa batas antar buffer
    let mut buf = [0u8; 6];
    rx.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"abcdef");
}

#[test]
fn test_datagram_fifo_order_per_handle() {
    let (tx, rx) = UnixDatagram::pair().unwrap();

    send_message(&tx, &[b"first"], &[], 0, None).unwrap();
    send_message(&tx, &[b"second"], &[], 0, None).unwrap();

    assert_eq!(receive_message(&rx, 64, 0, 0).unwrap().data, b"first");
    assert_eq!(receive_message(&rx, 64, 0, 0).unwrap().data, b"second");
}

#[test]
fn test_scm_rights_descriptor_passing() {
    let (tx, rx) = UnixDatagram::pair().unwrap();
    let (mut pipe_read, pipe_write) = pipe();

    let entry = AncillaryEntry::rights(&[pipe_write.as_raw_fd()]);
    send_message(&tx, &[], &[entry], 0, None).unwrap();
    drop(pipe_write); // ujung kita boleh ditutup, kernel sudah duplicate

    let msg = receive_message(&rx, 128, 1024, 0).unwrap();
    assert!(msg.data.is_empty());
    assert_eq!(msg.flags & MSG_CTRUNC, 0);
    assert_eq!(msg.ancillary.len(), 1);

    let fds = msg.ancillary[0].descriptors().expect("bukan SCM_RIGHTS");
    assert_eq!(fds.len(), 1);

    // Descriptor hasil duplicate harus benar-benar bisa dipakai
    let mut received = unsafe { File::from_raw_fd(fds[0]) };
    received.write_all(b"ping").unwrap();
    drop(received);

    let mut buf = [0u8; 4];
    pipe_read.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"ping");
}

#[test]
fn test_scm_rights_multiple_descriptors_one_entry() {
    let (tx, rx) = UnixDatagram::pair().unwrap();
    let (pipe_read, pipe_write) = pipe();

    let entry = AncillaryEntry::rights(&[pipe_read.as_raw_fd(), pipe_write.as_raw_fd()]);
    send_message(&tx, &[b"with-fds"], &[entry], 0, None).unwrap();
    drop(pipe_read);
    drop(pipe_write);

    let size = std::mem::size_of::<libc::c_int>();
    let msg = receive_message(&rx, 64, cmsg_space(2 * size), 0).unwrap();
    assert_eq!(msg.data, b"with-fds");
    assert_eq!(msg.flags & MSG_CTRUNC, 0);
    assert_eq!(msg.ancillary.len(), 1);

    let fds = msg.ancillary[0].descriptors().unwrap();
    assert_eq!(fds.len(), 2);

    // Pipe yang diterima harus masih nyambung: tulis di ujung write,
    // baca di ujung read
    let mut r = unsafe { File::from_raw_fd(fds[0]) };
    let mut w = unsafe { File::from_raw_fd(fds[1]) };
    w.write_all(b"ok").unwrap();
    drop(w);
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"ok");
}

#[test]
fn test_plain_receive_never_returns_ancillary() {
    let (tx, rx) = UnixDatagram::pair().unwrap();
    let (_pipe_read, pipe_write) = pipe();

    let entry = AncillaryEntry::rights(&[pipe_write.as_raw_fd()]);
    send_message(&tx, &[b"data"], &[entry], 0, None).unwrap();

    // max_ancillary_size = 0: persis plain receive, apapun yang
    // dikirim peer. Control data yang dibuang kernel ditandai CTRUNC.
    let msg = receive_message(&rx, 64, 0, 0).unwrap();
    assert_eq!(msg.data, b"data");
    assert!(msg.ancillary.is_empty());
    assert_ne!(msg.flags & MSG_CTRUNC, 0);
}

#[test]
fn test_ancillary_truncation_sets_flag_no_partial_entry() {
    let (tx, rx) = UnixDatagram::pair().unwrap();
    let (pipe_read, pipe_write) = pipe();

    let fd = pipe_read.as_raw_fd();
    let entry = AncillaryEntry::rights(&[fd, fd, fd]);
    send_message(&tx, &[], &[entry], 0, None).unwrap();
    drop(pipe_write);

    // Control buffer cuma cukup untuk sebagian descriptor
    let size = std::mem::size_of::<libc::c_int>();
    let msg = receive_message(&rx, 16, cmsg_space(size), 0).unwrap();
    assert_ne!(msg.flags & MSG_CTRUNC, 0);

    // Record yang sampai harus utuh: payload kelipatan ukuran
    // descriptor, tidak pernah terpotong di tengah
    for entry in &msg.ancillary {
        assert_eq!(entry.payload.len() % size, 0);
        assert!(!entry.payload.is_empty());
        // Tutup descriptor yang ikut terkirim
        for fd in entry.descriptors().unwrap() {
            drop(unsafe { File::from_raw_fd(fd) });
        }
    }
}

#[test]
fn test_data_truncation_sets_flag() {
    let (tx, rx) = UnixDatagram::pair().unwrap();

    send_message(&tx, &[b"hello world"], &[], 0, None).unwrap();

    let msg = receive_message(&rx, 5, 0, 0).unwrap();
    assert_eq!(msg.data, b"hello");
    assert_ne!(msg.flags & MSG_TRUNC, 0);
}

#[test]
fn test_explicit_address_is_not_implemented() {
    let (tx, _rx) = UnixDatagram::pair().unwrap();
    let addr: SocketAddr = "127.0.0.1:200".parse().unwrap();

    match send_message(&tx, &[], &[], 0, Some(addr)) {
        Err(Error::AddressNotSupported) => {}
        other => panic!("expected AddressNotSupported, got {:?}", other),
    }
}

#[test]
fn test_oversized_descriptor_is_overflow_not_os_error() {
    // Setara fileno() yang mengembalikan nilai di luar lebar int
    struct BadSocket;
    impl SocketHandle for BadSocket {
        fn raw_descriptor(&self) -> i64 {
            1i64 << 40
        }
    }

    match send_message(&BadSocket, &[], &[], 0, None) {
        Err(Error::DescriptorOutOfRange(fd)) => assert_eq!(fd, 1i64 << 40),
        other => panic!("expected DescriptorOutOfRange, got {:?}", other),
    }
}
