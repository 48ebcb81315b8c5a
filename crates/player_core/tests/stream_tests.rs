mod fixtures;

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use fixtures::{mp3_fixture, FIXTURE_LEN};
use player_core::TrackedFile;

#[test]
fn reads_advance_the_shared_position() {
    let dir = tempfile::tempdir().unwrap();
    let mut stream = TrackedFile::open(mp3_fixture(dir.path()), 0).unwrap();
    let position = stream.position();

    let mut buf = [0u8; 100];
    stream.read_exact(&mut buf).unwrap();

    assert_eq!(position.get(), 100);
    assert_eq!(stream.remaining(), (FIXTURE_LEN - 100) as u64);
    assert_eq!(stream.total_len(), FIXTURE_LEN as u64);
}

#[test]
fn skip_hides_the_leading_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let mut stream = TrackedFile::open(mp3_fixture(dir.path()), 300).unwrap();

    let mut first = [0u8; 1];
    stream.read_exact(&mut first).unwrap();
    assert_eq!(first[0], (300 % 251) as u8);
    assert_eq!(stream.position().get(), 301);

    assert_eq!(stream.seek(SeekFrom::Start(0)).unwrap(), 0);
    assert_eq!(stream.position().get(), 300);

    let end = stream.seek(SeekFrom::End(0)).unwrap();
    assert_eq!(end, (FIXTURE_LEN - 300) as u64);
    assert_eq!(stream.remaining(), 0);
}

#[test]
fn seeking_before_the_skip_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut stream = TrackedFile::open(mp3_fixture(dir.path()), 300).unwrap();

    let error = stream.seek(SeekFrom::Current(-1)).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidInput);
    assert_eq!(stream.position().get(), 300);
}

#[test]
fn skip_past_the_end_clamps() {
    let dir = tempfile::tempdir().unwrap();
    let mut stream = TrackedFile::open(mp3_fixture(dir.path()), 1 << 20).unwrap();

    let mut rest = Vec::new();
    stream.read_to_end(&mut rest).unwrap();

    assert!(rest.is_empty());
    assert_eq!(stream.skip(), FIXTURE_LEN as u64);
    assert_eq!(stream.remaining(), 0);
}
