use player_core::{AudioBackend, BackendError, RodioBackend, Settings, TrackedFile};

fn open_bytes(bytes: &[u8]) -> Result<(), BackendError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    std::fs::write(&path, bytes).unwrap();

    let stream = TrackedFile::open(&path, 0).unwrap();
    let mut backend = RodioBackend::new(&Settings::default());
    backend.open(stream).map(|_| ())
}

#[test]
fn text_file_is_a_decode_error() {
    let text = "this is a shopping list, not an mp3\n".repeat(200);

    let result = open_bytes(text.as_bytes());

    assert!(matches!(result, Err(BackendError::Decode(_))));
}

#[test]
fn empty_file_is_a_decode_error() {
    let result = open_bytes(&[]);

    assert!(matches!(result, Err(BackendError::Decode(_))));
}
