use std::path::Path;

use id3::TagLike;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("no readable tag")]
    NoTag,
    #[error("tag error: {0}")]
    Id3(#[from] id3::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

impl TrackInfo {
    /// "Artist - Title", or whichever half is present.
    pub fn display_name(&self) -> Option<String> {
        match (self.artist.as_deref(), self.title.as_deref()) {
            (Some(artist), Some(title)) => Some(format!("{} - {}", artist, title)),
            (None, Some(title)) => Some(title.to_string()),
            (Some(artist), None) => Some(artist.to_string()),
            (None, None) => None,
        }
    }
}

pub fn read_track_info(path: impl AsRef<Path>) -> Result<TrackInfo, MetadataError> {
    let tag = match id3::Tag::read_from_path(path.as_ref()) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => return Err(MetadataError::NoTag),
        Err(e) => return Err(e.into()),
    };

    let info = TrackInfo {
        title: tag.title().map(String::from),
        artist: tag.artist().map(String::from),
        album: tag.album().map(String::from),
    };

    if info == TrackInfo::default() {
        return Err(MetadataError::NoTag);
    }
    Ok(info)
}
