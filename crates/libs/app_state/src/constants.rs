/// Length of generated media item ids.
pub const MEDIA_ITEM_ID_LENGTH: usize = 16;

/// Length of generated album ids.
pub const ALBUM_ID_LENGTH: usize = 12;
