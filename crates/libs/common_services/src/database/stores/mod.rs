mod album_store;
mod comment_store;
mod credential_store;
mod media_store;
mod sharing_store;

pub use album_store::*;
pub use comment_store::*;
pub use credential_store::*;
pub use media_store::*;
pub use sharing_store::*;
