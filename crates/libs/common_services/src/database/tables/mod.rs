mod album;
mod cloud_credential;
mod comment;
mod media_item;
mod sharing_grant;

pub use album::*;
pub use cloud_credential::*;
pub use comment::*;
pub use media_item::*;
pub use sharing_grant::*;
