mod connect;
mod error;
mod stores;
mod tables;

pub use connect::*;
pub use error::*;
pub use stores::*;
pub use tables::*;
