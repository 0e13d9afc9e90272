pub mod api_state;
pub mod routes;
pub mod server;

pub use routes::*;
pub use server::serve;
