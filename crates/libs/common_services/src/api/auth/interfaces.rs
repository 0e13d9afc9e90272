use serde::{Deserialize, Serialize};

/// Claims carried by an API bearer token. `sub` is the user id acting as
/// the principal for every ownership and sharing check.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthClaims {
    pub sub: i64,
    pub exp: i64,
}
