use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

/// Mint an invite bearer token and its lookup digest. 48 alphanumeric chars
/// give well over 256 bits of entropy and are URL-safe as-is. Only the
/// digest is ever persisted.
pub fn generate_invite_token() -> (String, String) {
    let token = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect::<String>();

    let hash = hash_token(&token);
    (token, hash)
}

pub fn hash_token(val: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(val.as_bytes());

    format!("{:x}", hasher.finalize())
}
