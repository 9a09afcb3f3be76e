use crate::errors::Result;
use jsonwebtoken::{DecodingKey, TokenData, Validation, decode};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,
}

fn secret() -> String {
    std::env::var("AUTH_SECRET").unwrap_or_else(|_| "secret".to_string())
}

pub fn decode_jwt(token: &str) -> Result<TokenData<Claims>> {
    let token = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret().as_ref()),
        &Validation::default(),
    )?;

    Ok(token)
}
