use serde::{Deserialize, Serialize};

/// Tipo de token emitido por el servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // teléfono del usuario
    pub token_type: TokenType,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}
