use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::EnvironmentConfig;
use crate::models::{Claims, TokenType};
use crate::utils::errors::{AppError, AppResult};

/// Servicio JWT: tokens HS256 sin estado, ligados al teléfono del usuario
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_duration: Duration,
    refresh_token_duration: Duration,
}

impl JwtService {
    pub fn new(secret: &str, access_token_duration: Duration, refresh_token_duration: Duration) -> Self {
        // Sin margen: un token deja de valer en el segundo exacto de `exp`
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_token_duration,
            refresh_token_duration,
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(&config.jwt_secret, config.access_token_ttl, config.refresh_token_ttl)
    }

    /// Genera un token de acceso
    pub fn generate_access_token(&self, phone: &str) -> AppResult<String> {
        self.generate(phone, TokenType::Access, self.access_token_duration)
    }

    /// Genera un token de refresh
    pub fn generate_refresh_token(&self, phone: &str) -> AppResult<String> {
        self.generate(phone, TokenType::Refresh, self.refresh_token_duration)
    }

    fn generate(&self, phone: &str, token_type: TokenType, duration: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: phone.to_string(),
            token_type,
            exp: (now + duration).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Error generating token: {}", e)))
    }

    /// Valida firma, expiración y tipo del token
    pub fn verify(&self, token: &str, expected: TokenType) -> AppResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::Jwt("Token has expired".to_string()),
                _ => AppError::Jwt("Invalid token".to_string()),
            })?;

        if claims.token_type != expected {
            let message = match expected {
                TokenType::Access => "Access token required",
                TokenType::Refresh => "Refresh token required",
            };
            return Err(AppError::Jwt(message.to_string()));
        }

        Ok(claims)
    }

    /// Genera un nuevo access token a partir de un refresh token válido.
    /// El refresh token no se rota.
    pub fn refresh_access_token(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.verify(refresh_token, TokenType::Refresh)?;
        self.generate_access_token(&claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret", Duration::hours(1), Duration::days(30))
    }

    #[test]
    fn test_generate_and_validate_token() {
        let jwt_service = service();

        let token = jwt_service.generate_access_token("+15551234567").unwrap();
        let claims = jwt_service.verify(&token, TokenType::Access).unwrap();

        assert_eq!(claims.sub, "+15551234567");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_refresh_token_lifetime() {
        let jwt_service = service();

        let token = jwt_service.generate_refresh_token("+15551234567").unwrap();
        let claims = jwt_service.verify(&token, TokenType::Refresh).unwrap();
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 3600);
    }

    #[test]
    fn test_token_type_is_enforced() {
        let jwt_service = service();

        let access = jwt_service.generate_access_token("+15551234567").unwrap();
        let refresh = jwt_service.generate_refresh_token("+15551234567").unwrap();

        assert!(matches!(jwt_service.verify(&access, TokenType::Refresh), Err(AppError::Jwt(_))));
        assert!(matches!(jwt_service.verify(&refresh, TokenType::Access), Err(AppError::Jwt(_))));
        assert!(jwt_service.refresh_access_token(&access).is_err());
    }

    #[test]
    fn test_refresh_issues_access_for_same_subject() {
        let jwt_service = service();

        let refresh = jwt_service.generate_refresh_token("+15551234567").unwrap();
        let access = jwt_service.refresh_access_token(&refresh).unwrap();
        let claims = jwt_service.verify(&access, TokenType::Access).unwrap();
        assert_eq!(claims.sub, "+15551234567");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt_service = JwtService::new("test-secret", Duration::hours(-2), Duration::days(30));

        let token = jwt_service.generate_access_token("+15551234567").unwrap();
        match jwt_service.verify(&token, TokenType::Access) {
            Err(AppError::Jwt(msg)) => assert_eq!(msg, "Token has expired"),
            other => panic!("expected expiry error, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_token_expired_seconds_ago_is_rejected() {
        let jwt_service = JwtService::new("test-secret", Duration::seconds(-5), Duration::seconds(-5));

        let access = jwt_service.generate_access_token("+15551234567").unwrap();
        let refresh = jwt_service.generate_refresh_token("+15551234567").unwrap();

        assert!(matches!(
            jwt_service.verify(&access, TokenType::Access),
            Err(AppError::Jwt(msg)) if msg == "Token has expired"
        ));
        assert!(jwt_service.refresh_access_token(&refresh).is_err());
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let issuer = JwtService::new("other-secret", Duration::hours(1), Duration::days(30));
        let token = issuer.generate_access_token("+15551234567").unwrap();

        assert!(service().verify(&token, TokenType::Access).is_err());
        assert!(service().verify("not.a.token", TokenType::Access).is_err());
    }
}
