use crate::config::AppConfig;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// 访问令牌的类型标记
pub const ACCESS_TOKEN_TYPE: &str = "access";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型: "access" 或 "refresh"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    /// 令牌中的用户 ID
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// 令牌由外部身份服务签发，这里只负责校验
pub struct JwtUtils;

impl JwtUtils {
    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let config = &AppConfig::get().jwt;
        Self::verify_access_token_with(token, &config.secret, config.leeway)
    }

    /// 使用给定密钥校验签名、过期时间和令牌类型
    pub fn verify_access_token_with(
        token: &str,
        secret: &str,
        leeway: u64,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let mut validation = Validation::default();
        validation.leeway = leeway;

        let claims = decode::<Claims>(token, &decoding_key, &validation)?.claims;
        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "test-secret";

    fn token(token_type: &str, expires_in: i64, secret: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "42".to_string(),
            role: "organizer".to_string(),
            token_type: token_type.to_string(),
            exp: (now + expires_in) as usize,
            iat: now as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_access_token() {
        let claims =
            JwtUtils::verify_access_token_with(&token("access", 600, SECRET), SECRET, 0).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "organizer");
    }

    #[test]
    fn test_refresh_token_is_rejected() {
        let err = JwtUtils::verify_access_token_with(&token("refresh", 600, SECRET), SECRET, 0)
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::InvalidToken
        ));
    }

    #[test]
    fn test_wrong_secret_and_expired_token() {
        assert!(
            JwtUtils::verify_access_token_with(&token("access", 600, "other"), SECRET, 0).is_err()
        );
        assert!(
            JwtUtils::verify_access_token_with(&token("access", -600, SECRET), SECRET, 0).is_err()
        );
    }
}
