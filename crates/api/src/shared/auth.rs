use crate::error::TarefaError;
use actix_web::HttpRequest;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tarefa_domain::{User, ID};
use tarefa_infra::TarefaContext;

/// Token lifetime: 24 hours
const TOKEN_TTL_SECS: usize = 60 * 60 * 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user id
    pub sub: String,
    /// Expiration, in seconds since the epoch
    pub exp: usize,
    /// Issued at, in seconds since the epoch
    pub iat: usize,
}

pub fn create_token(user: &User, ctx: &TarefaContext) -> anyhow::Result<String> {
    let iat = (ctx.sys.get_timestamp_millis() / 1000) as usize;
    let claims = Claims {
        sub: user.id.as_string(),
        exp: iat + TOKEN_TTL_SECS,
        iat,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(ctx.config.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

/// Resolves the `Authorization: Bearer` token of a request into the
/// authenticated `User`, or fails with 401.
pub async fn protect_route(
    http_req: &HttpRequest,
    ctx: &TarefaContext,
) -> Result<User, TarefaError> {
    let token = http_req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| {
            TarefaError::Unauthorized("Missing or malformed Authorization header".into())
        })?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(ctx.config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| TarefaError::Unauthorized(format!("Invalid auth token: {}", e)))?;

    let user_id: ID = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| TarefaError::Unauthorized("Invalid auth token subject".into()))?;

    ctx.repos
        .users
        .find(&user_id)
        .await
        .ok_or_else(|| TarefaError::Unauthorized("User no longer exists".into()))
}

/// Argon2id hash in PHC string format; parameters and salt travel inside
/// the hash itself.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_hashes_and_verifies_passwords() {
        let hash = hash_password("senha-muito-secreta").expect("To hash password");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("senha-muito-secreta", &hash));
        assert!(!verify_password("senha-errada", &hash));
    }

    #[test]
    fn verify_rejects_garbage_hashes() {
        assert!(!verify_password("qualquer", "not-a-phc-string"));
    }

    #[actix_web::main]
    #[test]
    async fn it_creates_and_validates_tokens() {
        let ctx = TarefaContext::create_inmemory();
        let user = User::new(
            "joao".into(),
            "joao@example.com".into(),
            "hash".into(),
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos.users.insert(&user).await.unwrap();

        let token = create_token(&user, &ctx).expect("To create token");
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(ctx.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .expect("To decode token");
        assert_eq!(decoded.claims.sub, user.id.as_string());
    }
}
