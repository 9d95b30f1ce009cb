// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, CreateUserPayload, Role, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self {
            user_repo,
            jwt_secret,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(String, User), AppError> {
        let username = username.trim().to_lowercase();
        let user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // bcrypt é caro de propósito: roda fora do executor async
        let password = password.to_owned();
        let password_hash = user.password_hash.clone();
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password, &password_hash))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.criar_token(user.id)?;
        Ok((token, user))
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn listar_usuarios(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list().await
    }

    pub async fn criar_usuario(&self, payload: CreateUserPayload) -> Result<User, AppError> {
        let password = payload.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let username = payload.username.trim().to_lowercase();
        let role = payload.role.unwrap_or(Role::Consultor);

        let user = self
            .user_repo
            .create_user(&username, payload.display_name.trim(), &password_hash, role)
            .await?;

        tracing::info!("👤 Usuário {} ({:?}) criado.", user.username, user.role);
        Ok(user)
    }

    /// Cria o admin inicial quando o banco está vazio, com a senha vinda
    /// do ambiente. Idempotente: com qualquer usuário presente, não faz nada.
    pub async fn seed_admin_if_needed(
        &self,
        admin_password: Option<String>,
    ) -> Result<(), AppError> {
        if self.user_repo.count().await? > 0 {
            return Ok(());
        }

        let senha = match admin_password {
            Some(s) if !s.is_empty() => s,
            _ => {
                tracing::warn!("⚠️ ADMIN_PASSWORD não definida; usando senha padrão de desenvolvimento.");
                "admin".to_string()
            }
        };

        let password_hash = tokio::task::spawn_blocking(move || hash(&senha, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .create_user("admin", "Administrador", &password_hash, Role::Admin)
            .await?;

        tracing::info!("👤 Usuário admin inicial criado.");
        Ok(())
    }

    fn criar_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        // Sessão de 12 horas, como o painel sempre funcionou
        let expires_at = now + chrono::Duration::hours(12);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
