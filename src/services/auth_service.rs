//! Servicio de autenticación
//!
//! Registro y login contra la tabla de usuarios, con bcrypt para las
//! contraseñas y JWT como token de sesión.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthService {
    users: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt_config: JwtConfig::from(config),
        }
    }

    pub async fn register(
        &self,
        username: String,
        password: String,
        full_name: Option<String>,
    ) -> Result<User, AppError> {
        if self.users.username_exists(&username).await? {
            return Err(AppError::Conflict(
                "El nombre de usuario ya está registrado".to_string(),
            ));
        }

        let password_hash =
            hash(&password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;

        self.users.create(username, password_hash, full_name).await
    }

    /// Verificar credenciales y emitir un token de sesión
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(String, DateTime<Utc>, User), AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid =
            verify(password, &user.password_hash).map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(user.id, &user.username, &self.jwt_config)?;
        let expires_at =
            Utc::now() + chrono::Duration::seconds(self.jwt_config.expiration as i64);

        Ok((token, expires_at, user))
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }
}
