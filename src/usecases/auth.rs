use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth;
use crate::domain::entities::users::InsertUserEntity;
use crate::domain::repositories::{orders::OrderRepository, users::UserRepository};
use crate::domain::value_objects::orders::OrderDto;
use crate::domain::value_objects::users::{
    AuthResponseDto, LoginUserModel, RegisterUserModel, UpdateProfileModel, UserDto,
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AuthError::EmailTaken => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AuthError>;

pub struct AuthUseCase<U, O>
where
    U: UserRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    order_repo: Arc<O>,
}

impl<U, O> AuthUseCase<U, O>
where
    U: UserRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, order_repo: Arc<O>) -> Self {
        Self {
            user_repo,
            order_repo,
        }
    }

    pub async fn register(&self, model: RegisterUserModel) -> UseCaseResult<AuthResponseDto> {
        let email = model.email.to_lowercase();
        info!(%email, "auth: registration requested");

        let existing = self.user_repo.find_by_email(&email).await.map_err(|err| {
            error!(%email, db_error = ?err, "auth: failed to look up email");
            AuthError::Internal(err)
        })?;

        if existing.is_some() {
            let err = AuthError::EmailTaken;
            warn!(
                %email,
                status = err.status_code().as_u16(),
                "auth: email already registered"
            );
            return Err(err);
        }

        let password_hash = auth::hash_password(&model.password).map_err(AuthError::Internal)?;

        let user = InsertUserEntity {
            id: Uuid::new_v4(),
            email: email.clone(),
            password_hash,
            name: model.name.clone(),
            phone: model.phone.clone(),
            created_at: Utc::now(),
        };

        self.user_repo.create(user.clone()).await.map_err(|err| {
            error!(%email, db_error = ?err, "auth: failed to create user");
            AuthError::Internal(err)
        })?;

        let token = auth::create_token(user.id, &user.email).map_err(AuthError::Internal)?;

        info!(user_id = %user.id, "auth: user registered");

        Ok(AuthResponseDto {
            token,
            user: UserDto {
                id: user.id,
                email: user.email,
                name: user.name,
                phone: user.phone,
                address: None,
                created_at: user.created_at,
            },
        })
    }

    pub async fn login(&self, model: LoginUserModel) -> UseCaseResult<AuthResponseDto> {
        let email = model.email.to_lowercase();

        let user = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(|err| {
                error!(%email, db_error = ?err, "auth: failed to look up email");
                AuthError::Internal(err)
            })?
            .ok_or_else(|| {
                // Same answer for unknown email and bad password.
                let err = AuthError::InvalidCredentials;
                warn!(
                    %email,
                    status = err.status_code().as_u16(),
                    "auth: login with unknown email"
                );
                err
            })?;

        if !auth::verify_password(&model.password, &user.password_hash) {
            let err = AuthError::InvalidCredentials;
            warn!(
                user_id = %user.id,
                status = err.status_code().as_u16(),
                "auth: login with wrong password"
            );
            return Err(err);
        }

        let token = auth::create_token(user.id, &user.email).map_err(AuthError::Internal)?;

        info!(user_id = %user.id, "auth: user logged in");

        Ok(AuthResponseDto {
            token,
            user: user.into(),
        })
    }

    pub async fn get_profile(&self, user_id: Uuid) -> UseCaseResult<UserDto> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "auth: failed to load user");
                AuthError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = AuthError::UserNotFound;
                warn!(
                    %user_id,
                    status = err.status_code().as_u16(),
                    "auth: token references unknown user"
                );
                err
            })?;

        Ok(user.into())
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        changes: UpdateProfileModel,
    ) -> UseCaseResult<UserDto> {
        let has_changes =
            changes.name.is_some() || changes.phone.is_some() || changes.address.is_some();

        if has_changes {
            self.user_repo
                .update_profile(user_id, changes)
                .await
                .map_err(|err| {
                    error!(%user_id, db_error = ?err, "auth: failed to update profile");
                    AuthError::Internal(err)
                })?;
        }

        self.get_profile(user_id).await
    }

    pub async fn list_my_orders(&self, user_id: Uuid) -> UseCaseResult<Vec<OrderDto>> {
        let orders = self.order_repo.list_by_user(user_id).await.map_err(|err| {
            error!(%user_id, db_error = ?err, "auth: failed to list user orders");
            AuthError::Internal(err)
        })?;

        let mut dtos = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.order_repo.list_items(order.id).await.map_err(|err| {
                error!(order_id = %order.id, db_error = ?err, "auth: failed to load order items");
                AuthError::Internal(err)
            })?;
            dtos.push(OrderDto::from_parts(order, items));
        }

        Ok(dtos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::UserEntity;
    use crate::domain::repositories::orders::MockOrderRepository;
    use crate::domain::repositories::users::MockUserRepository;
    use std::env;

    fn set_env_vars() {
        unsafe {
            env::set_var("JWT_SECRET", "supersecretjwtsecretforunittesting123");
        }
    }

    fn user(email: &str, password: &str) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: auth::hash_password(password).unwrap(),
            name: "Jean Dupont".to_string(),
            phone: None,
            address: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn register_rejects_taken_email() {
        set_env_vars();

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email()
            .returning(|email| Ok(Some(user(email, "hunter2"))));
        user_repo.expect_create().never();

        let usecase = AuthUseCase::new(Arc::new(user_repo), Arc::new(MockOrderRepository::new()));

        let result = usecase
            .register(RegisterUserModel {
                email: "Jean@Example.com".to_string(),
                password: "hunter2".to_string(),
                name: "Jean Dupont".to_string(),
                phone: None,
            })
            .await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn register_lowercases_email_and_hashes_password() {
        set_env_vars();

        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().returning(|_| Ok(None));
        user_repo
            .expect_create()
            .withf(|user| {
                user.email == "jean@example.com"
                    && user.password_hash != "hunter2"
                    && auth::verify_password("hunter2", &user.password_hash)
            })
            .times(1)
            .returning(|user| Ok(user.id));

        let usecase = AuthUseCase::new(Arc::new(user_repo), Arc::new(MockOrderRepository::new()));

        let response = usecase
            .register(RegisterUserModel {
                email: "Jean@Example.com".to_string(),
                password: "hunter2".to_string(),
                name: "Jean Dupont".to_string(),
                phone: None,
            })
            .await
            .unwrap();

        assert_eq!(response.user.email, "jean@example.com");
        assert!(!response.token.is_empty());
    }

    #[tokio::test]
    async fn login_round_trips_password_hash() {
        set_env_vars();

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email()
            .returning(|email| Ok(Some(user(email, "hunter2"))));

        let usecase = AuthUseCase::new(Arc::new(user_repo), Arc::new(MockOrderRepository::new()));

        let response = usecase
            .login(LoginUserModel {
                email: "jean@example.com".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();

        let claims = auth::validate_token(&response.token).unwrap();
        assert_eq!(claims.sub, response.user.id.to_string());
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        set_env_vars();

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email()
            .returning(|email| Ok(Some(user(email, "hunter2"))));

        let usecase = AuthUseCase::new(Arc::new(user_repo), Arc::new(MockOrderRepository::new()));

        let result = usecase
            .login(LoginUserModel {
                email: "jean@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_rejects_unknown_email() {
        set_env_vars();

        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().returning(|_| Ok(None));

        let usecase = AuthUseCase::new(Arc::new(user_repo), Arc::new(MockOrderRepository::new()));

        let result = usecase
            .login(LoginUserModel {
                email: "nobody@example.com".to_string(),
                password: "whatever".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn update_profile_with_no_changes_skips_write() {
        let user_id = Uuid::new_v4();

        let mut user_repo = MockUserRepository::new();
        user_repo.expect_update_profile().never();
        user_repo.expect_find_by_id().returning(|id| {
            let mut entity = user("jean@example.com", "hunter2");
            entity.id = id;
            Ok(Some(entity))
        });

        let usecase = AuthUseCase::new(Arc::new(user_repo), Arc::new(MockOrderRepository::new()));

        let dto = usecase
            .update_profile(user_id, UpdateProfileModel::default())
            .await
            .unwrap();

        assert_eq!(dto.id, user_id);
    }
}
