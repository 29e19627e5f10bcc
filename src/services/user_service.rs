use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{
            request::{Login, LoginRequest, PrecheckRequest},
            response::{LoginOutcome, UserDto},
        },
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Read-only: fails when the phone is already bound to another name.
    pub async fn precheck(&self, request: PrecheckRequest) -> AppResult<()> {
        let (name, phone) = request.into_pair()?;

        if let Some(existing) = self.repository.find_by_phone(&phone).await? {
            if existing.name != name {
                log::warn!("Precheck rejected: phone already bound to another name");
                return Err(AppError::Conflict(
                    "Phone registered with a different name".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Creates the user on first login; repeat logins only refresh the auth id.
    pub async fn login_or_register(&self, request: LoginRequest) -> AppResult<LoginOutcome> {
        let login = request.into_login()?;

        if let Some(existing) = self.repository.find_by_phone(&login.phone).await? {
            return self.login_existing(existing, &login).await;
        }

        let user = User::new(&login.name, &login.phone, Some(login.firebase_uid.clone()));
        match self.repository.create(user).await {
            Ok(user) => {
                log::info!("Registered user {}", user.id);
                Ok(LoginOutcome {
                    user_id: user.id,
                    created: true,
                })
            }
            // A concurrent registration won the unique phone index.
            Err(AppError::Conflict(_)) => {
                let existing = self
                    .repository
                    .find_by_phone(&login.phone)
                    .await?
                    .ok_or_else(|| AppError::InternalError("User vanished after conflict".to_string()))?;
                self.login_existing(existing, &login).await
            }
            Err(err) => Err(err),
        }
    }

    async fn login_existing(&self, existing: User, login: &Login) -> AppResult<LoginOutcome> {
        if existing.name != login.name {
            log::warn!("Login rejected for user {}: name mismatch", existing.id);
            return Err(AppError::Conflict(
                "Phone already registered with a different name".to_string(),
            ));
        }

        if existing.needs_auth_id_update(&login.firebase_uid) {
            self.repository
                .update_firebase_uid(&existing.id, &login.firebase_uid)
                .await?;
            log::debug!("Refreshed auth id for user {}", existing.id);
        }

        Ok(LoginOutcome {
            user_id: existing.id,
            created: false,
        })
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserDto>> {
        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn login(name: &str, phone: &str, uid: &str) -> LoginRequest {
        LoginRequest {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
            firebase_uid: Some(uid.to_string()),
        }
    }

    #[actix_web::test]
    async fn first_login_registers_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_phone().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|user| Ok(user));

        let outcome = UserService::new(Arc::new(repo))
            .login_or_register(login("Asha", "9876543210", "uid-1"))
            .await
            .expect("login succeeds");

        assert!(outcome.created);
    }

    #[actix_web::test]
    async fn repeat_login_with_same_uid_does_not_write() {
        let existing = User::test_user("Asha", "9876543210");
        let uid = existing.firebase_uid.clone().unwrap_or_default();
        let expected_id = existing.id.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_phone()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();
        repo.expect_update_firebase_uid().never();

        let outcome = UserService::new(Arc::new(repo))
            .login_or_register(login("Asha", "9876543210", &uid))
            .await
            .expect("login succeeds");

        assert_eq!(outcome.user_id, expected_id);
        assert!(!outcome.created);
    }

    #[actix_web::test]
    async fn repeat_login_with_new_uid_updates_it() {
        let existing = User::test_user("Asha", "9876543210");

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_phone()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update_firebase_uid()
            .withf(|_, uid| uid == "uid-new")
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = UserService::new(Arc::new(repo))
            .login_or_register(login("Asha", "9876543210", "uid-new"))
            .await
            .expect("login succeeds");

        assert!(!outcome.created);
    }

    #[actix_web::test]
    async fn login_with_different_name_is_rejected_without_mutation() {
        let existing = User::test_user("Asha", "9876543210");

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_phone()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();
        repo.expect_update_firebase_uid().never();

        let result = UserService::new(Arc::new(repo))
            .login_or_register(login("Ravi", "9876543210", "uid-2"))
            .await;

        match result {
            Err(AppError::Conflict(msg)) => {
                assert_eq!(msg, "Phone already registered with a different name")
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn precheck_passes_for_unknown_phone() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_phone().returning(|_| Ok(None));

        let result = UserService::new(Arc::new(repo))
            .precheck(PrecheckRequest {
                name: Some("Asha".to_string()),
                phone: Some("9876543210".to_string()),
            })
            .await;

        assert!(result.is_ok());
    }

    #[actix_web::test]
    async fn precheck_rejects_name_mismatch() {
        let existing = User::test_user("Asha", "9876543210");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_phone()
            .returning(move |_| Ok(Some(existing.clone())));

        let result = UserService::new(Arc::new(repo))
            .precheck(PrecheckRequest {
                name: Some("Ravi".to_string()),
                phone: Some("9876543210".to_string()),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[actix_web::test]
    async fn lost_registration_race_falls_back_to_existing_user() {
        let winner = User::test_user("Asha", "9876543210");
        let winner_id = winner.id.clone();
        let uid = winner.firebase_uid.clone().unwrap_or_default();

        let mut seq = mockall::Sequence::new();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_phone()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::Conflict("Duplicate record".to_string())));
        repo.expect_find_by_phone()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(winner.clone())));

        let outcome = UserService::new(Arc::new(repo))
            .login_or_register(login("Asha", "9876543210", &uid))
            .await
            .expect("falls back to the existing user");

        assert_eq!(outcome.user_id, winner_id);
        assert!(!outcome.created);
    }
}
