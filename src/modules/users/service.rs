use coursebook_core::{AppError, hash_password_async};
use coursebook_db::UserRepository;
use coursebook_models::{CreateUserDto, NewUser, User};
use tracing::{info, instrument};

pub struct UserService;

impl UserService {
    /// Hashes the password on the blocking pool and stores the account.
    ///
    /// A taken email address surfaces as [`AppError::Conflict`].
    #[instrument(skip(users, dto), fields(email_address = %dto.email_address))]
    pub async fn create_user(users: &dyn UserRepository, dto: CreateUserDto) -> Result<User, AppError> {
        let password_hash = hash_password_async(dto.password).await?;

        let user = users
            .create(NewUser {
                first_name: dto.first_name,
                last_name: dto.last_name,
                email_address: dto.email_address,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User created");

        Ok(user)
    }
}
