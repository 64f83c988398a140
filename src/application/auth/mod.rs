//! Authentication use cases

mod get_current_user;
mod login_user;
mod logout_user;
mod register_user;

pub use get_current_user::{GetCurrentUserResponse, GetCurrentUserUseCase};
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use logout_user::LogoutUserUseCase;
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
