//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: HTTP Basic credential extraction and the authentication gate
//! - [`errors`]: global fault logging, panic boundary and the 404 fallback
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Basic <base64(email:password)>`
//! 2. `CurrentUser` extractor decodes the credentials and looks the user up
//! 3. The password is checked against the stored bcrypt hash
//! 4. Handler executes with the principal if all checks pass, otherwise the
//!    request ends with a generic 401
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::CurrentUser;
//!
//! async fn whoami(CurrentUser(user): CurrentUser) -> impl IntoResponse {
//!     Json(UserSummary::from(&user))
//! }
//! ```

pub mod auth;
pub mod errors;
