//! Password hashing and token signing capabilities.
//!
//! Services depend on the traits; the Argon2 and JWT adapters are the
//! production implementations.

mod password;
mod token;

pub use password::{Argon2PasswordEncoder, PasswordEncoder};
pub use token::{Claims, JwtTokenSigner, TokenSigner};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockPasswordEncoder;
#[cfg(any(test, feature = "test-utils"))]
pub use token::MockTokenSigner;
