//! Shared transport types.

mod response;

pub use response::{
    Created, ProductResponse, ProductsResponse, SignInResponse, SignUpResponse, UserResponse,
};
