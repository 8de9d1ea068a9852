pub mod identity;
pub mod jwt;
pub mod lockout;
pub mod password;
