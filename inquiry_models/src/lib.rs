pub mod contact;
pub mod email_address;
pub mod session;
pub mod throttle;

mod macros;
