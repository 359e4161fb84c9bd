pub mod error;
pub mod records;
pub mod response;

pub use error::ApiError;
pub use records::{JobFields, JobRecord, Record, ResumeRecord};
pub use response::{AccessToken, LoginRequest, MatchResult, SignupRequest, User};
