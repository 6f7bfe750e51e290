use thiserror::Error;

use crate::types::{LoanId, UserId};

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid term: {periods} periods, schedule requires at least one")]
    InvalidTerm {
        periods: u32,
    },

    #[error("user not found: {id}")]
    UserNotFound {
        id: UserId,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("email {email} already registered")]
    EmailAlreadyRegistered {
        email: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoanError>;
