//! Account Bounded Context
//!
//! Exchange credential intake and the mock connection record.

mod connection;
mod masking;

pub use connection::{
    AccountStatus, ApiKeyConnection, Exchange, MOCK_PERMISSIONS, MockAccountResponse,
    TradingMode,
};
pub use masking::mask_api_key;
