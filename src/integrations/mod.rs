//! External service integrations.

pub mod weather {
    pub use crate::services::*;
}

pub mod weather_models {
    pub use crate::weather_models::*;
}
