// Domain-layer modules and shared errors
pub mod risk {
    pub use crate::risk::*;
}

pub mod recommendations {
    pub use crate::recommendations::*;
}

pub mod errors {
    pub use crate::errors::*;
}
