pub mod config;
pub mod error;
pub mod key;
pub mod registry;
pub mod slots;
pub mod task;
pub mod token;

// Generated code names `::mmg_callbacks`, including inside this crate's own tests.
extern crate self as mmg_callbacks;

pub use error::{CallbackError, Result};
pub use key::{CallbackKey, IdentifierKey};
pub use slots::Slots;
pub use token::{token, TypeToken};

pub mod prelude {
    pub use crate::key::{CallbackKey, IdentifierKey};
    pub use crate::token::{token, TypeToken};
    pub use crate::{callback, callback_field_getter, callback_field_getters};
}

pub use callbacks_macros::*;

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
