//! Value types shared by the `API3G` request and response documents.

mod amount;
mod common;

pub use amount::*;
pub use common::*;
