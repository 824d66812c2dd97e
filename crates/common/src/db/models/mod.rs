//! SeaORM entity models
//!
//! A single flat table; citation edges are never persisted.

mod paper;

pub use paper::{
    Entity as PaperEntity,
    Model as PaperRow,
    ActiveModel as PaperActiveModel,
    Column as PaperColumn,
};
