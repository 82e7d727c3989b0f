pub mod engine;
pub mod formulas;
pub mod registry;

pub use crate::domain::model::{Analysis, Category, CategoryKey, ComputedRatios, InputValues};
pub use crate::domain::ports::{Renderer, RequestProvider};
pub use crate::utils::error::Result;
