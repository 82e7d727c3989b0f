use crate::domain::model::{Analysis, InputValues};
use crate::utils::error::Result;

/// Anything that can describe one analysis request.
pub trait RequestProvider {
    fn category(&self) -> Option<&str>;
    fn inputs(&self) -> Result<InputValues>;
}

pub trait Renderer {
    fn render(&self, analysis: &Analysis) -> Result<String>;
}
