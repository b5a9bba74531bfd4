//! Python node types. Tokens are shared with the script types; only the
//! containers and the printer differ.

pub mod expression;
pub mod file;

use crate::error::LanguageResult;
use crate::registry::RegistryBuilder;

pub use expression::PYTHON_EXPRESSION;
pub use file::PYTHON_FILE;

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    file::register(builder)?;
    expression::register(builder)?;
    Ok(())
}
