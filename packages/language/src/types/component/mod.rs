//! Component declarations: a named function of `props` whose body is script.

pub mod declaration;
pub mod property;

use crate::error::LanguageResult;
use crate::registry::RegistryBuilder;

pub use declaration::COMPONENT_DECLARATION;
pub use property::DECLARED_PROPERTY;

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    declaration::register(builder)?;
    property::register(builder)?;
    Ok(())
}
