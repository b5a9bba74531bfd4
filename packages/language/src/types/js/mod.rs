//! JavaScript node types.

pub mod binary_operator;
pub mod call_variable;
pub mod declared_identifier;
pub mod expression;
pub mod file;
pub mod inline_function;
pub mod variable_declaration;
pub mod variable_reference;

use crate::error::LanguageResult;
use crate::registry::RegistryBuilder;

pub use binary_operator::BINARY_OPERATOR;
pub use call_variable::CALL_VARIABLE;
pub use declared_identifier::DECLARED_IDENTIFIER;
pub use expression::SPLOOT_EXPRESSION;
pub use file::JAVASCRIPT_FILE;
pub use inline_function::INLINE_FUNCTION_DECLARATION;
pub use variable_declaration::VARIABLE_DECLARATION;
pub use variable_reference::VARIABLE_REFERENCE;

pub(crate) fn register(builder: &mut RegistryBuilder) -> LanguageResult<()> {
    file::register(builder)?;
    expression::register(builder)?;
    declared_identifier::register(builder)?;
    variable_reference::register(builder)?;
    call_variable::register(builder)?;
    binary_operator::register(builder)?;
    variable_declaration::register(builder)?;
    inline_function::register(builder)?;
    Ok(())
}
