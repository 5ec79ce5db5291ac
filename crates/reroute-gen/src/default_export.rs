//! Normalization of `export { App as default }` into `export default App`

use oxc_allocator::Allocator;
use oxc_ast::ast::{ModuleExportName, Program, Statement};

use crate::error::Result;
use crate::exports::module_export_name;
use crate::parser::parse_statement;

/// Hoist a local `as default` export specifier into an `export default` statement
///
/// Re-exports (`export { x as default } from "./x"`) are left alone. Returns
/// whether the program changed.
pub fn normalize_default_export<'a>(
    allocator: &'a Allocator,
    program: &mut Program<'a>,
) -> Result<bool> {
    let mut default_local = None;
    let mut emptied = None;

    for (index, stmt) in program.body.iter_mut().enumerate() {
        let Statement::ExportNamedDeclaration(decl) = stmt else {
            continue;
        };
        if decl.source.is_some() || decl.export_kind.is_type() {
            continue;
        }
        let Some(position) = decl
            .specifiers
            .iter()
            .position(|spec| module_export_name(&spec.exported) == "default")
        else {
            continue;
        };
        let ModuleExportName::IdentifierReference(local) = &decl.specifiers[position].local else {
            continue;
        };

        default_local = Some(local.name.to_string());
        decl.specifiers.remove(position);
        if decl.specifiers.is_empty() && decl.declaration.is_none() {
            emptied = Some(index);
        }
        break;
    }

    let Some(local) = default_local else {
        return Ok(false);
    };

    if let Some(index) = emptied {
        program.body.remove(index);
    }
    let statement = parse_statement(allocator, &format!("export default {local};"))?;
    program.body.push(statement);
    Ok(true)
}
