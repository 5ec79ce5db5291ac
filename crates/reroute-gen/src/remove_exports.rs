//! Removal of named and default exports from a route module
//!
//! Works in two phases over the top-level statements. The first phase validates
//! destructuring exports and filters specifiers and declarators in place,
//! recording the indices of statements that became empty or match outright. The
//! second phase drops those statements in one pass and runs dead code
//! elimination over bindings that were referenced before anything was removed.

use oxc_ast::ast::{
    BindingPatternKind, Declaration, ExportNamedDeclaration, Program, Statement,
};
use tracing::debug;

use crate::dead_code::{eliminate_dead_code, referenced_bindings};
use crate::error::{GenError, Result};
use crate::exports::{binding_names, module_export_name};

/// Remove the given exports from `program`
///
/// Returns `Ok(true)` when the program was modified. When no export matched,
/// the program is left untouched and dead code elimination does not run.
///
/// # Errors
///
/// Returns [`GenError::InvalidDestructure`] if a destructuring export binds one
/// of the names. The program is not modified in that case.
pub fn remove_exports(program: &mut Program<'_>, exports_to_remove: &[&str]) -> Result<bool> {
    if exports_to_remove.is_empty() {
        return Ok(false);
    }

    validate_destructured_exports(program, exports_to_remove)?;

    let previously_referenced = referenced_bindings(program);
    let mut marked = vec![false; program.body.len()];
    let mut filtered = false;

    for (index, stmt) in program.body.iter_mut().enumerate() {
        match stmt {
            Statement::ExportNamedDeclaration(decl) => {
                let (remove, changed) = filter_named_export(decl, exports_to_remove);
                marked[index] = remove;
                filtered |= changed;
            }
            Statement::ExportDefaultDeclaration(_) => {
                marked[index] = exports_to_remove.contains(&"default");
            }
            _ => {}
        }
    }

    if !filtered && !marked.contains(&true) {
        return Ok(false);
    }

    let mut index = 0;
    program.body.retain(|_| {
        let keep = !marked[index];
        index += 1;
        keep
    });

    let pruned = eliminate_dead_code(program, &previously_referenced);
    debug!(
        removed = ?exports_to_remove,
        pruned,
        "removed route exports"
    );

    Ok(true)
}

/// Filter one `export ...` statement in place
///
/// Returns `(remove_statement, filtered)`, where `filtered` reports that
/// individual specifiers or declarators were dropped.
fn filter_named_export(decl: &mut ExportNamedDeclaration<'_>, names: &[&str]) -> (bool, bool) {
    let mut filtered = false;

    if !decl.specifiers.is_empty() {
        let before = decl.specifiers.len();
        decl.specifiers
            .retain(|spec| !names.contains(&module_export_name(&spec.exported).as_str()));
        if decl.specifiers.len() != before {
            filtered = true;
        }
        if decl.specifiers.is_empty() {
            return (true, filtered);
        }
    }

    match &mut decl.declaration {
        Some(Declaration::VariableDeclaration(var)) => {
            let before = var.declarations.len();
            var.declarations.retain(|declarator| match &declarator.id.kind {
                BindingPatternKind::BindingIdentifier(ident) => {
                    !names.contains(&ident.name.as_str())
                }
                _ => true,
            });
            if var.declarations.len() != before {
                filtered = true;
            }
            (var.declarations.is_empty(), filtered)
        }
        Some(Declaration::FunctionDeclaration(func)) => (
            func.id
                .as_ref()
                .is_some_and(|id| names.contains(&id.name.as_str())),
            filtered,
        ),
        Some(Declaration::ClassDeclaration(class)) => (
            class
                .id
                .as_ref()
                .is_some_and(|id| names.contains(&id.name.as_str())),
            filtered,
        ),
        _ => (false, filtered),
    }
}

fn validate_destructured_exports(program: &Program<'_>, names: &[&str]) -> Result<()> {
    for stmt in &program.body {
        let Statement::ExportNamedDeclaration(decl) = stmt else {
            continue;
        };
        let Some(Declaration::VariableDeclaration(var)) = &decl.declaration else {
            continue;
        };
        for declarator in &var.declarations {
            if matches!(declarator.id.kind, BindingPatternKind::BindingIdentifier(_)) {
                continue;
            }
            let mut bound = Vec::new();
            binding_names(&declarator.id, &mut bound);
            if let Some(name) = bound.into_iter().find(|name| names.contains(&name.as_str())) {
                return Err(GenError::invalid_destructure(name));
            }
        }
    }
    Ok(())
}
