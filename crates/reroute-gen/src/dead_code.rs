//! Dead code elimination for top-level bindings
//!
//! After exports are removed from a route module, helpers and imports that only
//! those exports used become orphaned. Elimination is restricted to bindings that
//! had at least one reference before the removal, so declarations the author left
//! unused on purpose are never touched.
//!
//! Each round rebuilds scoping with `oxc_semantic`, prunes the unreferenced
//! candidates and repeats until nothing changes, since removing one helper can
//! orphan the import it used.

use oxc_ast::ast::{ImportDeclarationSpecifier, Program, Statement};
use oxc_semantic::SemanticBuilder;
use rustc_hash::FxHashSet;

use crate::exports::binding_names;

/// Names of root-scope bindings that currently have at least one reference
pub fn referenced_bindings(program: &Program<'_>) -> FxHashSet<String> {
    root_bindings(program, true)
}

fn unreferenced_bindings(program: &Program<'_>) -> FxHashSet<String> {
    root_bindings(program, false)
}

fn root_bindings(program: &Program<'_>, referenced: bool) -> FxHashSet<String> {
    let scoping = SemanticBuilder::new().build(program).semantic.into_scoping();
    let root = scoping.root_scope_id();

    scoping
        .symbol_ids()
        .filter(|&symbol_id| scoping.symbol_scope_id(symbol_id) == root)
        .filter(|&symbol_id| {
            scoping.get_resolved_reference_ids(symbol_id).is_empty() != referenced
        })
        .map(|symbol_id| scoping.symbol_name(symbol_id).to_string())
        .collect()
}

/// Remove top-level declarations among `candidates` that are no longer referenced
///
/// Only plain declarations are pruned: imports, variable declarators, functions
/// and classes. Exported declarations are always kept. Returns whether anything
/// was removed.
pub fn eliminate_dead_code(program: &mut Program<'_>, candidates: &FxHashSet<String>) -> bool {
    let mut removed_any = false;

    loop {
        let removable: FxHashSet<String> = unreferenced_bindings(program)
            .into_iter()
            .filter(|name| candidates.contains(name))
            .collect();
        if removable.is_empty() || !prune_declarations(program, &removable) {
            break;
        }
        removed_any = true;
    }

    removed_any
}

fn prune_declarations(program: &mut Program<'_>, removable: &FxHashSet<String>) -> bool {
    let mut changed = false;
    let mut emptied = Vec::with_capacity(program.body.len());

    for stmt in program.body.iter_mut() {
        let remove_statement = match stmt {
            Statement::ImportDeclaration(import) => match &mut import.specifiers {
                Some(specifiers) if !specifiers.is_empty() => {
                    let before = specifiers.len();
                    specifiers.retain(|spec| !removable.contains(import_local_name(spec)));
                    changed |= specifiers.len() != before;
                    specifiers.is_empty()
                }
                // Side-effect imports stay.
                _ => false,
            },
            Statement::VariableDeclaration(var) => {
                let before = var.declarations.len();
                var.declarations.retain(|declarator| {
                    let mut names = Vec::new();
                    binding_names(&declarator.id, &mut names);
                    // Destructuring is only dropped when every bound name is dead.
                    names.is_empty() || !names.iter().all(|name| removable.contains(name))
                });
                changed |= var.declarations.len() != before;
                var.declarations.is_empty()
            }
            Statement::FunctionDeclaration(func) => func
                .id
                .as_ref()
                .is_some_and(|id| removable.contains(id.name.as_str())),
            Statement::ClassDeclaration(class) => class
                .id
                .as_ref()
                .is_some_and(|id| removable.contains(id.name.as_str())),
            _ => false,
        };
        emptied.push(remove_statement);
    }

    if emptied.iter().any(|&remove| remove) {
        changed = true;
        let mut index = 0;
        program.body.retain(|_| {
            let keep = !emptied[index];
            index += 1;
            keep
        });
    }

    changed
}

fn import_local_name<'s>(spec: &'s ImportDeclarationSpecifier<'_>) -> &'s str {
    match spec {
        ImportDeclarationSpecifier::ImportSpecifier(s) => s.local.name.as_str(),
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => s.local.name.as_str(),
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => s.local.name.as_str(),
    }
}
