//! Export surface of a module
//!
//! Collects the value names a module exports without evaluating it. Type-only
//! exports and unnamed `export *` re-exports contribute nothing.

use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, Declaration, ModuleExportName, Program, Statement,
};

/// Names exported by a program, in source order and without duplicates
pub fn export_names(program: &Program<'_>) -> Vec<String> {
    let mut names = Vec::new();

    for stmt in &program.body {
        match stmt {
            Statement::ExportDefaultDeclaration(_) => names.push("default".to_string()),
            Statement::ExportNamedDeclaration(decl) => {
                if decl.export_kind.is_type() {
                    continue;
                }
                if let Some(declaration) = &decl.declaration {
                    declaration_names(declaration, &mut names);
                }
                for spec in &decl.specifiers {
                    if !spec.export_kind.is_type() {
                        names.push(module_export_name(&spec.exported));
                    }
                }
            }
            Statement::ExportAllDeclaration(decl) => {
                if let Some(exported) = &decl.exported {
                    names.push(module_export_name(exported));
                }
            }
            _ => {}
        }
    }

    let mut seen = rustc_hash::FxHashSet::default();
    names.retain(|name| seen.insert(name.clone()));
    names
}

fn declaration_names(declaration: &Declaration<'_>, names: &mut Vec<String>) {
    match declaration {
        Declaration::VariableDeclaration(var) => {
            for declarator in &var.declarations {
                binding_names(&declarator.id, names);
            }
        }
        Declaration::FunctionDeclaration(func) => {
            if let Some(id) = &func.id {
                names.push(id.name.to_string());
            }
        }
        Declaration::ClassDeclaration(class) => {
            if let Some(id) = &class.id {
                names.push(id.name.to_string());
            }
        }
        Declaration::TSEnumDeclaration(decl) => names.push(decl.id.name.to_string()),
        _ => {}
    }
}

/// Every identifier bound by a (possibly nested) binding pattern
pub fn binding_names(pattern: &BindingPattern<'_>, names: &mut Vec<String>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => names.push(ident.name.to_string()),
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                binding_names(&property.value, names);
            }
            if let Some(rest) = &object.rest {
                binding_names(&rest.argument, names);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                binding_names(element, names);
            }
            if let Some(rest) = &array.rest {
                binding_names(&rest.argument, names);
            }
        }
        BindingPatternKind::AssignmentPattern(assignment) => binding_names(&assignment.left, names),
    }
}

/// Name an export specifier is visible under
pub fn module_export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}
