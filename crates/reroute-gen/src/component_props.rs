//! Component props wrappers for route exports
//!
//! Rewrites
//!
//! ```js
//! export default function Page({ loaderData }) {}
//! export function ErrorBoundary({ error }) {}
//! ```
//!
//! into
//!
//! ```js
//! import { withComponentProps as _withComponentProps, withErrorBoundaryProps as _withErrorBoundaryProps } from "virtual/react-router/with-props";
//! export default _withComponentProps(function Page({ loaderData }) {});
//! export const ErrorBoundary = _withErrorBoundaryProps(function ErrorBoundary({ error }) {});
//! ```

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, BindingPatternKind, Declaration, ExportDefaultDeclaration,
    ExportDefaultDeclarationKind, ExportNamedDeclaration, Expression, FunctionType,
    ImportOrExportKind, Program, Statement, VariableDeclarationKind,
};
use oxc_ast::{AstBuilder, NONE};
use oxc_span::SPAN;
use tracing::debug;

use crate::names::{COMPONENT_WRAPPER, WITH_PROPS_MODULE, named_component_wrapper};
use crate::uid::UidGenerator;

/// Wrapper factories used by one module, keyed by imported name
#[derive(Debug, Default)]
struct UsedWrappers {
    entries: Vec<(String, String)>,
}

impl UsedWrappers {
    /// Local alias for `wrapper`, generating one on first use
    fn local_for(&mut self, wrapper: &str, uids: &mut UidGenerator) -> String {
        if let Some((_, local)) = self.entries.iter().find(|(name, _)| name == wrapper) {
            return local.clone();
        }
        let local = uids.generate(wrapper);
        self.entries.push((wrapper.to_string(), local.clone()));
        local
    }
}

/// Wrap the default export and the named component exports of a route module
///
/// Returns whether anything was wrapped. Generated aliases never collide with a
/// name already used in the module.
pub fn transform_route<'a>(allocator: &'a Allocator, program: &mut Program<'a>) -> bool {
    let ast = AstBuilder::new(allocator);
    let mut uids = UidGenerator::from_program(program);
    let mut used = UsedWrappers::default();

    for stmt in program.body.iter_mut() {
        match stmt {
            Statement::ExportDefaultDeclaration(decl) => {
                wrap_default_export(ast, decl, &mut used, &mut uids);
            }
            Statement::ExportNamedDeclaration(decl) => {
                wrap_named_exports(ast, decl, &mut used, &mut uids);
            }
            _ => {}
        }
    }

    if used.entries.is_empty() {
        return false;
    }

    debug!(wrappers = ?used.entries, "wrapped route component exports");
    program.body.insert(0, with_props_import(ast, &used));
    true
}

fn wrap_default_export<'a>(
    ast: AstBuilder<'a>,
    decl: &mut ExportDefaultDeclaration<'a>,
    used: &mut UsedWrappers,
    uids: &mut UidGenerator,
) {
    let placeholder = ExportDefaultDeclarationKind::NullLiteral(ast.alloc_null_literal(SPAN));
    let expression = match std::mem::replace(&mut decl.declaration, placeholder) {
        ExportDefaultDeclarationKind::FunctionDeclaration(mut function) => {
            function.r#type = FunctionType::FunctionExpression;
            Expression::FunctionExpression(function)
        }
        kind @ (ExportDefaultDeclarationKind::ClassDeclaration(_)
        | ExportDefaultDeclarationKind::TSInterfaceDeclaration(_)) => {
            decl.declaration = kind;
            return;
        }
        kind => kind.into_expression(),
    };

    let local = used.local_for(COMPONENT_WRAPPER, uids);
    decl.declaration = ExportDefaultDeclarationKind::CallExpression(ast.alloc_call_expression(
        SPAN,
        ast.expression_identifier(SPAN, ast.atom(&local)),
        NONE,
        ast.vec1(Argument::from(expression)),
        false,
    ));
}

fn wrap_named_exports<'a>(
    ast: AstBuilder<'a>,
    decl: &mut ExportNamedDeclaration<'a>,
    used: &mut UsedWrappers,
    uids: &mut UidGenerator,
) {
    if let Some(Declaration::VariableDeclaration(var)) = &mut decl.declaration {
        for declarator in var.declarations.iter_mut() {
            let BindingPatternKind::BindingIdentifier(ident) = &declarator.id.kind else {
                continue;
            };
            let Some(wrapper) = named_component_wrapper(ident.name.as_str()) else {
                continue;
            };
            let Some(init) = declarator.init.take() else {
                continue;
            };
            let local = used.local_for(&wrapper, uids);
            declarator.init = Some(wrap_call(ast, &local, init));
        }
        return;
    }

    let function_name = match &decl.declaration {
        Some(Declaration::FunctionDeclaration(function)) => function.id.as_ref().map(|id| id.name),
        _ => None,
    };
    let Some(name) = function_name else {
        return;
    };
    let Some(wrapper) = named_component_wrapper(name.as_str()) else {
        return;
    };
    let Some(Declaration::FunctionDeclaration(mut function)) = decl.declaration.take() else {
        return;
    };

    function.r#type = FunctionType::FunctionExpression;
    let local = used.local_for(&wrapper, uids);
    let init = wrap_call(ast, &local, Expression::FunctionExpression(function));
    let declarator = ast.variable_declarator(
        SPAN,
        VariableDeclarationKind::Const,
        ast.binding_pattern(
            ast.binding_pattern_kind_binding_identifier(SPAN, name),
            NONE,
            false,
        ),
        Some(init),
        false,
    );
    decl.declaration = Some(ast.declaration_variable(
        SPAN,
        VariableDeclarationKind::Const,
        ast.vec1(declarator),
        false,
    ));
}

fn wrap_call<'a>(ast: AstBuilder<'a>, callee: &str, argument: Expression<'a>) -> Expression<'a> {
    ast.expression_call(
        SPAN,
        ast.expression_identifier(SPAN, ast.atom(callee)),
        NONE,
        ast.vec1(Argument::from(argument)),
        false,
    )
}

fn with_props_import<'a>(ast: AstBuilder<'a>, used: &UsedWrappers) -> Statement<'a> {
    let specifiers = ast.vec_from_iter(used.entries.iter().map(|(imported, local)| {
        ast.import_declaration_specifier_import_specifier(
            SPAN,
            ast.module_export_name_identifier_name(SPAN, ast.atom(imported)),
            ast.binding_identifier(SPAN, ast.atom(local)),
            ImportOrExportKind::Value,
        )
    }));

    Statement::from(ast.module_declaration_import_declaration(
        SPAN,
        Some(specifiers),
        ast.string_literal(SPAN, WITH_PROPS_MODULE, None),
        None,
        NONE,
        ImportOrExportKind::Value,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::generate;
    use crate::parser::{ParseOptions, parse};

    fn run(source: &str) -> (bool, String) {
        let allocator = Allocator::default();
        let mut parsed = parse(&allocator, source, ParseOptions::tsx()).unwrap();
        let modified = transform_route(&allocator, &mut parsed.program);
        (modified, generate(&parsed.program, None).code)
    }

    #[test]
    fn wraps_default_function_declaration() {
        let (modified, code) = run("export default function App() { return null; }");
        assert!(modified);
        assert!(code.starts_with(
            "import { withComponentProps as _withComponentProps } from \"virtual/react-router/with-props\";"
        ));
        assert!(code.contains("export default _withComponentProps(function App()"));
        assert_eq!(code.matches("import ").count(), 1);
    }

    #[test]
    fn wraps_default_expression() {
        let (_, code) = run("const App = () => null;\nexport default App;");
        assert!(code.contains("export default _withComponentProps(App)"));
    }

    #[test]
    fn leaves_default_class_alone() {
        let (modified, code) = run("export default class App {}");
        assert!(!modified);
        assert!(!code.contains("with-props"));
    }

    #[test]
    fn wraps_named_component_exports() {
        let (_, code) = run(
            r#"
            export function ErrorBoundary() { return null; }
            export const HydrateFallback = () => null;
            export const meta = () => [];
            "#,
        );
        assert!(code.contains("withErrorBoundaryProps as _withErrorBoundaryProps"));
        assert!(code.contains("withHydrateFallbackProps as _withHydrateFallbackProps"));
        assert!(code.contains(
            "export const ErrorBoundary = _withErrorBoundaryProps(function ErrorBoundary()"
        ));
        assert!(code.contains("export const HydrateFallback = _withHydrateFallbackProps("));
        assert!(code.contains("export const meta = () => []"));
    }

    #[test]
    fn avoids_existing_bindings() {
        let (_, code) = run(
            r#"
            const _withComponentProps = "taken";
            export default function App() { return _withComponentProps; }
            "#,
        );
        assert!(code.contains("withComponentProps as _withComponentProps2"));
        assert!(code.contains("export default _withComponentProps2("));
    }

    #[test]
    fn untouched_without_component_exports() {
        let (modified, code) = run("export const loader = () => null;");
        assert!(!modified);
        assert!(!code.contains("import"));
    }
}
