//! Collision-free identifier generation

use oxc_ast::ast::{BindingIdentifier, IdentifierReference, Program};
use oxc_ast_visit::{Visit, walk};
use rustc_hash::FxHashSet;

/// Hands out identifiers that do not clash with any name in a program
///
/// Names follow the `_name`, `_name2`, `_name3` sequence. Every binding and
/// every reference in the program is reserved, including unresolved globals.
#[derive(Debug, Default, Clone)]
pub struct UidGenerator {
    used: FxHashSet<String>,
}

impl UidGenerator {
    /// Reserve every identifier that appears in `program`
    pub fn from_program(program: &Program<'_>) -> Self {
        let mut collector = NameCollector::default();
        walk::walk_program(&mut collector, program);
        Self {
            used: collector.names,
        }
    }

    /// Reserve additional names
    pub fn reserve<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.used.extend(names.into_iter().map(Into::into));
    }

    /// Generate a fresh identifier derived from `name`
    pub fn generate(&mut self, name: &str) -> String {
        let base = format!("_{}", name.trim_start_matches('_'));
        let mut counter = 1;
        loop {
            let candidate = if counter > 1 {
                format!("{base}{counter}")
            } else {
                base.clone()
            };
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

#[derive(Default)]
struct NameCollector {
    names: FxHashSet<String>,
}

impl<'a> Visit<'a> for NameCollector {
    fn visit_binding_identifier(&mut self, ident: &BindingIdentifier<'a>) {
        self.names.insert(ident.name.to_string());
    }

    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        self.names.insert(ident.name.to_string());
    }
}
