use std::collections::HashSet;

use swc_core::ecma::{
    ast::*,
    atoms::Atom,
    visit::{Visit, VisitWith},
};

/// Bindings declared in a file, keyed by `Id`.
///
/// Answers "does this tag name refer to something the user declared", which
/// is what separates `<Button />` (a local component) from an unresolved name
/// that must go through `resolveComponent`. The `SyntaxContext` half of each
/// `Id` comes from `resolver`, so a parameter named `Foo` in one function does
/// not bind `<Foo />` elsewhere.
#[derive(Debug, Default)]
pub struct Bindings {
    ids: HashSet<Id>,
    names: HashSet<Atom>,
}

impl Bindings {
    pub fn collect(program: &Program) -> Self {
        let mut collector = BindingCollector {
            out: HashSet::new(),
        };
        program.visit_with(&mut collector);
        let names = collector.out.iter().map(|(sym, _)| sym.clone()).collect();
        Self {
            ids: collector.out,
            names,
        }
    }

    /// Whether `id` resolves to one of the file's declarations.
    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    /// Every declared name, whatever its scope.
    pub(crate) fn names(&self) -> &HashSet<Atom> {
        &self.names
    }
}

struct BindingCollector {
    out: HashSet<Id>,
}

impl BindingCollector {
    fn add_pat(&mut self, pat: &Pat) {
        let mut idents = PatIdents { out: &mut self.out };
        pat.visit_with(&mut idents);
    }
}

impl Visit for BindingCollector {
    fn visit_var_declarator(&mut self, d: &VarDeclarator) {
        self.add_pat(&d.name);
        d.visit_children_with(self);
    }

    fn visit_fn_decl(&mut self, n: &FnDecl) {
        self.out.insert(n.ident.to_id());
        n.visit_children_with(self);
    }

    fn visit_class_decl(&mut self, n: &ClassDecl) {
        self.out.insert(n.ident.to_id());
        n.visit_children_with(self);
    }

    fn visit_param(&mut self, p: &Param) {
        self.add_pat(&p.pat);
        p.visit_children_with(self);
    }

    fn visit_arrow_expr(&mut self, n: &ArrowExpr) {
        for p in &n.params {
            self.add_pat(p);
        }
        n.visit_children_with(self);
    }

    fn visit_catch_clause(&mut self, n: &CatchClause) {
        if let Some(p) = &n.param {
            self.add_pat(p);
        }
        n.visit_children_with(self);
    }

    fn visit_import_specifier(&mut self, s: &ImportSpecifier) {
        let local = match s {
            ImportSpecifier::Named(named) => &named.local,
            ImportSpecifier::Default(def) => &def.local,
            ImportSpecifier::Namespace(ns) => &ns.local,
        };
        self.out.insert(local.to_id());
    }
}

struct PatIdents<'a> {
    out: &'a mut HashSet<Id>,
}

impl Visit for PatIdents<'_> {
    fn visit_binding_ident(&mut self, id: &BindingIdent) {
        self.out.insert(id.id.to_id());
    }

    // Default values are expressions, not declarations.
    fn visit_expr(&mut self, _: &Expr) {}
}
