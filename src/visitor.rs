use swc_core::{
    common::comments::Comments,
    ecma::{
        ast::*,
        visit::{VisitMut, VisitMutWith},
    },
};

use crate::element::Compiler;
use crate::error::{Result, TransformError};
use crate::options::Options;
use crate::runtime::RuntimeHelpers;
use crate::scope::Bindings;

/// Replaces every JSX element and fragment of a program, innermost first,
/// then prepends the runtime imports the compiled code refers to.
///
/// Stops at the first error; the program is left partially rewritten and the
/// caller is expected to discard it.
pub struct JsxTransform<'a> {
    options: &'a Options,
    comments: Option<&'a dyn Comments>,
    bindings: Bindings,
    helpers: RuntimeHelpers,
    compiled: usize,
    error: Option<TransformError>,
}

impl<'a> JsxTransform<'a> {
    pub fn new(options: &'a Options, bindings: Bindings, comments: Option<&'a dyn Comments>) -> Self {
        let helpers = RuntimeHelpers::new(options).avoiding(&bindings);
        Self {
            options,
            comments,
            bindings,
            helpers,
            compiled: 0,
            error: None,
        }
    }

    /// Number of JSX roots rewritten, or the error that stopped the pass.
    pub fn finish(self) -> Result<usize> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.compiled),
        }
    }

    fn compile(&mut self, expr: &Expr) -> Option<Result<Expr>> {
        let mut compiler = Compiler::new(
            self.options,
            &mut self.helpers,
            &self.bindings,
            self.comments,
        );
        match expr {
            Expr::JSXElement(el) => Some(compiler.compile_element(el)),
            Expr::JSXFragment(frag) => Some(compiler.compile_fragment(frag)),
            _ => None,
        }
    }
}

impl VisitMut for JsxTransform<'_> {
    fn visit_mut_module(&mut self, m: &mut Module) {
        m.visit_mut_children_with(self);
        if self.error.is_none() {
            self.helpers.inject_module(m);
        }
    }

    fn visit_mut_script(&mut self, s: &mut Script) {
        s.visit_mut_children_with(self);
        if self.error.is_none() {
            self.helpers.inject_script(s);
        }
    }

    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if self.error.is_some() {
            return;
        }
        // JSX nested in attribute or child expressions is compiled here first.
        expr.visit_mut_children_with(self);
        if self.error.is_some() {
            return;
        }

        match self.compile(expr) {
            Some(Ok(compiled)) => {
                self.compiled += 1;
                *expr = compiled;
            }
            Some(Err(err)) => self.error = Some(err),
            None => {}
        }
    }
}
