//! Tag resolution: intrinsic element, fragment, or component reference.

use swc_core::ecma::ast::*;

use crate::ast;
use crate::element::Compiler;
use crate::error::{Result, TransformError};
use crate::runtime::{FRAGMENT, RESOLVE_COMPONENT};
use crate::tags::{self, is_intrinsic_tag, is_slotless_tag};

/// The first argument of the construction call plus what the rest of the
/// compiler needs to know about it.
#[derive(Debug, Clone)]
pub struct ResolvedTag {
    pub expr: Expr,
    /// Static tag string for intrinsic and custom elements (`"input"`).
    pub name: Option<String>,
    pub is_component: bool,
    pub is_fragment: bool,
}

impl Compiler<'_> {
    pub fn resolve_tag(&mut self, name: &JSXElementName) -> Result<ResolvedTag> {
        match name {
            JSXElementName::Ident(ident) => Ok(self.resolve_ident_tag(ident)),
            JSXElementName::JSXMemberExpr(member) => {
                let last = member.prop.sym.as_ref();
                Ok(ResolvedTag {
                    expr: jsx_member_to_expr(member),
                    name: None,
                    is_component: !is_slotless_tag(last),
                    is_fragment: last == tags::FRAGMENT,
                })
            }
            JSXElementName::JSXNamespacedName(ns) => Err(TransformError::UnsupportedTag {
                name: format!("{}:{}", ns.ns.sym, ns.name.sym),
                span: ns.ns.span.with_hi(ns.name.span.hi),
            }),
        }
    }

    fn resolve_ident_tag(&mut self, ident: &Ident) -> ResolvedTag {
        let name = ident.sym.as_ref();

        if is_intrinsic_tag(name) {
            return ResolvedTag {
                expr: ast::str_lit(name),
                name: Some(name.to_string()),
                is_component: false,
                is_fragment: false,
            };
        }

        let is_custom_element = self.options.is_custom_element.matches(name);
        let is_component = !is_custom_element && !is_slotless_tag(name);

        let expr = if name == tags::FRAGMENT {
            self.helpers.get_expr(FRAGMENT)
        } else if self.bindings.contains(&ident.to_id()) {
            Expr::Ident(ident.clone())
        } else if is_custom_element {
            return ResolvedTag {
                expr: ast::str_lit(name),
                name: Some(name.to_string()),
                is_component: false,
                is_fragment: false,
            };
        } else {
            let resolve = self.helpers.get(RESOLVE_COMPONENT);
            ast::call(resolve, vec![ast::str_lit(name)])
        };

        ResolvedTag {
            expr,
            name: None,
            is_component,
            is_fragment: name == tags::FRAGMENT,
        }
    }
}

fn jsx_member_to_expr(member: &JSXMemberExpr) -> Expr {
    let obj = match &member.obj {
        JSXObject::Ident(ident) => Expr::Ident(ident.clone()),
        JSXObject::JSXMemberExpr(inner) => jsx_member_to_expr(inner),
    };
    ast::member(obj, member.prop.sym.as_ref())
}
