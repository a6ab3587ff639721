//! Lowering of one JSX element or fragment to a `createVNode` call.

use indexmap::IndexSet;
use swc_core::{
    common::{
        comments::{Comment, CommentKind, Comments},
        Span, DUMMY_SP,
    },
    ecma::ast::*,
};
use tracing::trace;

use crate::ast;
use crate::error::Result;
use crate::flags::{fragment_patch_flag, PatchFlags};
use crate::options::Options;
use crate::runtime::{RuntimeHelpers, FRAGMENT, WITH_DIRECTIVES};
use crate::scope::Bindings;
use crate::tag::ResolvedTag;
use crate::text::flatten_text;

/// Compiles JSX subtrees of one file.
///
/// Holds the per-file state every element needs: options, the runtime
/// reference cache, the file's declared names and, when the host keeps them,
/// the comment store used for patch flag annotations.
pub struct Compiler<'a> {
    pub(crate) options: &'a Options,
    pub(crate) helpers: &'a mut RuntimeHelpers,
    pub(crate) bindings: &'a Bindings,
    comments: Option<&'a dyn Comments>,
}

/// Compiled children of an element, in source order.
struct Children {
    items: Vec<ExprOrSpread>,
    /// An expression or spread child; their shape is unknown until runtime.
    has_unanalyzable: bool,
}

impl<'a> Compiler<'a> {
    pub fn new(
        options: &'a Options,
        helpers: &'a mut RuntimeHelpers,
        bindings: &'a Bindings,
        comments: Option<&'a dyn Comments>,
    ) -> Self {
        Self {
            options,
            helpers,
            bindings,
            comments,
        }
    }

    pub fn compile_element(&mut self, el: &JSXElement) -> Result<Expr> {
        let tag = self.resolve_tag(&el.opening.name)?;
        let children = self.compile_children(&el.children)?;
        let props = self.build_props(&el.opening, &tag)?;

        let mut flag = props.analysis.patch_flag(props.directives.len());
        if tag.is_fragment {
            let fragment_flag = fragment_patch_flag(children.items.len(), children.has_unanalyzable);
            flag = if fragment_flag == PatchFlags::BAIL {
                PatchFlags::BAIL
            } else {
                flag | fragment_flag
            };
        }
        let dynamic_names = props.analysis.emitted_prop_names(flag).cloned();

        trace!(
            tag = tag.name.as_deref().unwrap_or("<component>"),
            flag = flag.bits(),
            children = children.items.len(),
            directives = props.directives.len(),
            "compiled element"
        );

        let vnode_children = if tag.is_fragment {
            non_empty_array(children.items)
        } else {
            self.vnode_children(&tag, children.items, props.slots)
        };

        let ResolvedTag { expr: tag_expr, .. } = tag;
        let vnode = self.create_vnode(
            tag_expr,
            props.props,
            vnode_children,
            flag,
            dynamic_names.as_ref(),
            el.span,
        );

        if props.directives.is_empty() {
            return Ok(vnode);
        }
        let with_directives = self.helpers.get(WITH_DIRECTIVES);
        Ok(ast::call(
            with_directives,
            vec![vnode, ast::array_of(props.directives)],
        ))
    }

    /// `<>...</>` is `createVNode(Fragment, null, [...])`.
    pub fn compile_fragment(&mut self, frag: &JSXFragment) -> Result<Expr> {
        let children = self.compile_children(&frag.children)?;
        let flag = fragment_patch_flag(children.items.len(), children.has_unanalyzable);
        let tag = self.helpers.get_expr(FRAGMENT);

        trace!(
            flag = flag.bits(),
            children = children.items.len(),
            "compiled fragment"
        );

        Ok(self.create_vnode(
            tag,
            None,
            non_empty_array(children.items),
            flag,
            None,
            frag.span,
        ))
    }

    fn compile_children(&mut self, children: &[JSXElementChild]) -> Result<Children> {
        let mut items = Vec::with_capacity(children.len());
        let mut has_unanalyzable = false;

        for child in children {
            match child {
                JSXElementChild::JSXText(text) => {
                    let flattened = flatten_text(&text.value);
                    if !flattened.is_empty() {
                        items.push(ast::arg(ast::str_lit(&flattened)));
                    }
                }
                JSXElementChild::JSXExprContainer(container) => match &container.expr {
                    JSXExpr::Expr(expr) => {
                        has_unanalyzable = true;
                        items.push(ast::arg((**expr).clone()));
                    }
                    JSXExpr::JSXEmptyExpr(_) => {}
                },
                JSXElementChild::JSXSpreadChild(spread) => {
                    has_unanalyzable = true;
                    items.push(ExprOrSpread {
                        spread: Some(spread.span),
                        expr: spread.expr.clone(),
                    });
                }
                JSXElementChild::JSXElement(el) => {
                    items.push(ast::arg(self.compile_element(el)?));
                }
                JSXElementChild::JSXFragment(frag) => {
                    items.push(ast::arg(self.compile_fragment(frag)?));
                }
            }
        }

        Ok(Children {
            items,
            has_unanalyzable,
        })
    }

    /// Third argument of the construction call.
    ///
    /// Intrinsic elements take an array (or a lone string); components take
    /// a slots object whose `default` slot wraps the children.
    fn vnode_children(
        &mut self,
        tag: &ResolvedTag,
        mut items: Vec<ExprOrSpread>,
        slots: Option<Expr>,
    ) -> Option<Expr> {
        // Slot objects only mean something to components.
        let slots = slots.filter(|_| tag.is_component);
        if items.len() > 1 || slots.is_some() {
            if !tag.is_component {
                return Some(ast::array(items));
            }
            if items.is_empty() {
                return slots;
            }
            let mut props = vec![default_slot(ast::thunk(ast::array(items)))];
            match slots {
                Some(Expr::Object(obj)) => props.extend(obj.props),
                Some(other) => props.push(ast::spread(other)),
                None => {}
            }
            return Some(ast::object(props));
        }

        let child = items.pop()?;
        if child.spread.is_some() {
            let wrapped = ast::array(vec![child]);
            return Some(if tag.is_component {
                ast::object(vec![default_slot(ast::thunk(wrapped))])
            } else {
                wrapped
            });
        }

        let expr = *child.expr;
        if !tag.is_component {
            return Some(if ast::is_string_lit(&expr) {
                expr
            } else {
                ast::array_of(vec![expr])
            });
        }

        Some(match expr {
            Expr::Ident(_) if self.options.enable_object_slots => {
                let is_slot = self.helpers.is_slot();
                Expr::Cond(CondExpr {
                    span: DUMMY_SP,
                    test: Box::new(ast::call(is_slot, vec![expr.clone()])),
                    cons: Box::new(expr.clone()),
                    alt: Box::new(ast::object(vec![default_slot(ast::thunk(
                        ast::array_of(vec![expr]),
                    ))])),
                })
            }
            Expr::Object(_) if self.options.enable_object_slots => expr,
            Expr::Fn(_) | Expr::Arrow(_) => ast::object(vec![default_slot(expr)]),
            other => ast::object(vec![default_slot(ast::thunk(ast::array_of(vec![other])))]),
        })
    }

    /// `createVNode(tag, props, children[, flag[, dynamicProps]])`
    fn create_vnode(
        &mut self,
        tag: Expr,
        props: Option<Expr>,
        children: Option<Expr>,
        flag: PatchFlags,
        dynamic_names: Option<&IndexSet<String>>,
        span: Span,
    ) -> Expr {
        let factory = self.helpers.create_vnode();
        let mut args = vec![
            ast::arg(tag),
            ast::arg(props.unwrap_or_else(ast::null_lit)),
            ast::arg(children.unwrap_or_else(ast::null_lit)),
        ];
        if !flag.is_empty() {
            args.push(ast::arg(self.patch_flag_literal(flag, span)));
            if let Some(names) = dynamic_names {
                args.push(ast::arg(ast::array_of(
                    names.iter().map(|name| ast::str_lit(name)).collect(),
                )));
            }
        }
        ast::call_with_spread(Expr::Ident(factory), args)
    }

    /// The flag as a number, annotated `/* PROPS, NEED_PATCH */` when the
    /// host keeps comments.
    fn patch_flag_literal(&self, flag: PatchFlags, element_span: Span) -> Expr {
        if element_span.is_dummy() {
            return ast::num_lit(flag.bits() as f64, DUMMY_SP);
        }
        let span = Span::new(element_span.hi, element_span.hi);
        if let Some(comments) = self.comments {
            comments.add_leading(
                span.lo,
                Comment {
                    kind: CommentKind::Block,
                    span: DUMMY_SP,
                    text: format!(" {flag} ").into(),
                },
            );
        }
        ast::num_lit(flag.bits() as f64, span)
    }
}

fn default_slot(value: Expr) -> PropOrSpread {
    ast::key_value(ast::ident_key("default"), value)
}

fn non_empty_array(items: Vec<ExprOrSpread>) -> Option<Expr> {
    if items.is_empty() {
        None
    } else {
        Some(ast::array(items))
    }
}
