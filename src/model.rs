//! `v-model` / `v-models` on components, lowered to plain props.
//!
//! `v-model:title={x}` becomes `{ title: x, "onUpdate:title": $event => x = $event }`,
//! plus `titleModifiers` when modifiers are present.

use swc_core::{
    common::{Span, SyntaxContext, DUMMY_SP},
    ecma::ast::*,
};

use crate::ast;
use crate::directive::ParsedDirective;
use crate::error::{Result, TransformError};

const DEFAULT_MODEL: &str = "modelValue";

/// Props produced for one `v-model`/`v-models` attribute.
#[derive(Debug, Default)]
pub struct ModelProps {
    pub props: Vec<PropOrSpread>,
    pub dynamic_prop_names: Vec<String>,
    pub has_dynamic_keys: bool,
}

/// `directive` decides whether the value props are needed at all: a model
/// applied through a runtime directive (`vModelText` & co.) owns the value
/// and only the update handler is added.
pub fn desugar_models(parsed: &ParsedDirective, span: Span) -> Result<ModelProps> {
    let is_component_model = parsed.directive.is_none();
    let directive = if parsed.name == "models" {
        "v-models"
    } else {
        "v-model"
    };
    let mut out = ModelProps::default();

    for (index, value) in parsed.values.iter().enumerate() {
        let value = value.clone().ok_or_else(|| TransformError::NotAssignable {
            directive: directive.to_string(),
            span,
        })?;
        let target = assign_target(&value).ok_or_else(|| TransformError::NotAssignable {
            directive: directive.to_string(),
            span,
        })?;

        let model_name = ModelName::from_arg(parsed.args.get(index).cloned().flatten());
        let modifiers = parsed.modifiers.get(index).filter(|m| !m.is_empty());

        if is_component_model {
            out.props.push(ast::key_value(model_name.key(""), value));
            if let ModelName::Static(name) = &model_name {
                out.dynamic_prop_names.push(name.clone());
            }
            if let Some(modifiers) = modifiers {
                let key = match &model_name {
                    ModelName::Static(name) if name == DEFAULT_MODEL => {
                        ast::str_key("modelModifiers")
                    }
                    ModelName::Static(name) => ast::str_key(&format!("{name}Modifiers")),
                    ModelName::Dynamic(expr) => ast::computed_key(ast::bin(
                        BinaryOp::Add,
                        expr.clone(),
                        ast::str_lit("Modifiers"),
                    )),
                };
                out.props
                    .push(ast::key_value(key, ast::modifiers_object(modifiers)));
            }
        }

        out.props
            .push(ast::key_value(model_name.key("onUpdate:"), update_handler(target)));
        match &model_name {
            ModelName::Static(name) => out.dynamic_prop_names.push(format!("onUpdate:{name}")),
            ModelName::Dynamic(_) => out.has_dynamic_keys = true,
        }
    }

    Ok(out)
}

enum ModelName {
    Static(String),
    Dynamic(Expr),
}

impl ModelName {
    fn from_arg(arg: Option<Expr>) -> Self {
        match arg {
            None => Self::Static(DEFAULT_MODEL.to_string()),
            Some(Expr::Lit(Lit::Null(_))) => Self::Static(DEFAULT_MODEL.to_string()),
            Some(expr) => match ast::as_str(&expr) {
                Some(name) => Self::Static(name),
                None => Self::Dynamic(expr),
            },
        }
    }

    fn key(&self, prefix: &str) -> PropName {
        match self {
            Self::Static(name) => ast::str_key(&format!("{prefix}{name}")),
            Self::Dynamic(expr) if prefix.is_empty() => ast::computed_key(expr.clone()),
            Self::Dynamic(expr) => {
                ast::computed_key(ast::bin(BinaryOp::Add, ast::str_lit(prefix), expr.clone()))
            }
        }
    }
}

fn assign_target(expr: &Expr) -> Option<AssignTarget> {
    let simple = match expr {
        Expr::Ident(ident) => SimpleAssignTarget::Ident(BindingIdent::from(ident.clone())),
        Expr::Member(member) => SimpleAssignTarget::Member(member.clone()),
        Expr::SuperProp(prop) => SimpleAssignTarget::SuperProp(prop.clone()),
        Expr::Paren(paren) => return assign_target(&paren.expr),
        _ => return None,
    };
    Some(AssignTarget::Simple(simple))
}

/// `$event => target = $event`
fn update_handler(target: AssignTarget) -> Expr {
    let event = ast::ident("$event");
    Expr::Arrow(ArrowExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        params: vec![Pat::Ident(BindingIdent::from(event.clone()))],
        body: Box::new(BlockStmtOrExpr::Expr(Box::new(Expr::Assign(AssignExpr {
            span: DUMMY_SP,
            op: AssignOp::Assign,
            left: target,
            right: Box::new(Expr::Ident(event)),
        })))),
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    })
}
