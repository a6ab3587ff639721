//! Directive attributes: `v-show`, `v-model`, `vCustom_mod={[value, "arg", ["mod"]]}`.

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;
use swc_core::ecma::ast::*;

use crate::ast;
use crate::element::Compiler;
use crate::error::{Result, TransformError};
use crate::runtime::{
    RESOLVE_DIRECTIVE, V_MODEL_CHECKBOX, V_MODEL_DYNAMIC, V_MODEL_RADIO, V_MODEL_SELECT,
    V_MODEL_TEXT, V_SHOW,
};
use crate::tag::ResolvedTag;

lazy_static! {
    static ref DIRECTIVE_REGEX: Regex = Regex::new(r"^v(-[a-zA-Z]|[A-Z])").unwrap();
}

/// `v-foo`, `vFoo` and their namespaced forms.
pub fn is_directive(name: &str) -> bool {
    DIRECTIVE_REGEX.is_match(name)
}

/// Directive name split into base name, namespaced argument and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveName {
    pub name: String,
    pub argument: Option<String>,
    pub modifiers: IndexSet<String>,
}

impl DirectiveName {
    pub fn parse(attr_name: &JSXAttrName) -> Self {
        match attr_name {
            // v-model:title_trim
            JSXAttrName::JSXNamespacedName(ns) => {
                let mut segments = ns.name.sym.split('_');
                let argument = segments.next().filter(|s| !s.is_empty()).map(str::to_string);
                Self {
                    name: normalize(ns.ns.sym.as_ref()),
                    argument,
                    modifiers: collect_modifiers(segments),
                }
            }
            // vModel_trim / v-model_trim
            JSXAttrName::Ident(ident) => {
                let mut segments = ident.sym.split('_');
                let base = segments.next().unwrap_or_default();
                Self {
                    name: normalize(base),
                    argument: None,
                    modifiers: collect_modifiers(segments),
                }
            }
        }
    }
}

fn collect_modifiers<'a>(segments: impl Iterator<Item = &'a str>) -> IndexSet<String> {
    segments
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `vShow` / `v-show` → `show`
fn normalize(raw: &str) -> String {
    let rest = raw.strip_prefix('v').unwrap_or(raw);
    let rest = rest.strip_prefix('-').unwrap_or(rest);
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// String elements of a modifier array literal.
fn parse_modifiers(expr: Option<&Expr>) -> IndexSet<String> {
    match expr {
        Some(Expr::Array(arr)) => arr
            .elems
            .iter()
            .flatten()
            .filter_map(|el| ast::as_str(&el.expr))
            .filter(|s| !s.is_empty())
            .collect(),
        _ => IndexSet::new(),
    }
}

/// Result of parsing one directive attribute.
///
/// `values`, `args` and `modifiers` line up by index; `v-models` produces one
/// entry per binding, everything else exactly one. A `None` argument means
/// "the default model name".
#[derive(Debug, Clone)]
pub struct ParsedDirective {
    pub name: String,
    pub values: Vec<Option<Expr>>,
    pub args: Vec<Option<Expr>>,
    pub modifiers: Vec<IndexSet<String>>,
    /// `[handle, value, arg, modifiers]` for directives applied at runtime.
    pub directive: Option<Expr>,
}

impl ParsedDirective {
    pub fn is_model(&self) -> bool {
        self.name == "model" || self.name == "models"
    }
}

enum InputType {
    Static(String),
    Dynamic,
}

impl Compiler<'_> {
    pub fn parse_directive(
        &mut self,
        attr: &JSXAttr,
        value: Option<Expr>,
        tag: &ResolvedTag,
        attrs: &[JSXAttrOrSpread],
    ) -> Result<ParsedDirective> {
        let DirectiveName {
            name,
            argument,
            modifiers: name_modifiers,
        } = DirectiveName::parse(&attr.name);

        let is_model = name == "model";
        let is_models = name == "models";

        if is_model && !matches!(attr.value, Some(JSXAttrValue::JSXExprContainer(_))) {
            return Err(TransformError::ModelRequiresExpression {
                directive: attr_display_name(&attr.name),
                span: attr.span,
            });
        }
        if is_models && !tag.is_component {
            return Err(TransformError::ModelsOnIntrinsic { span: attr.span });
        }

        let should_resolve = !matches!(
            name.as_str(),
            "html" | "text" | "model" | "slots" | "models"
        ) || (is_model && !tag.is_component);

        let mut args: Vec<Option<Expr>> = vec![];
        if let Some(argument) = &argument {
            args.push(Some(ast::str_lit(argument)));
        }
        let mut values = vec![];
        let mut modifiers = vec![];

        match value.as_ref().map(unparen) {
            Some(Expr::Array(arr)) => {
                let entries: Vec<&ArrayLit> = if is_models {
                    arr.elems
                        .iter()
                        .map(|el| match el.as_ref().map(|el| unparen(&el.expr)) {
                            Some(Expr::Array(inner)) => Ok(inner),
                            _ => Err(TransformError::ModelsNotNested { span: attr.span }),
                        })
                        .collect::<Result<_>>()?
                } else {
                    vec![arr]
                };

                for entry in entries {
                    let mut elems = entry.elems.iter().map(|el| el.as_ref());
                    let first = elems.next().flatten();
                    let second = elems.next().flatten();
                    let third = elems.next().flatten();

                    let mut entry_modifiers = name_modifiers.clone();
                    match second {
                        Some(second)
                            if second.spread.is_none()
                                && !matches!(unparen(&second.expr), Expr::Array(_)) =>
                        {
                            args.push(Some((*second.expr).clone()));
                            entry_modifiers = parse_modifiers(third.map(|t| unparen(&t.expr)));
                        }
                        Some(second) if second.spread.is_none() => {
                            if !should_resolve {
                                args.push(None);
                            }
                            entry_modifiers = parse_modifiers(Some(unparen(&second.expr)));
                        }
                        _ => {
                            if !should_resolve {
                                args.push(None);
                            }
                        }
                    }
                    modifiers.push(entry_modifiers);
                    values.push(first.map(|f| (*f.expr).clone()));
                }
            }
            _ => {
                if is_model && !should_resolve {
                    args.push(None);
                }
                modifiers.push(name_modifiers);
            }
        }

        if values.is_empty() {
            values.push(value);
        }

        let directive = if should_resolve {
            let handle = self.resolve_directive_handle(&name, tag, attrs);
            Some(directive_tuple(
                handle,
                values.first().cloned().flatten(),
                args.first().cloned().flatten(),
                modifiers.first(),
            ))
        } else {
            None
        };

        Ok(ParsedDirective {
            name,
            values,
            args,
            modifiers,
            directive,
        })
    }

    fn resolve_directive_handle(
        &mut self,
        name: &str,
        tag: &ResolvedTag,
        attrs: &[JSXAttrOrSpread],
    ) -> Expr {
        match name {
            "show" => self.helpers.get_expr(V_SHOW),
            "model" => {
                let helper = match tag.name.as_deref() {
                    Some("select") => V_MODEL_SELECT,
                    Some("textarea") => V_MODEL_TEXT,
                    _ => match input_type(attrs) {
                        None => V_MODEL_TEXT,
                        Some(InputType::Static(ty)) => match ty.as_str() {
                            "checkbox" => V_MODEL_CHECKBOX,
                            "radio" => V_MODEL_RADIO,
                            _ => V_MODEL_TEXT,
                        },
                        Some(InputType::Dynamic) => V_MODEL_DYNAMIC,
                    },
                };
                self.helpers.get_expr(helper)
            }
            _ => {
                let resolve = self.helpers.get(RESOLVE_DIRECTIVE);
                ast::call(resolve, vec![ast::str_lit(name)])
            }
        }
    }
}

/// `[handle, value, arg, modifiers]` with trailing absent entries trimmed.
fn directive_tuple(
    handle: Expr,
    value: Option<Expr>,
    arg: Option<Expr>,
    modifiers: Option<&IndexSet<String>>,
) -> Expr {
    let modifiers = modifiers.filter(|m| !m.is_empty());
    let mut tuple = vec![handle];
    if value.is_some() || arg.is_some() || modifiers.is_some() {
        tuple.push(value.unwrap_or_else(ast::undefined));
    }
    if arg.is_some() || modifiers.is_some() {
        tuple.push(arg.unwrap_or_else(ast::undefined));
    }
    if let Some(modifiers) = modifiers {
        tuple.push(ast::modifiers_object(modifiers));
    }
    ast::array_of(tuple)
}

fn input_type(attrs: &[JSXAttrOrSpread]) -> Option<InputType> {
    attrs.iter().find_map(|item| {
        let JSXAttrOrSpread::JSXAttr(attr) = item else {
            return None;
        };
        match &attr.name {
            JSXAttrName::Ident(ident) if ident.sym.as_ref() == "type" => {}
            _ => return None,
        }
        Some(match &attr.value {
            Some(JSXAttrValue::Lit(Lit::Str(s))) => InputType::Static(s.value.to_string()),
            Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
                expr: JSXExpr::Expr(expr),
                ..
            })) => match ast::as_str(expr) {
                Some(ty) => InputType::Static(ty),
                None => InputType::Dynamic,
            },
            Some(_) => InputType::Dynamic,
            None => InputType::Static(String::new()),
        })
    })
}

fn unparen(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(p) => unparen(&p.expr),
        _ => expr,
    }
}

fn attr_display_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_core::common::DUMMY_SP;

    fn ident_name(name: &str) -> JSXAttrName {
        JSXAttrName::Ident(IdentName::new(name.into(), DUMMY_SP))
    }

    #[test]
    fn recognizes_both_directive_spellings() {
        assert!(is_directive("v-show"));
        assert!(is_directive("vShow"));
        assert!(is_directive("vModel_trim"));
        assert!(!is_directive("value"));
        assert!(!is_directive("v"));
        assert!(!is_directive("v-"));
    }

    #[test]
    fn base_name_is_lower_camel() {
        let parsed = DirectiveName::parse(&ident_name("vCustomThing"));
        assert_eq!(parsed.name, "customThing");
        assert!(parsed.modifiers.is_empty());

        let parsed = DirectiveName::parse(&ident_name("v-show"));
        assert_eq!(parsed.name, "show");
    }

    #[test]
    fn underscores_carry_modifiers() {
        let parsed = DirectiveName::parse(&ident_name("vModel_trim_lazy"));
        assert_eq!(parsed.name, "model");
        assert_eq!(parsed.argument, None);
        assert_eq!(
            parsed.modifiers.into_iter().collect::<Vec<_>>(),
            vec!["trim", "lazy"]
        );
    }

    #[test]
    fn tuple_fills_holes_with_undefined() {
        let mut mods = IndexSet::new();
        mods.insert("once".to_string());
        let Expr::Array(tuple) = directive_tuple(ast::str_lit("h"), None, None, Some(&mods)) else {
            panic!("expected array");
        };
        assert_eq!(tuple.elems.len(), 4);
        assert!(matches!(&*tuple.elems[1].as_ref().unwrap().expr, Expr::Unary(_)));
        assert!(matches!(&*tuple.elems[2].as_ref().unwrap().expr, Expr::Unary(_)));
    }

    #[test]
    fn tuple_trims_trailing_absent_entries() {
        let Expr::Array(tuple) =
            directive_tuple(ast::str_lit("h"), Some(ast::str_lit("v")), None, None)
        else {
            panic!("expected array");
        };
        assert_eq!(tuple.elems.len(), 2);
    }
}
