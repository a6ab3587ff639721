//! Attribute classification for one element.

use lazy_static::lazy_static;
use regex::Regex;
use swc_core::ecma::ast::*;

use crate::ast;
use crate::directive::is_directive;
use crate::element::Compiler;
use crate::error::Result;
use crate::flags::PropsAnalysis;
use crate::merge::{is_on, PropsBuilder};
use crate::model::desugar_models;
use crate::tag::ResolvedTag;
use crate::text::flatten_text;

lazy_static! {
    static ref XLINK_REGEX: Regex = Regex::new(r"^xlink([A-Z])").unwrap();
}

/// Everything the attributes of an element contribute to its vnode.
#[derive(Debug, Default)]
pub struct ElementProps {
    pub props: Option<Expr>,
    /// Runtime directive tuples for `withDirectives`.
    pub directives: Vec<Expr>,
    /// Value of `v-slots`.
    pub slots: Option<Expr>,
    pub analysis: PropsAnalysis,
}

struct PropsState {
    builder: PropsBuilder,
    analysis: PropsAnalysis,
    directives: Vec<Expr>,
    slots: Option<Expr>,
}

impl Compiler<'_> {
    pub fn build_props(
        &mut self,
        opening: &JSXOpeningElement,
        tag: &ResolvedTag,
    ) -> Result<ElementProps> {
        let mut state = PropsState {
            builder: PropsBuilder::new(self.options.merge_props),
            analysis: PropsAnalysis::default(),
            directives: vec![],
            slots: None,
        };

        for item in &opening.attrs {
            match item {
                JSXAttrOrSpread::SpreadElement(spread) => {
                    state.analysis.has_dynamic_keys = true;
                    state.builder.push_spread((*spread.expr).clone());
                }
                JSXAttrOrSpread::JSXAttr(attr) => {
                    self.classify_attr(attr, tag, &opening.attrs, &mut state)?
                }
            }
        }

        Ok(ElementProps {
            props: state.builder.finish(self.helpers),
            directives: state.directives,
            slots: state.slots,
            analysis: state.analysis,
        })
    }

    fn classify_attr(
        &mut self,
        attr: &JSXAttr,
        tag: &ResolvedTag,
        attrs: &[JSXAttrOrSpread],
        state: &mut PropsState,
    ) -> Result<()> {
        let name = attr_name(&attr.name);
        let value = self.attr_value(attr)?;

        let is_dynamic = name == "ref" || value.as_ref().is_some_and(|v| !ast::is_constant(v));
        if is_dynamic {
            note_dynamic(&name, tag, &mut state.analysis);
        }

        if self.options.transform_on && (name == "on" || name == "nativeOn") {
            let transform_on = self.helpers.transform_on();
            state.builder.push_fragment(ast::call(
                transform_on,
                vec![value.unwrap_or_else(|| ast::bool_lit(true))],
            ));
            return Ok(());
        }

        if is_directive(&name) {
            return self.apply_directive(attr, value, tag, attrs, state);
        }

        let name = XLINK_REGEX.replace(&name, |caps: &regex::Captures| {
            format!("xlink:{}", caps[1].to_lowercase())
        });
        state.builder.push(ast::key_value(
            ast::str_key(&name),
            value.unwrap_or_else(|| ast::bool_lit(true)),
        ));
        Ok(())
    }

    fn apply_directive(
        &mut self,
        attr: &JSXAttr,
        value: Option<Expr>,
        tag: &ResolvedTag,
        attrs: &[JSXAttrOrSpread],
        state: &mut PropsState,
    ) -> Result<()> {
        let parsed = self.parse_directive(attr, value.clone(), tag, attrs)?;

        if parsed.name == "slots" {
            state.slots = value;
            return Ok(());
        }

        if let Some(directive) = &parsed.directive {
            state.directives.push(directive.clone());
        } else if let Some(dom_prop) = match parsed.name.as_str() {
            "html" => Some("innerHTML"),
            "text" => Some("textContent"),
            _ => None,
        } {
            let content = parsed.values.first().cloned().flatten().or(value);
            state.builder.push(ast::key_value(
                ast::str_key(dom_prop),
                content.unwrap_or_else(ast::undefined),
            ));
            state
                .analysis
                .dynamic_prop_names
                .insert(dom_prop.to_string());
        }

        if parsed.is_model() {
            let models = desugar_models(&parsed, attr.span)?;
            state.builder.extend(models.props);
            state
                .analysis
                .dynamic_prop_names
                .extend(models.dynamic_prop_names);
            state.analysis.has_dynamic_keys |= models.has_dynamic_keys;
        }

        Ok(())
    }

    /// Compiled attribute value; `None` for a bare attribute or `{}`.
    fn attr_value(&mut self, attr: &JSXAttr) -> Result<Option<Expr>> {
        Ok(match &attr.value {
            None => None,
            Some(JSXAttrValue::Lit(Lit::Str(s))) => Some(ast::str_lit(&flatten_text(&s.value))),
            Some(JSXAttrValue::Lit(lit)) => Some(Expr::Lit(lit.clone())),
            Some(JSXAttrValue::JSXExprContainer(container)) => match &container.expr {
                JSXExpr::Expr(expr) => Some((**expr).clone()),
                JSXExpr::JSXEmptyExpr(_) => None,
            },
            Some(JSXAttrValue::JSXElement(el)) => Some(self.compile_element(el)?),
            Some(JSXAttrValue::JSXFragment(frag)) => Some(self.compile_fragment(frag)?),
        })
    }
}

fn note_dynamic(name: &str, tag: &ResolvedTag, analysis: &mut PropsAnalysis) {
    if !tag.is_component
        && is_on(name)
        && name.to_lowercase() != "onclick"
        && name != "onUpdate:modelValue"
    {
        analysis.has_hydration_event_binding = true;
    }

    match name {
        "ref" => analysis.has_ref = true,
        "class" if !tag.is_component => analysis.has_class_binding = true,
        "style" if !tag.is_component => analysis.has_style_binding = true,
        "key" | "on" => {}
        _ if is_directive(name) => {}
        _ => {
            analysis.dynamic_prop_names.insert(name.to_string());
        }
    }
}

fn attr_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}
