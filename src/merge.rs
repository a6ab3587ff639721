//! Assembly of the props argument: duplicate folding and `mergeProps`.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use swc_core::ecma::ast::*;

use crate::ast;
use crate::runtime::{RuntimeHelpers, MERGE_PROPS};

lazy_static! {
    static ref HANDLER_REGEX: Regex = Regex::new(r"^on[^a-z]").unwrap();
}

/// Event handler prop name (`onClick`, `onUpdate:modelValue`).
pub fn is_on(name: &str) -> bool {
    HANDLER_REGEX.is_match(name)
}

fn is_mergeable(name: &str) -> bool {
    name == "class" || name == "style" || is_on(name)
}

/// Folds repeated static keys within one run of properties.
///
/// `class`, `style` and handlers accumulate into an array in declaration
/// order; anything else keeps its first position and takes the last value.
/// Spreads end a run, since what they contribute is unknown.
pub fn dedupe_properties(props: Vec<PropOrSpread>) -> Vec<PropOrSpread> {
    let mut known: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<PropOrSpread> = Vec::with_capacity(props.len());

    for prop in props {
        let name = match &prop {
            PropOrSpread::Spread(_) => {
                known.clear();
                None
            }
            PropOrSpread::Prop(p) => static_name(p),
        };
        let Some(name) = name else {
            out.push(prop);
            continue;
        };

        let Some(&index) = known.get(&name) else {
            known.insert(name, out.len());
            out.push(prop);
            continue;
        };

        let (Some(incoming), Some(existing)) = (into_value(prop), key_value_mut(&mut out[index]))
        else {
            continue;
        };
        if is_mergeable(&name) {
            match &mut *existing.value {
                Expr::Array(arr) => arr.elems.push(Some(ast::arg(incoming))),
                value => {
                    let first = std::mem::replace(value, ast::null_lit());
                    *value = ast::array_of(vec![first, incoming]);
                }
            }
        } else {
            *existing.value = incoming;
        }
    }

    out
}

fn static_name(prop: &Prop) -> Option<String> {
    match prop {
        Prop::KeyValue(kv) => ast::prop_name_str(&kv.key),
        Prop::Shorthand(ident) => Some(ident.sym.to_string()),
        _ => None,
    }
}

fn into_value(prop: PropOrSpread) -> Option<Expr> {
    match prop {
        PropOrSpread::Prop(p) => match *p {
            Prop::KeyValue(kv) => Some(*kv.value),
            Prop::Shorthand(ident) => Some(Expr::Ident(ident)),
            _ => None,
        },
        PropOrSpread::Spread(_) => None,
    }
}

/// The property as `key: value`, expanding a shorthand in place.
fn key_value_mut(prop: &mut PropOrSpread) -> Option<&mut KeyValueProp> {
    let PropOrSpread::Prop(p) = prop else {
        return None;
    };
    if let Prop::Shorthand(ident) = &**p {
        let ident = ident.clone();
        **p = Prop::KeyValue(KeyValueProp {
            key: ast::ident_key(&ident.sym),
            value: Box::new(Expr::Ident(ident)),
        });
    }
    match &mut **p {
        Prop::KeyValue(kv) => Some(kv),
        _ => None,
    }
}

/// Collects attributes and spreads in source order and produces the props
/// argument of the construction call.
///
/// With `merge_props` every spread starts a new fragment and more than one
/// fragment is combined through the runtime `mergeProps`. Without it, spreads
/// stay inline in a single object literal.
pub struct PropsBuilder {
    merge_props: bool,
    properties: Vec<PropOrSpread>,
    fragments: Vec<Expr>,
}

impl PropsBuilder {
    pub fn new(merge_props: bool) -> Self {
        Self {
            merge_props,
            properties: vec![],
            fragments: vec![],
        }
    }

    pub fn push(&mut self, prop: PropOrSpread) {
        self.properties.push(prop);
    }

    pub fn extend(&mut self, props: impl IntoIterator<Item = PropOrSpread>) {
        self.properties.extend(props);
    }

    /// An expression that must reach `mergeProps` on its own.
    pub fn push_fragment(&mut self, expr: Expr) {
        self.flush();
        self.fragments.push(expr);
    }

    pub fn push_spread(&mut self, expr: Expr) {
        if self.merge_props {
            self.push_fragment(expr);
            return;
        }
        match expr {
            Expr::Object(obj) => self.properties.extend(obj.props),
            other => self.properties.push(ast::spread(other)),
        }
    }

    fn flush(&mut self) {
        if !self.properties.is_empty() {
            let props = dedupe_properties(std::mem::take(&mut self.properties));
            self.fragments.push(ast::object(props));
        }
    }

    pub fn finish(mut self, helpers: &mut RuntimeHelpers) -> Option<Expr> {
        if self.fragments.is_empty() {
            if self.properties.is_empty() {
                return None;
            }
            if self.properties.len() == 1 {
                if let PropOrSpread::Spread(spread) = &self.properties[0] {
                    return Some((*spread.expr).clone());
                }
            }
            return Some(ast::object(dedupe_properties(self.properties)));
        }

        self.flush();
        if self.fragments.len() == 1 {
            return self.fragments.pop();
        }
        let merge = helpers.get(MERGE_PROPS);
        Some(ast::call(merge, self.fragments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn kv(key: &str, value: Expr) -> PropOrSpread {
        ast::key_value(ast::str_key(key), value)
    }

    fn entries(props: &[PropOrSpread]) -> Vec<(String, Expr)> {
        props
            .iter()
            .filter_map(|p| match p {
                PropOrSpread::Prop(p) => match &**p {
                    Prop::KeyValue(kv) => {
                        Some((ast::prop_name_str(&kv.key).unwrap(), (*kv.value).clone()))
                    }
                    _ => None,
                },
                PropOrSpread::Spread(_) => None,
            })
            .collect()
    }

    fn array_len(expr: &Expr) -> usize {
        match expr {
            Expr::Array(arr) => arr.elems.len(),
            _ => panic!("expected array, got {expr:?}"),
        }
    }

    #[test]
    fn scalar_duplicates_keep_the_last_value_at_the_first_position() {
        let out = dedupe_properties(vec![
            kv("id", ast::str_lit("a")),
            kv("title", ast::str_lit("t")),
            kv("id", ast::str_lit("b")),
        ]);
        let out = entries(&out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].0, "id");
        assert_eq!(ast::as_str(&out[0].1).as_deref(), Some("b"));
    }

    #[test]
    fn class_style_and_handlers_accumulate() {
        let out = dedupe_properties(vec![
            kv("class", ast::str_lit("a")),
            kv("onClick", Expr::Ident(ast::ident("f"))),
            kv("class", ast::str_lit("b")),
            kv("onClick", Expr::Ident(ast::ident("g"))),
            kv("class", ast::str_lit("c")),
        ]);
        let out = entries(&out);
        assert_eq!(out.len(), 2);
        assert_eq!(array_len(&out[0].1), 3);
        assert_eq!(array_len(&out[1].1), 2);
    }

    #[test]
    fn spreads_reset_known_names() {
        let out = dedupe_properties(vec![
            kv("id", ast::str_lit("a")),
            ast::spread(Expr::Ident(ast::ident("rest"))),
            kv("id", ast::str_lit("b")),
        ]);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn onclick_like_names_are_not_handlers() {
        assert!(is_on("onClick"));
        assert!(is_on("onUpdate:modelValue"));
        assert!(!is_on("one"));
        assert!(!is_on("on"));
    }

    #[test]
    fn single_fragment_is_used_as_is() {
        let mut helpers = RuntimeHelpers::new(&Options::default());
        let mut builder = PropsBuilder::new(true);
        builder.push_spread(Expr::Ident(ast::ident("attrs")));
        let props = builder.finish(&mut helpers).unwrap();
        assert!(matches!(props, Expr::Ident(ref i) if &*i.sym == "attrs"));
        assert!(helpers.is_empty());
    }

    #[test]
    fn fragments_go_through_merge_props() {
        let mut helpers = RuntimeHelpers::new(&Options::default());
        let mut builder = PropsBuilder::new(true);
        builder.push(kv("id", ast::str_lit("a")));
        builder.push_spread(Expr::Ident(ast::ident("attrs")));
        builder.push(kv("title", ast::str_lit("t")));
        let Some(Expr::Call(call)) = builder.finish(&mut helpers) else {
            panic!("expected a mergeProps call");
        };
        assert_eq!(call.args.len(), 3);
        assert!(!helpers.is_empty());
    }

    #[test]
    fn without_merge_props_spreads_stay_inline() {
        let mut helpers = RuntimeHelpers::new(&Options::default());
        let mut builder = PropsBuilder::new(false);
        builder.push(kv("id", ast::str_lit("a")));
        builder.push_spread(Expr::Ident(ast::ident("attrs")));
        let Some(Expr::Object(obj)) = builder.finish(&mut helpers) else {
            panic!("expected an object literal");
        };
        assert_eq!(obj.props.len(), 2);
        assert!(matches!(obj.props[1], PropOrSpread::Spread(_)));
        assert!(helpers.is_empty());
    }
}
