//! Small builders for the expression shapes the compiler emits.

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;
use swc_core::{
    common::{Span, SyntaxContext, DUMMY_SP},
    ecma::ast::*,
};

lazy_static! {
    static ref PLAIN_IDENT_REGEX: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

pub fn str_lit(value: &str) -> Expr {
    Expr::Lit(Lit::Str(Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }))
}

pub fn null_lit() -> Expr {
    Expr::Lit(Lit::Null(Null { span: DUMMY_SP }))
}

pub fn bool_lit(value: bool) -> Expr {
    Expr::Lit(Lit::Bool(Bool {
        span: DUMMY_SP,
        value,
    }))
}

pub fn num_lit(value: f64, span: Span) -> Expr {
    Expr::Lit(Lit::Num(Number {
        span,
        value,
        raw: None,
    }))
}

/// `void 0`
pub fn undefined() -> Expr {
    Expr::Unary(UnaryExpr {
        span: DUMMY_SP,
        op: UnaryOp::Void,
        arg: Box::new(num_lit(0.0, DUMMY_SP)),
    })
}

pub fn ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty())
}

pub fn arg(expr: Expr) -> ExprOrSpread {
    ExprOrSpread {
        spread: None,
        expr: Box::new(expr),
    }
}

pub fn call(callee: Ident, args: Vec<Expr>) -> Expr {
    call_expr(Expr::Ident(callee), args)
}

pub fn call_expr(callee: Expr, args: Vec<Expr>) -> Expr {
    call_with_spread(callee, args.into_iter().map(arg).collect())
}

pub fn call_with_spread(callee: Expr, args: Vec<ExprOrSpread>) -> Expr {
    Expr::Call(CallExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(Box::new(callee)),
        args,
        type_args: None,
    })
}

pub fn member(obj: Expr, prop: &str) -> Expr {
    Expr::Member(MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(obj),
        prop: MemberProp::Ident(IdentName::new(prop.into(), DUMMY_SP)),
    })
}

pub fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Bin(BinExpr {
        span: DUMMY_SP,
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn array(elems: Vec<ExprOrSpread>) -> Expr {
    Expr::Array(ArrayLit {
        span: DUMMY_SP,
        elems: elems.into_iter().map(Some).collect(),
    })
}

pub fn array_of(exprs: Vec<Expr>) -> Expr {
    array(exprs.into_iter().map(arg).collect())
}

pub fn object(props: Vec<PropOrSpread>) -> Expr {
    Expr::Object(ObjectLit {
        span: DUMMY_SP,
        props,
    })
}

pub fn key_value(key: PropName, value: Expr) -> PropOrSpread {
    PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
        key,
        value: Box::new(value),
    })))
}

/// `"name"` as an object key; attribute names are rarely valid identifiers.
pub fn str_key(name: &str) -> PropName {
    PropName::Str(Str {
        span: DUMMY_SP,
        value: name.into(),
        raw: None,
    })
}

pub fn ident_key(name: &str) -> PropName {
    PropName::Ident(IdentName::new(name.into(), DUMMY_SP))
}

pub fn computed_key(expr: Expr) -> PropName {
    PropName::Computed(ComputedPropName {
        span: DUMMY_SP,
        expr: Box::new(expr),
    })
}

pub fn spread(expr: Expr) -> PropOrSpread {
    PropOrSpread::Spread(SpreadElement {
        dot3_token: DUMMY_SP,
        expr: Box::new(expr),
    })
}

/// `() => body`
pub fn thunk(body: Expr) -> Expr {
    Expr::Arrow(ArrowExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        params: vec![],
        body: Box::new(BlockStmtOrExpr::Expr(Box::new(body))),
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    })
}

/// `{ a: true, b: true }` for a modifier set.
pub fn modifiers_object(modifiers: &IndexSet<String>) -> Expr {
    object(
        modifiers
            .iter()
            .map(|m| {
                let key = if PLAIN_IDENT_REGEX.is_match(m) {
                    ident_key(m)
                } else {
                    str_key(m)
                };
                key_value(key, bool_lit(true))
            })
            .collect(),
    )
}

/// Static name of an object key, if it has one.
pub fn prop_name_str(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(i) => Some(i.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string()),
        PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}

pub fn is_string_lit(expr: &Expr) -> bool {
    matches!(expr, Expr::Lit(Lit::Str(_)))
}

/// Value of a string literal, looking through parentheses.
pub fn as_str(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => Some(s.value.to_string()),
        Expr::Paren(p) => as_str(&p.expr),
        _ => None,
    }
}

/// Values whose identity never changes between renders: literals, the
/// `undefined` identifier, interpolation-free templates, and arrays/objects
/// built only from those.
pub fn is_constant(expr: &Expr) -> bool {
    match expr {
        Expr::Ident(i) => &*i.sym == "undefined",
        Expr::Lit(_) => true,
        Expr::Tpl(t) => t.exprs.is_empty(),
        Expr::Paren(p) => is_constant(&p.expr),
        Expr::Array(a) => a.elems.iter().all(|el| match el {
            Some(ExprOrSpread { spread: None, expr }) => is_constant(expr),
            _ => false,
        }),
        Expr::Object(o) => o.props.iter().all(|p| match p {
            PropOrSpread::Prop(prop) => match &**prop {
                Prop::KeyValue(kv) => {
                    !matches!(kv.key, PropName::Computed(_)) && is_constant(&kv.value)
                }
                _ => false,
            },
            PropOrSpread::Spread(_) => false,
        }),
        _ => false,
    }
}
