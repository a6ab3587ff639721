#![allow(dead_code)]

use swc_core::{
    common::{comments::Comments, sync::Lrc, FileName, Globals, Mark, SourceMap, GLOBALS},
    ecma::{
        ast::*,
        parser::{parse_file_as_module, parse_file_as_script, EsSyntax, Syntax},
        transforms::base::resolver,
        visit::VisitMutWith,
    },
};
use vue_jsx_swc_plugin::{transform_program, Options, TransformError};

fn syntax() -> Syntax {
    Syntax::Es(EsSyntax {
        jsx: true,
        ..Default::default()
    })
}

pub fn parse(src: &str, comments: Option<&dyn Comments>) -> Module {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Anon.into(), src.to_string());
    let mut module = parse_file_as_module(&fm, syntax(), EsVersion::latest(), comments, &mut vec![])
        .expect("test source should parse");
    // Scope contexts are assigned the way the SWC host does before plugins run.
    GLOBALS.set(&Globals::new(), || {
        module.visit_mut_with(&mut resolver(Mark::new(), Mark::new(), false));
    });
    module
}

pub fn parse_script(src: &str) -> Script {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Anon.into(), src.to_string());
    let mut script = parse_file_as_script(&fm, syntax(), EsVersion::latest(), None, &mut vec![])
        .expect("test source should parse");
    GLOBALS.set(&Globals::new(), || {
        script.visit_mut_with(&mut resolver(Mark::new(), Mark::new(), false));
    });
    script
}

pub fn compile_with(src: &str, options: &Options) -> Result<Module, TransformError> {
    match transform_program(Program::Module(parse(src, None)), options, None)? {
        Program::Module(m) => Ok(m),
        Program::Script(_) => unreachable!("modules stay modules"),
    }
}

pub fn compile(src: &str) -> Module {
    compile_with(src, &Options::default()).expect("transform should succeed")
}

/// Expression of the last statement.
pub fn last_expr(m: &Module) -> &Expr {
    match m.body.last() {
        Some(ModuleItem::Stmt(Stmt::Expr(stmt))) => &stmt.expr,
        other => panic!("expected a trailing expression statement, got {other:?}"),
    }
}

/// Compiles `src` and renders its trailing expression.
pub fn output(src: &str) -> String {
    render(last_expr(&compile(src)))
}

pub fn output_with(src: &str, options: &Options) -> String {
    let m = compile_with(src, options).expect("transform should succeed");
    render(last_expr(&m))
}

/// `(source, imported, local)` for every import of the module.
pub fn imports(m: &Module) -> Vec<(String, String, String)> {
    m.body
        .iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => Some(decl),
            _ => None,
        })
        .flat_map(|decl| {
            let source = decl.src.value.to_string();
            decl.specifiers.iter().map(move |s| match s {
                ImportSpecifier::Named(n) => {
                    let imported = match &n.imported {
                        Some(ModuleExportName::Ident(i)) => i.sym.to_string(),
                        _ => n.local.sym.to_string(),
                    };
                    (source.clone(), imported, n.local.sym.to_string())
                }
                ImportSpecifier::Default(d) => (source.clone(), "default".into(), d.local.sym.to_string()),
                ImportSpecifier::Namespace(ns) => (source.clone(), "*".into(), ns.local.sym.to_string()),
            })
        })
        .collect()
}

/// Compact JavaScript rendering of the expression shapes the compiler emits.
pub fn render(expr: &Expr) -> String {
    match expr {
        Expr::Ident(i) => i.sym.to_string(),
        Expr::Lit(lit) => render_lit(lit),
        Expr::Array(arr) => format!(
            "[{}]",
            arr.elems
                .iter()
                .map(|el| el.as_ref().map(render_arg).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Expr::Object(obj) => render_object(obj),
        Expr::Call(call) => {
            let callee = match &call.callee {
                Callee::Expr(callee) => render(callee),
                _ => panic!("unexpected callee"),
            };
            let args: Vec<_> = call.args.iter().map(render_arg).collect();
            format!("{callee}({})", args.join(", "))
        }
        Expr::Arrow(arrow) => {
            let params: Vec<_> = arrow.params.iter().map(render_pat).collect();
            let body = match &*arrow.body {
                BlockStmtOrExpr::Expr(body) => match &**body {
                    Expr::Object(_) => format!("({})", render(body)),
                    _ => render(body),
                },
                BlockStmtOrExpr::BlockStmt(_) => "{ ... }".to_string(),
            };
            format!("({}) => {body}", params.join(", "))
        }
        Expr::Assign(assign) => {
            let left = match &assign.left {
                AssignTarget::Simple(SimpleAssignTarget::Ident(b)) => b.id.sym.to_string(),
                AssignTarget::Simple(SimpleAssignTarget::Member(m)) => render_member(m),
                other => panic!("unexpected assign target {other:?}"),
            };
            format!("{left} = {}", render(&assign.right))
        }
        Expr::Member(m) => render_member(m),
        Expr::Cond(c) => format!(
            "{} ? {} : {}",
            render(&c.test),
            render(&c.cons),
            render(&c.alt)
        ),
        Expr::Unary(u) => match u.op {
            UnaryOp::Void => format!("void {}", render(&u.arg)),
            UnaryOp::Bang => format!("!{}", render(&u.arg)),
            UnaryOp::TypeOf => format!("typeof {}", render(&u.arg)),
            UnaryOp::Minus => format!("-{}", render(&u.arg)),
            other => panic!("unexpected unary operator {other:?}"),
        },
        Expr::Bin(b) => {
            let op = match b.op {
                BinaryOp::Add => "+",
                BinaryOp::EqEqEq => "===",
                BinaryOp::LogicalOr => "||",
                BinaryOp::LogicalAnd => "&&",
                other => panic!("unexpected binary operator {other:?}"),
            };
            format!("{} {op} {}", render(&b.left), render(&b.right))
        }
        Expr::Paren(p) => format!("({})", render(&p.expr)),
        Expr::Fn(_) => "function".to_string(),
        other => panic!("unexpected expression {other:?}"),
    }
}

fn render_lit(lit: &Lit) -> String {
    match lit {
        Lit::Str(s) => format!("\"{}\"", s.value),
        Lit::Num(n) if n.value.fract() == 0.0 => format!("{}", n.value as i64),
        Lit::Num(n) => n.value.to_string(),
        Lit::Bool(b) => b.value.to_string(),
        Lit::Null(_) => "null".to_string(),
        other => panic!("unexpected literal {other:?}"),
    }
}

fn render_arg(arg: &ExprOrSpread) -> String {
    match arg.spread {
        Some(_) => format!("...{}", render(&arg.expr)),
        None => render(&arg.expr),
    }
}

fn render_pat(pat: &Pat) -> String {
    match pat {
        Pat::Ident(b) => b.id.sym.to_string(),
        other => panic!("unexpected pattern {other:?}"),
    }
}

fn render_member(m: &MemberExpr) -> String {
    match &m.prop {
        MemberProp::Ident(prop) => format!("{}.{}", render(&m.obj), prop.sym),
        MemberProp::Computed(c) => format!("{}[{}]", render(&m.obj), render(&c.expr)),
        MemberProp::PrivateName(p) => format!("{}.#{}", render(&m.obj), p.name),
    }
}

fn render_key(key: &PropName) -> String {
    match key {
        PropName::Ident(i) => i.sym.to_string(),
        PropName::Str(s) => format!("\"{}\"", s.value),
        PropName::Num(n) => render_lit(&Lit::Num(n.clone())),
        PropName::Computed(c) => format!("[{}]", render(&c.expr)),
        PropName::BigInt(b) => b.value.to_string(),
    }
}

fn render_object(obj: &ObjectLit) -> String {
    if obj.props.is_empty() {
        return "{}".to_string();
    }
    let props: Vec<_> = obj
        .props
        .iter()
        .map(|p| match p {
            PropOrSpread::Spread(s) => format!("...{}", render(&s.expr)),
            PropOrSpread::Prop(p) => match &**p {
                Prop::KeyValue(kv) => format!("{}: {}", render_key(&kv.key), render(&kv.value)),
                Prop::Shorthand(i) => i.sym.to_string(),
                other => panic!("unexpected property {other:?}"),
            },
        })
        .collect();
    format!("{{{}}}", props.join(", "))
}
