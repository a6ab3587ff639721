//! Per-file cache of runtime references and the imports that back them.

use std::collections::HashSet;

use indexmap::IndexMap;
use swc_core::{
    common::{SyntaxContext, DUMMY_SP},
    ecma::{ast::*, atoms::Atom},
};

use crate::ast;
use crate::options::Options;
use crate::scope::Bindings;

pub const CREATE_VNODE: &str = "createVNode";
pub const WITH_DIRECTIVES: &str = "withDirectives";
pub const MERGE_PROPS: &str = "mergeProps";
pub const RESOLVE_COMPONENT: &str = "resolveComponent";
pub const RESOLVE_DIRECTIVE: &str = "resolveDirective";
pub const FRAGMENT: &str = "Fragment";
pub const IS_VNODE: &str = "isVNode";
pub const V_SHOW: &str = "vShow";
pub const V_MODEL_TEXT: &str = "vModelText";
pub const V_MODEL_CHECKBOX: &str = "vModelCheckbox";
pub const V_MODEL_RADIO: &str = "vModelRadio";
pub const V_MODEL_SELECT: &str = "vModelSelect";
pub const V_MODEL_DYNAMIC: &str = "vModelDynamic";
pub const TRANSFORM_ON: &str = "transformOn";

const IS_SLOT: &str = "_isSlot";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Imported {
    Named(&'static str),
    Default,
}

/// Runtime symbols referenced by one file.
///
/// The first request for a symbol creates its local identifier; later
/// requests reuse it. [`RuntimeHelpers::inject_module`] then emits one import
/// per source module, in first-use order.
pub struct RuntimeHelpers {
    runtime_module: String,
    transform_on_module: String,
    pragma: Option<Ident>,
    imports: IndexMap<(String, Imported), Ident>,
    is_slot: Option<Ident>,
    taken: HashSet<Atom>,
}

impl RuntimeHelpers {
    pub fn new(options: &Options) -> Self {
        Self {
            runtime_module: options.runtime_module.clone(),
            transform_on_module: options.transform_on_module.clone(),
            pragma: options.pragma.as_deref().map(local_ident),
            imports: IndexMap::new(),
            is_slot: None,
            taken: HashSet::new(),
        }
    }

    /// Keeps generated locals clear of every name the file declares.
    pub fn avoiding(mut self, bindings: &Bindings) -> Self {
        self.taken.extend(bindings.names().iter().cloned());
        self
    }

    /// Local reference to a named export of the runtime module.
    pub fn get(&mut self, symbol: &'static str) -> Ident {
        let key = (self.runtime_module.clone(), Imported::Named(symbol));
        self.local_for(key, symbol)
    }

    pub fn get_expr(&mut self, symbol: &'static str) -> Expr {
        Expr::Ident(self.get(symbol))
    }

    /// The virtual-node factory, honouring `pragma`.
    pub fn create_vnode(&mut self) -> Ident {
        match &self.pragma {
            Some(pragma) => pragma.clone(),
            None => self.get(CREATE_VNODE),
        }
    }

    pub fn transform_on(&mut self) -> Ident {
        let key = (self.transform_on_module.clone(), Imported::Default);
        self.local_for(key, TRANSFORM_ON)
    }

    fn local_for(&mut self, key: (String, Imported), symbol: &str) -> Ident {
        if let Some(local) = self.imports.get(&key) {
            return local.clone();
        }
        let local = self.fresh(&format!("_{symbol}"));
        self.imports.insert(key, local.clone());
        local
    }

    // `_name`, then `_name2`, `_name3`, ... until nothing in the file uses it.
    fn fresh(&mut self, base: &str) -> Ident {
        let mut candidate = Atom::from(base);
        let mut n = 2;
        while self.taken.contains(&candidate) {
            candidate = Atom::from(format!("{base}{n}"));
            n += 1;
        }
        self.taken.insert(candidate.clone());
        Ident::new(candidate, DUMMY_SP, SyntaxContext::empty())
    }

    /// `_isSlot`, a file-local helper that tells slot objects from vnodes.
    pub fn is_slot(&mut self) -> Ident {
        if let Some(ident) = &self.is_slot {
            return ident.clone();
        }
        self.get(IS_VNODE);
        let ident = self.fresh(IS_SLOT);
        self.is_slot = Some(ident.clone());
        ident
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.is_slot.is_none()
    }

    fn grouped(&self) -> IndexMap<&str, Vec<(&Imported, &Ident)>> {
        let mut by_source: IndexMap<&str, Vec<(&Imported, &Ident)>> = IndexMap::new();
        for ((source, imported), local) in &self.imports {
            by_source
                .entry(source.as_str())
                .or_default()
                .push((imported, local));
        }
        by_source
    }

    /// Prepends the imports (and the `_isSlot` helper) to a module.
    pub fn inject_module(&self, m: &mut Module) {
        if let Some(helper) = self.is_slot_decl() {
            m.body.insert(0, ModuleItem::Stmt(helper));
        }
        for (source, specifiers) in self.grouped().into_iter().rev() {
            let import_decl = ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
                span: DUMMY_SP,
                specifiers: specifiers
                    .into_iter()
                    .map(|(imported, local)| match imported {
                        Imported::Named(name) => ImportSpecifier::Named(ImportNamedSpecifier {
                            span: DUMMY_SP,
                            local: local.clone(),
                            imported: Some(ModuleExportName::Ident(local_ident(name))),
                            is_type_only: false,
                        }),
                        Imported::Default => ImportSpecifier::Default(ImportDefaultSpecifier {
                            span: DUMMY_SP,
                            local: local.clone(),
                        }),
                    })
                    .collect(),
                src: Box::new(Str {
                    span: DUMMY_SP,
                    value: source.into(),
                    raw: None,
                }),
                type_only: false,
                with: None,
                phase: ImportPhase::Evaluation,
            }));
            m.body.insert(0, import_decl);
        }
    }

    /// Scripts cannot import; bind the helpers from `require` instead.
    pub fn inject_script(&self, s: &mut Script) {
        if let Some(helper) = self.is_slot_decl() {
            s.body.insert(0, helper);
        }
        for (source, specifiers) in self.grouped().into_iter().rev() {
            let required = ast::call(local_ident("require"), vec![ast::str_lit(source)]);
            let mut decls = vec![];
            let mut props = vec![];
            for (imported, local) in specifiers {
                match imported {
                    Imported::Named(name) => props.push(ObjectPatProp::KeyValue(KeyValuePatProp {
                        key: PropName::Ident(IdentName::new((*name).into(), DUMMY_SP)),
                        value: Box::new(Pat::Ident(BindingIdent::from(local.clone()))),
                    })),
                    Imported::Default => decls.push(VarDeclarator {
                        span: DUMMY_SP,
                        name: Pat::Ident(BindingIdent::from(local.clone())),
                        init: Some(Box::new(ast::member(required.clone(), "default"))),
                        definite: false,
                    }),
                }
            }
            if !props.is_empty() {
                decls.insert(
                    0,
                    VarDeclarator {
                        span: DUMMY_SP,
                        name: Pat::Object(ObjectPat {
                            span: DUMMY_SP,
                            props,
                            optional: false,
                            type_ann: None,
                        }),
                        init: Some(Box::new(required)),
                        definite: false,
                    },
                );
            }
            s.body.insert(
                0,
                Stmt::Decl(Decl::Var(Box::new(VarDecl {
                    span: DUMMY_SP,
                    ctxt: SyntaxContext::empty(),
                    kind: VarDeclKind::Const,
                    declare: false,
                    decls,
                }))),
            );
        }
    }

    // function _isSlot(s) {
    //   return typeof s === "function" ||
    //     (Object.prototype.toString.call(s) === "[object Object]" && !_isVNode(s));
    // }
    fn is_slot_decl(&self) -> Option<Stmt> {
        let name = self.is_slot.clone()?;
        let is_vnode = self
            .imports
            .get(&(self.runtime_module.clone(), Imported::Named(IS_VNODE)))?
            .clone();
        let s = || Expr::Ident(local_ident("s"));

        let is_function = ast::bin(
            BinaryOp::EqEqEq,
            Expr::Unary(UnaryExpr {
                span: DUMMY_SP,
                op: UnaryOp::TypeOf,
                arg: Box::new(s()),
            }),
            ast::str_lit("function"),
        );
        let to_string = ast::member(
            ast::member(
                ast::member(Expr::Ident(local_ident("Object")), "prototype"),
                "toString",
            ),
            "call",
        );
        let is_plain_object = ast::bin(
            BinaryOp::EqEqEq,
            ast::call_expr(to_string, vec![s()]),
            ast::str_lit("[object Object]"),
        );
        let not_vnode = Expr::Unary(UnaryExpr {
            span: DUMMY_SP,
            op: UnaryOp::Bang,
            arg: Box::new(ast::call(is_vnode, vec![s()])),
        });
        let body = ast::bin(
            BinaryOp::LogicalOr,
            is_function,
            Expr::Paren(ParenExpr {
                span: DUMMY_SP,
                expr: Box::new(ast::bin(BinaryOp::LogicalAnd, is_plain_object, not_vnode)),
            }),
        );

        Some(Stmt::Decl(Decl::Fn(FnDecl {
            ident: name,
            declare: false,
            function: Box::new(Function {
                params: vec![Param {
                    span: DUMMY_SP,
                    decorators: vec![],
                    pat: Pat::Ident(BindingIdent::from(local_ident("s"))),
                }],
                decorators: vec![],
                span: DUMMY_SP,
                ctxt: SyntaxContext::empty(),
                body: Some(BlockStmt {
                    span: DUMMY_SP,
                    ctxt: SyntaxContext::empty(),
                    stmts: vec![Stmt::Return(ReturnStmt {
                        span: DUMMY_SP,
                        arg: Some(Box::new(body)),
                    })],
                }),
                is_generator: false,
                is_async: false,
                type_params: None,
                return_type: None,
            }),
        })))
    }
}

fn local_ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty())
}
