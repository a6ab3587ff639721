//! SWC plugin that compiles JSX into Vue 3 `createVNode` calls, with the
//! patch flags and dynamic prop lists the runtime uses for targeted updates.

mod ast;
pub mod directive;
pub mod element;
pub mod error;
pub mod flags;
pub mod merge;
pub mod model;
pub mod options;
pub mod props;
pub mod runtime;
pub mod scope;
pub mod tag;
pub mod tags;
pub mod text;
pub mod visitor;

use swc_core::{
    common::{comments::Comments, errors::HANDLER},
    ecma::{ast::Program, visit::VisitMutWith},
    plugin::{plugin_transform, proxies::TransformPluginProgramMetadata},
};
use tracing::{debug, error, warn};

pub use error::{ConfigError, ErrorKind, TransformError};
pub use flags::PatchFlags;
pub use options::{CustomElementFilter, Options};
pub use text::flatten_text;

use scope::Bindings;
use visitor::JsxTransform;

/// Compiles every JSX element and fragment of `program`.
///
/// `comments` receives the `/* PROPS */`-style annotations in front of each
/// patch flag; pass `None` to skip them.
///
/// Tag identifiers are matched against declarations by `Id`, so the program
/// must already have been through `resolver`. SWC does that before running
/// plugins; native callers run it themselves.
pub fn transform_program(
    mut program: Program,
    options: &Options,
    comments: Option<&dyn Comments>,
) -> Result<Program, TransformError> {
    compile_program(&mut program, options, comments)?;
    Ok(program)
}

/// In-place form of [`transform_program`]. Returns the number of JSX roots
/// rewritten.
///
/// On error the program is left partially rewritten.
pub fn compile_program(
    program: &mut Program,
    options: &Options,
    comments: Option<&dyn Comments>,
) -> Result<usize, TransformError> {
    let bindings = Bindings::collect(program);
    let mut transform = JsxTransform::new(options, bindings, comments);
    program.visit_mut_with(&mut transform);
    let compiled = transform.finish()?;
    debug!(compiled, "compiled JSX roots");
    Ok(compiled)
}

// -----------------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------------

#[plugin_transform]
pub fn process_transform(program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let options = metadata
        .get_transform_plugin_config()
        .map(|config| {
            Options::from_json(&config).unwrap_or_else(|err| {
                warn!(%err, "ignoring plugin configuration");
                Options::default()
            })
        })
        .unwrap_or_default();

    let comments = metadata.comments.as_ref().map(|c| c as &dyn Comments);

    // An emitted error fails the host's compilation, so the partially
    // rewritten program is never printed.
    let mut program = program;
    if let Err(err) = compile_program(&mut program, &options, comments) {
        error!(location = %err.describe(&metadata.source_map), kind = ?err.kind(), "JSX transform aborted");
        HANDLER.with(|handler| handler.struct_span_err(err.span(), &err.to_string()).emit());
    }
    program
}
