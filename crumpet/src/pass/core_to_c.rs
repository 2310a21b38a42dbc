//! Compiles the core language to a standalone C translation unit.
//!
//! Every function term is lowered to a *closure record*: a heap-allocated
//! struct pairing a function pointer with an array of captured records.
//! All generated functions share one calling convention,
//!
//! ```c
//! function* name(function* f, function** c);
//! ```
//!
//! where `f` is the argument and `c` is the callee's own capture array.
//! Use sites allocate the record, point it at the generated function, and
//! populate one capture slot per level in the term's capture set (in
//! ascending level order, matching [`Captures::slot`]).
//!
//! Each scope frees the records it allocates, except the record it
//! returns, whose lifetime extends into the caller. Records that escape
//! their allocating scope as application results are not reclaimed; this
//! is a demonstration compiler, not a memory manager.
//!
//! [`Captures::slot`]: crate::lang::core::Captures::slot

use pretty::{DocAllocator, DocBuilder};
use thiserror::Error;

use crate::lang::core::{Captures, LocalLevel, LocalSize, Term};

/// Errors produced when lowering a term to C.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum EmitError {
    /// The term contains an error sentinel from an earlier failed pass.
    #[error("cannot compile a term containing errors")]
    ErrorTerm,
    /// A local variable does not resolve to an enclosing binder.
    #[error("unresolved local variable")]
    UnresolvedLocal,
}

/// The generated function whose body is currently being emitted.
struct Frame<'a> {
    /// Level of the argument bound by the enclosing function term, if any.
    binder: Option<LocalLevel>,
    /// Capture set of the enclosing function term.
    captures: &'a Captures,
    /// Number of binders in scope.
    size: LocalSize,
}

impl<'a> Frame<'a> {
    /// The C expression that loads the variable at the given level inside
    /// this frame: the argument `f`, or a slot of the capture array `c`.
    fn load(&self, level: LocalLevel) -> Result<String, EmitError> {
        if self.binder == Some(level) {
            Ok("f".to_owned())
        } else {
            let slot = self.captures.slot(level).ok_or(EmitError::UnresolvedLocal)?;
            Ok(format!("c[{}]", slot))
        }
    }
}

/// Emitted fragments for one term.
struct Emitted<'a, D>
where
    D: DocAllocator<'a>,
{
    /// Statements binding the term's record to its path name, one line
    /// each, newline-terminated.
    statements: DocBuilder<'a, D>,
    /// Prototypes for every function generated under this term.
    prototypes: DocBuilder<'a, D>,
    /// Definitions for every function generated under this term.
    definitions: DocBuilder<'a, D>,
    /// Names of the records this scope allocated.
    allocated: Vec<String>,
}

/// Compile a closed core term to a complete C program.
pub fn from_term<'a, D>(alloc: &'a D, term: &'a Term) -> Result<DocBuilder<'a, D>, EmitError>
where
    D: DocAllocator<'a>,
    D::Doc: Clone,
{
    let captures = Captures::new();
    let frame = Frame {
        binder: None,
        captures: &captures,
        size: LocalSize::from(0),
    };
    let root = emit_term(alloc, &frame, term, "f")?;

    let header = (alloc.nil())
        .append(line(alloc, "#include <stdlib.h>"))
        .append(alloc.hardline())
        .append(line(alloc, "typedef struct function {"))
        .append(line(
            alloc,
            "    struct function* (*ptr)(struct function*, struct function**);",
        ))
        .append(line(alloc, "    struct function** closedValues;"))
        .append(line(alloc, "} function;"))
        .append(alloc.hardline())
        .append(line(alloc, "static void del(function* f) {"))
        .append(line(alloc, "    free(f->closedValues);"))
        .append(line(alloc, "    free(f);"))
        .append(line(alloc, "}"))
        .append(alloc.hardline());

    let main = (alloc.nil())
        .append(line(alloc, "int main() {"))
        .append(root.statements)
        .append(deletes(alloc, &root.allocated, None))
        .append(line(alloc, "    return 0;"))
        .append(line(alloc, "}"));

    Ok(header
        .append(root.prototypes)
        .append(alloc.hardline())
        .append(root.definitions)
        .append(main))
}

fn emit_term<'a, D>(
    alloc: &'a D,
    frame: &Frame<'_>,
    term: &'a Term,
    path: &str,
) -> Result<Emitted<'a, D>, EmitError>
where
    D: DocAllocator<'a>,
    D::Doc: Clone,
{
    match term {
        Term::Local(index) => {
            let level = frame.size.level(*index).ok_or(EmitError::UnresolvedLocal)?;
            let statements = line(
                alloc,
                format!("    function* {} = {};", path, frame.load(level)?),
            );

            Ok(Emitted {
                statements,
                prototypes: alloc.nil(),
                definitions: alloc.nil(),
                allocated: Vec::new(),
            })
        }
        Term::FunctionTerm(_, body, captures) => {
            let fn_name = format!("{}_f", path);
            let ret_name = format!("{}_ret", fn_name);

            // generate the definition of the function term
            let body_frame = Frame {
                binder: Some(frame.size.next_level()),
                captures,
                size: frame.size.increment(),
            };
            let body = emit_term(alloc, &body_frame, body, &ret_name)?;

            let definition = (alloc.nil())
                .append(line(
                    alloc,
                    format!("function* {}(function* f, function** c) {{", fn_name),
                ))
                .append(body.statements)
                .append(deletes(alloc, &body.allocated, Some(&ret_name)))
                .append(line(alloc, format!("    return {};", ret_name)))
                .append(line(alloc, "}"))
                .append(alloc.hardline());

            // capture the values the function term closed over
            let mut statements = (alloc.nil())
                .append(line(
                    alloc,
                    format!("    function* {} = (function*)malloc(sizeof(function));", path),
                ))
                .append(line(alloc, format!("    {}->ptr = &{};", path, fn_name)))
                .append(line(
                    alloc,
                    format!(
                        "    {}->closedValues = (function**)malloc(sizeof(function*) * {});",
                        path,
                        captures.len(),
                    ),
                ));
            for (slot, level) in captures.iter().enumerate() {
                statements = statements.append(line(
                    alloc,
                    format!(
                        "    {}->closedValues[{}] = {};",
                        path,
                        slot,
                        frame.load(level)?,
                    ),
                ));
            }

            Ok(Emitted {
                statements,
                prototypes: (body.prototypes).append(line(
                    alloc,
                    format!("function* {}(function*, function**);", fn_name),
                )),
                definitions: body.definitions.append(definition),
                allocated: vec![path.to_owned()],
            })
        }
        Term::FunctionElim(head, argument) => {
            let argument_name = format!("{}_r", path);
            let head_name = format!("{}_l", path);

            let argument = emit_term(alloc, frame, argument, &argument_name)?;
            let head = emit_term(alloc, frame, head, &head_name)?;

            let call = line(
                alloc,
                format!(
                    "    function* {} = {}->ptr({}, {}->closedValues);",
                    path, head_name, argument_name, head_name,
                ),
            );

            let mut allocated = argument.allocated;
            allocated.extend(head.allocated);

            Ok(Emitted {
                statements: (argument.statements).append(head.statements).append(call),
                prototypes: argument.prototypes.append(head.prototypes),
                definitions: argument.definitions.append(head.definitions),
                allocated,
            })
        }
        Term::Error => Err(EmitError::ErrorTerm),
    }
}

/// `del` statements for the records a scope allocated, keeping the record
/// it returns alive.
fn deletes<'a, D>(alloc: &'a D, allocated: &[String], returned: Option<&str>) -> DocBuilder<'a, D>
where
    D: DocAllocator<'a>,
    D::Doc: Clone,
{
    allocated
        .iter()
        .filter(|name| returned != Some(name.as_str()))
        .fold(alloc.nil(), |doc, name| {
            doc.append(line(alloc, format!("    del({});", name)))
        })
}

/// A single newline-terminated line of C.
fn line<'a, D>(alloc: &'a D, text: impl Into<String>) -> DocBuilder<'a, D>
where
    D: DocAllocator<'a>,
    D::Doc: Clone,
{
    alloc.text(text.into()).append(alloc.hardline())
}
