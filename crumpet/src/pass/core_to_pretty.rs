//! Pretty prints the core language to a textual form.
//!
//! Function terms are printed with their capture sets, e.g.
//! `fun y [0] => x` for a function that closes over the binder at level 0.

use pretty::{DocAllocator, DocBuilder};

use crate::lang::core::{Locals, Term};

/// The precedence of a term.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Prec {
    Term = 0,
    Expr,
    App,
    Atomic,
}

pub fn from_term<'a, D>(alloc: &'a D, term: &'a Term) -> DocBuilder<'a, D>
where
    D: DocAllocator<'a>,
    D::Doc: Clone,
{
    from_term_prec(alloc, &mut Locals::new(), term, Prec::Term)
}

pub fn from_term_prec<'a, D>(
    alloc: &'a D,
    names: &mut Locals<String>,
    term: &'a Term,
    prec: Prec,
) -> DocBuilder<'a, D>
where
    D: DocAllocator<'a>,
    D::Doc: Clone,
{
    match term {
        Term::Local(index) => match names.get(*index) {
            Some(name) => alloc.text(name.clone()),
            None => (alloc.nil())
                .append("local")
                .append(alloc.space())
                .append(alloc.as_string(index)),
        },
        Term::FunctionTerm(input, body, captures) => {
            names.push(input.clone());
            let body = from_term_prec(alloc, names, body, Prec::Expr).nest(4);
            names.pop();

            let captures = match captures.is_empty() {
                true => alloc.nil(),
                false => (alloc.space()).append("[").append(
                    alloc
                        .intersperse(
                            captures.iter().map(|level| alloc.as_string(level)),
                            alloc.text(",").append(alloc.space()),
                        )
                        .append("]"),
                ),
            };

            paren(
                alloc,
                prec > Prec::Expr,
                (alloc.nil())
                    .append("fun")
                    .append(alloc.space())
                    .append(alloc.text(input.clone()))
                    .append(captures)
                    .append(alloc.space())
                    .append("=>")
                    .group()
                    .append(alloc.space())
                    .append(body),
            )
        }
        Term::FunctionElim(head, argument) => {
            let head = from_term_prec(alloc, names, head, Prec::App);
            let argument = from_term_prec(alloc, names, argument, Prec::Atomic);

            paren(
                alloc,
                prec > Prec::App,
                head.append((alloc.space()).append(argument).group().nest(4)),
            )
        }
        Term::Error => alloc.text("!"),
    }
}

fn paren<'a, D>(alloc: &'a D, b: bool, doc: DocBuilder<'a, D>) -> DocBuilder<'a, D>
where
    D: DocAllocator<'a>,
    D::Doc: Clone,
{
    if b {
        alloc.text("(").append(doc).append(")")
    } else {
        doc
    }
}
