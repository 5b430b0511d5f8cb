use apiview_fmt::Output;
use jsondoc::{GenericParamDef, GenericParamDefKind, Generics, Term, WherePredicate};
use tracing::warn;

use super::{RenderingContext, UNKNOWN, should_elide, write_separated};

/// Whether a parameter shows up in rendered output. Synthesized lifetimes and
/// the type parameters rustdoc invents for argument-position `impl Trait` do not.
fn is_rendered(param: &GenericParamDef) -> bool {
    match &param.kind {
        GenericParamDefKind::Lifetime { .. } => !should_elide(&param.name),
        GenericParamDefKind::Type { is_synthetic, .. } => !is_synthetic,
        GenericParamDefKind::Const { .. } => true,
    }
}

fn is_rendered_predicate(predicate: &WherePredicate) -> bool {
    !matches!(
        predicate,
        WherePredicate::LifetimePredicate { lifetime, .. } if should_elide(lifetime)
    )
}

impl RenderingContext<'_> {
    /// Parameters and where clause, e.g. `<T: Display> where T: Clone`.
    pub fn render_generics(&self, generics: &Generics) -> Output {
        let mut out = Output::new();
        self.write_generic_params(&mut out, &generics.params, 0);
        self.write_where_clause(&mut out, &generics.where_predicates, 0);
        out
    }

    /// `<'a, T: Bound, const N: usize>`, or nothing if no parameter is rendered.
    pub(crate) fn write_generic_params(
        &self,
        out: &mut Output,
        params: &[GenericParamDef],
        depth: usize,
    ) {
        let rendered: Vec<_> = params.iter().filter(|p| is_rendered(p)).collect();
        if rendered.is_empty() {
            return;
        }
        out.punct("<");
        write_separated(out, rendered, Output::comma, |out, param| {
            self.write_generic_param(out, param, depth)
        });
        out.punct(">");
    }

    /// Higher-ranked binder `for<'a> `, or nothing if no parameter is rendered.
    pub(crate) fn write_binder(&self, out: &mut Output, params: &[GenericParamDef], depth: usize) {
        if params.iter().any(is_rendered) {
            out.keyword("for");
            self.write_generic_params(out, params, depth);
            out.space();
        }
    }

    fn write_generic_param(&self, out: &mut Output, param: &GenericParamDef, depth: usize) {
        match &param.kind {
            GenericParamDefKind::Lifetime { outlives } => {
                out.text(&param.name);
                if !outlives.is_empty() {
                    out.colon();
                    write_separated(out, outlives, Output::plus, |out, lifetime| {
                        out.text(lifetime);
                    });
                }
            }
            GenericParamDefKind::Type {
                bounds, default, ..
            } => {
                out.type_name(&param.name);
                if !bounds.is_empty() {
                    out.colon();
                    self.write_bounds(out, bounds, depth);
                }
                if let Some(default) = default {
                    out.equals();
                    self.write_type(out, default, depth);
                }
            }
            GenericParamDefKind::Const { type_, default } => {
                out.keyword("const").space().text(&param.name).colon();
                self.write_type(out, type_, depth);
                if let Some(default) = default {
                    out.equals().text(default);
                }
            }
        }
    }

    /// ` where A: B, 'a: 'b`, or nothing if no predicate is rendered.
    pub(crate) fn write_where_clause(
        &self,
        out: &mut Output,
        predicates: &[WherePredicate],
        depth: usize,
    ) {
        let rendered: Vec<_> = predicates
            .iter()
            .filter(|p| is_rendered_predicate(p))
            .collect();
        if rendered.is_empty() {
            return;
        }
        out.space().keyword("where").space();
        write_separated(out, rendered, Output::comma, |out, predicate| {
            self.write_where_predicate(out, predicate, depth)
        });
    }

    fn write_where_predicate(&self, out: &mut Output, predicate: &WherePredicate, depth: usize) {
        match predicate {
            WherePredicate::BoundPredicate {
                type_,
                bounds,
                generic_params,
            } => {
                self.write_binder(out, generic_params, depth);
                self.write_type(out, type_, depth);
                out.colon();
                self.write_bounds(out, bounds, depth);
            }
            WherePredicate::LifetimePredicate { lifetime, outlives } => {
                out.text(lifetime).colon();
                write_separated(out, outlives, Output::plus, |out, lifetime| {
                    out.text(lifetime);
                });
            }
            WherePredicate::EqPredicate { lhs, rhs } => {
                self.write_type(out, lhs, depth);
                out.equals();
                match rhs {
                    Term::Type(ty) => self.write_type(out, ty, depth),
                    Term::Constant(_) => {
                        out.text(UNKNOWN);
                    }
                }
            }
            WherePredicate::Unsupported(shape) => {
                warn!(%shape, "unsupported where predicate shape");
                out.text(UNKNOWN);
            }
        }
    }
}
