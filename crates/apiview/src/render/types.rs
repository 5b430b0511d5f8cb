use apiview_fmt::Output;
use jsondoc::{
    AssocItemConstraint, AssocItemConstraintKind, Constant, DynTrait, GenericArg, GenericArgs,
    GenericBound, Path, PolyTrait, Term, TraitBoundModifier, Type,
};
use tracing::{debug, warn};

use super::{RenderingContext, UNKNOWN, should_elide, write_separated};

impl RenderingContext<'_> {
    pub fn render_type(&self, ty: &Type) -> Output {
        let mut out = Output::new();
        self.write_type(&mut out, ty, 0);
        out
    }

    pub(crate) fn write_type(&self, out: &mut Output, ty: &Type, depth: usize) {
        if self.depth_exceeded(out, depth) {
            return;
        }
        let depth = depth + 1;
        match ty {
            Type::Primitive(name) | Type::Generic(name) => {
                out.type_name(name);
            }
            Type::ResolvedPath(path) => self.write_path(out, path, depth),
            Type::DynTrait(dyn_trait) => self.write_dyn_trait(out, dyn_trait, depth),
            Type::FunctionPointer(ptr) => self.write_function_pointer(out, ptr, depth),
            Type::Tuple(types) => {
                out.punct("(");
                write_separated(out, types, Output::comma, |out, ty| {
                    self.write_type(out, ty, depth)
                });
                out.punct(")");
            }
            Type::Slice(ty) => {
                out.punct("[");
                self.write_type(out, ty, depth);
                out.punct("]");
            }
            Type::Array { type_, len } => {
                out.punct("[");
                self.write_type(out, type_, depth);
                out.punct(";").space().text(len).punct("]");
            }
            Type::Pat { type_, pat } => {
                self.write_type(out, type_, depth);
                out.space().comment(format!("/* {pat} */"));
            }
            Type::ImplTrait(bounds) => {
                out.keyword("impl").space();
                self.write_bounds(out, bounds, depth);
            }
            Type::Infer => {
                out.text("_");
            }
            Type::RawPointer { is_mutable, type_ } => {
                out.punct("*")
                    .keyword(if *is_mutable { "mut" } else { "const" })
                    .space();
                self.write_type(out, type_, depth);
            }
            Type::BorrowedRef {
                lifetime,
                is_mutable,
                type_,
            } => {
                write_reference_prefix(out, lifetime.as_deref(), *is_mutable);
                self.write_type(out, type_, depth);
            }
            Type::QualifiedPath {
                name,
                args,
                self_type,
                trait_,
            } => {
                self.write_type(out, self_type, depth);
                match trait_.as_ref().filter(|t| !t.path.is_empty()) {
                    Some(trait_) => {
                        out.text(" as ");
                        self.write_path(out, trait_, depth);
                        out.punct("::");
                    }
                    None => {
                        out.punct("::");
                    }
                }
                out.type_name(name);
                if let Some(args) = args {
                    self.write_generic_args(out, args, depth);
                }
            }
            Type::Unsupported(shape) => {
                warn!(%shape, "unsupported type shape");
                out.text(UNKNOWN);
            }
        }
    }

    /// The short name of the path, navigable, followed by its generic arguments.
    pub(crate) fn write_path(&self, out: &mut Output, path: &Path, depth: usize) {
        out.type_name(path.short_name()).navigate_to(path.id);
        if let Some(args) = &path.args {
            self.write_generic_args(out, args, depth);
        }
    }

    fn write_dyn_trait(&self, out: &mut Output, dyn_trait: &DynTrait, depth: usize) {
        if let Some(lifetime) = &dyn_trait.lifetime {
            debug!(%lifetime, "dyn trait lifetime bound is not rendered");
        }
        out.punct("(").keyword("dyn").space();
        write_separated(out, &dyn_trait.traits, Output::plus, |out, poly| {
            self.write_poly_trait(out, poly, depth)
        });
        out.punct(")");
    }

    fn write_poly_trait(&self, out: &mut Output, poly: &PolyTrait, depth: usize) {
        self.write_binder(out, &poly.generic_params, depth);
        self.write_path(out, &poly.trait_, depth);
    }

    pub(crate) fn write_generic_args(&self, out: &mut Output, args: &GenericArgs, depth: usize) {
        if depth > self.options.max_depth {
            out.punct("<");
            self.depth_exceeded(out, depth);
            out.punct(">");
            return;
        }
        let depth = depth + 1;
        match args {
            GenericArgs::AngleBracketed { args, constraints } => {
                enum Arg<'a> {
                    Generic(&'a GenericArg),
                    Constraint(&'a AssocItemConstraint),
                }
                if args.is_empty() && constraints.is_empty() {
                    return;
                }
                out.punct("<");
                write_separated(
                    out,
                    args.iter()
                        .map(Arg::Generic)
                        .chain(constraints.iter().map(Arg::Constraint)),
                    Output::comma,
                    |out, arg| match arg {
                        Arg::Generic(arg) => self.write_generic_arg(out, arg, depth),
                        Arg::Constraint(constraint) => {
                            self.write_constraint(out, constraint, depth)
                        }
                    },
                );
                out.punct(">");
            }
            GenericArgs::Parenthesized { inputs, output } => {
                debug!(
                    inputs = inputs.len(),
                    has_output = output.is_some(),
                    "parenthesized generic arguments are not rendered"
                );
            }
            GenericArgs::ReturnTypeNotation => {
                debug!("return type notation is not rendered");
            }
            GenericArgs::Unsupported(shape) => {
                warn!(%shape, "unsupported generic arguments shape");
                out.text(UNKNOWN);
            }
        }
    }

    fn write_generic_arg(&self, out: &mut Output, arg: &GenericArg, depth: usize) {
        match arg {
            GenericArg::Lifetime(lifetime) => {
                out.text(lifetime);
            }
            GenericArg::Type(ty) => self.write_type(out, ty, depth),
            GenericArg::Const(constant) => write_constant(out, constant),
            GenericArg::Infer => {
                out.text("_");
            }
        }
    }

    fn write_constraint(&self, out: &mut Output, constraint: &AssocItemConstraint, depth: usize) {
        out.type_name(&constraint.name);
        if let Some(args) = &constraint.args {
            self.write_generic_args(out, args, depth);
        }
        match &constraint.binding {
            AssocItemConstraintKind::Equality(term) => {
                out.equals();
                match term {
                    Term::Type(ty) => self.write_type(out, ty, depth),
                    Term::Constant(constant) => write_constant(out, constant),
                }
            }
            AssocItemConstraintKind::Constraint(bounds) => {
                out.colon();
                self.write_bounds(out, bounds, depth);
            }
        }
    }

    /// Bounds joined by `+`.
    pub(crate) fn write_bounds(&self, out: &mut Output, bounds: &[GenericBound], depth: usize) {
        write_separated(out, bounds, Output::plus, |out, bound| {
            self.write_bound(out, bound, depth)
        });
    }

    fn write_bound(&self, out: &mut Output, bound: &GenericBound, depth: usize) {
        match bound {
            GenericBound::TraitBound {
                trait_,
                generic_params,
                modifier,
            } => {
                self.write_binder(out, generic_params, depth);
                match modifier {
                    TraitBoundModifier::None => {}
                    TraitBoundModifier::Maybe => {
                        out.punct("?");
                    }
                    TraitBoundModifier::MaybeConst => {
                        out.punct("~").keyword("const").space();
                    }
                }
                self.write_path(out, trait_, depth);
            }
            GenericBound::Outlives(lifetime) => {
                out.text(lifetime);
            }
            GenericBound::Use(args) => {
                out.keyword("use").punct("<");
                write_separated(out, args, Output::comma, |out, arg| {
                    out.text(arg.name());
                });
                out.punct(">");
            }
            GenericBound::Unsupported(shape) => {
                warn!(%shape, "unsupported bound shape");
                out.text(UNKNOWN);
            }
        }
    }
}

fn write_constant(out: &mut Output, constant: &Constant) {
    match (&constant.value, constant.is_literal) {
        (Some(value), true) => out.text(value),
        _ => out.text(&constant.expr),
    };
}

/// `&`, then `mut `, then the lifetime unless it is elided.
pub(crate) fn write_reference_prefix(out: &mut Output, lifetime: Option<&str>, is_mutable: bool) {
    out.punct("&");
    if is_mutable {
        out.keyword("mut").space();
    }
    if let Some(lifetime) = lifetime.filter(|lt| !should_elide(lt)) {
        out.text(lifetime).space();
    }
}
