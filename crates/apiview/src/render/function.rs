use apiview_fmt::Output;
use jsondoc::{Function, FunctionHeader, FunctionPointer, FunctionSignature, Type};

use super::types::write_reference_prefix;
use super::{RenderingContext, write_separated};

impl RenderingContext<'_> {
    /// `for<'a> unsafe extern "C" fn(&'a u8, ...) -> i32`
    pub(crate) fn write_function_pointer(
        &self,
        out: &mut Output,
        ptr: &FunctionPointer,
        depth: usize,
    ) {
        self.write_binder(out, &ptr.generic_params, depth);
        let header = &ptr.header;
        if header.is_unsafe {
            out.keyword("unsafe").space();
        }
        write_abi(out, header);
        if header.is_const {
            out.keyword("const").space();
        }
        if header.is_async {
            out.keyword("async").space();
        }
        out.keyword("fn");
        self.write_fn_params(out, &ptr.sig, false, depth);
        self.write_fn_output(out, &ptr.sig, depth);
    }

    /// A function item or method without its visibility, e.g.
    /// `const unsafe fn get<T>(&self, index: usize) -> Option<&T> where T: Copy`.
    pub(crate) fn write_function(&self, out: &mut Output, name: &str, function: &Function) {
        let header = &function.header;
        if header.is_const {
            out.keyword("const").space();
        }
        if header.is_async {
            out.keyword("async").space();
        }
        if header.is_unsafe {
            out.keyword("unsafe").space();
        }
        write_abi(out, header);
        out.keyword("fn").space().text(name);
        self.write_generic_params(out, &function.generics.params, 0);
        self.write_fn_params(out, &function.sig, true, 0);
        self.write_fn_output(out, &function.sig, 0);
        self.write_where_clause(out, &function.generics.where_predicates, 0);
    }

    fn write_fn_params(
        &self,
        out: &mut Output,
        sig: &FunctionSignature,
        is_item: bool,
        depth: usize,
    ) {
        out.punct("(");
        write_separated(out, &sig.inputs, Output::comma, |out, (name, ty)| {
            if is_item && write_simplified_self(out, name, ty) {
                return;
            }
            // `_` names are kept on items only.
            let named = !name.is_empty() && (is_item || name != "_");
            if named {
                out.text(name).colon();
            }
            self.write_type(out, ty, depth);
        });
        if sig.is_c_variadic {
            if !sig.inputs.is_empty() {
                out.comma();
            }
            out.text("...");
        }
        out.punct(")");
    }

    fn write_fn_output(&self, out: &mut Output, sig: &FunctionSignature, depth: usize) {
        if let Some(output) = &sig.output {
            out.arrow();
            self.write_type(out, output, depth);
        }
    }
}

/// `extern "ABI" ` for every ABI but Rust's.
fn write_abi(out: &mut Output, header: &FunctionHeader) {
    if let Some(abi) = header.abi.name() {
        out.keyword("extern").space().text(format!("\"{abi}\"")).space();
    }
}

/// Writes `self`, `&self`, `&mut 'a self` in place of `self: Self` and friends.
fn write_simplified_self(out: &mut Output, name: &str, ty: &Type) -> bool {
    if name != "self" {
        return false;
    }
    match ty {
        Type::Generic(name) if name == "Self" => {
            out.keyword("self");
            true
        }
        Type::BorrowedRef {
            lifetime,
            is_mutable,
            type_,
        } if matches!(type_.as_ref(), Type::Generic(name) if name == "Self") => {
            write_reference_prefix(out, lifetime.as_deref(), *is_mutable);
            out.keyword("self");
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use jsondoc::{Abi, Generics};

    use super::*;
    use crate::testutils::*;

    fn pointer(inputs: Vec<(&str, Type)>, output: Option<Type>) -> FunctionPointer {
        FunctionPointer {
            sig: FunctionSignature {
                inputs: inputs
                    .into_iter()
                    .map(|(name, ty)| (name.to_string(), ty))
                    .collect(),
                output,
                is_c_variadic: false,
            },
            generic_params: vec![],
            header: FunctionHeader::default(),
        }
    }

    fn pointer_text(ptr: &FunctionPointer) -> String {
        let doc = empty_doc();
        with_context(&doc, |ctx| {
            let mut out = Output::new();
            ctx.write_function_pointer(&mut out, ptr, 0);
            apiview_fmt::tokens_to_string(out.tokens())
        })
    }

    fn function_text(name: &str, function: &Function) -> String {
        let doc = empty_doc();
        with_context(&doc, |ctx| {
            let mut out = Output::new();
            ctx.write_function(&mut out, name, function);
            apiview_fmt::tokens_to_string(out.tokens())
        })
    }

    #[test]
    fn pointer_with_named_and_unnamed_params() {
        let ptr = pointer(
            vec![("count", primitive("usize")), ("", primitive("u8"))],
            Some(primitive("bool")),
        );
        assert_eq!(pointer_text(&ptr), "fn(count: usize, u8) -> bool");
    }

    #[test]
    fn pointer_qualifier_order() {
        let mut ptr = pointer(vec![("_", primitive("i32"))], Some(primitive("i32")));
        ptr.header = FunctionHeader {
            is_const: false,
            is_unsafe: true,
            is_async: false,
            abi: Abi::C { unwind: false },
        };
        ptr.sig.is_c_variadic = true;
        ptr.generic_params = vec![lifetime_param("'a")];
        assert_eq!(
            pointer_text(&ptr),
            "for<'a> unsafe extern \"C\" fn(i32, ...) -> i32"
        );
    }

    #[test]
    fn variadic_without_prior_params_has_no_comma() {
        let mut ptr = pointer(vec![], None);
        ptr.sig.is_c_variadic = true;
        assert_eq!(pointer_text(&ptr), "fn(...)");
    }

    #[test]
    fn self_receivers_are_simplified() {
        let receiver = |lifetime: Option<&str>, is_mutable| {
            let ty = Type::BorrowedRef {
                lifetime: lifetime.map(str::to_string),
                is_mutable,
                type_: Box::new(generic("Self")),
            };
            let mut out = Output::new();
            assert!(write_simplified_self(&mut out, "self", &ty));
            apiview_fmt::tokens_to_string(out.tokens())
        };
        assert_eq!(receiver(None, false), "&self");
        assert_eq!(receiver(Some("'_"), true), "&mut self");
        assert_eq!(receiver(Some("'a"), true), "&mut 'a self");

        let mut out = Output::new();
        assert!(!write_simplified_self(&mut out, "other", &generic("Self")));
        assert!(out.is_empty());
    }

    #[test]
    fn binder_with_only_elided_lifetimes_is_skipped() {
        let mut ptr = pointer(vec![], None);
        ptr.generic_params = vec![lifetime_param("'_")];
        assert_eq!(pointer_text(&ptr), "fn()");
    }

    #[test]
    fn method_with_self_generics_and_where_clause() {
        let function = Function {
            sig: FunctionSignature {
                inputs: vec![
                    (
                        "self".into(),
                        Type::BorrowedRef {
                            lifetime: None,
                            is_mutable: true,
                            type_: Box::new(generic("Self")),
                        },
                    ),
                    ("value".into(), generic("T")),
                ],
                output: Some(resolved("Option", 3)),
                is_c_variadic: false,
            },
            generics: Generics {
                params: vec![
                    lifetime_param("'life0"),
                    type_param("T", vec![]),
                ],
                where_predicates: vec![jsondoc::WherePredicate::BoundPredicate {
                    type_: generic("T"),
                    bounds: vec![trait_bound("Clone", 4)],
                    generic_params: vec![],
                }],
            },
            header: FunctionHeader {
                is_const: false,
                is_unsafe: true,
                is_async: true,
                abi: Abi::Rust,
            },
            has_body: true,
        };
        assert_eq!(
            function_text("push", &function),
            "async unsafe fn push<T>(&mut self, value: T) -> Option where T: Clone"
        );
    }

    #[test]
    fn self_by_value() {
        let function = Function {
            sig: FunctionSignature {
                inputs: vec![("self".into(), generic("Self"))],
                output: None,
                is_c_variadic: false,
            },
            generics: Generics::default(),
            header: FunctionHeader::default(),
            has_body: true,
        };
        assert_eq!(function_text("into_inner", &function), "fn into_inner(self)");
    }
}
