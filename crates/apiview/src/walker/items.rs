use apiview_fmt::{Output, ReviewLine};
use jsondoc::{
    Enum, Generics, Id, Item, ItemEnum, MacroKind, Static, Struct, StructKind, Trait, Union,
    Variant, VariantKind,
};
use tracing::warn;

use super::{ApiRenderer, block, comment_line, name};
use crate::render::{UNKNOWN, write_separated};
use crate::sort::sort_children;

impl<'c> ApiRenderer<'c> {
    /// The line, or header and body lines, of a single item.
    pub(super) fn item_lines(&mut self, item: &'c Item, line_id: String) -> Vec<ReviewLine> {
        let ctx = self.ctx;
        match &item.inner {
            ItemEnum::Struct(Struct { kind, generics, .. }) => {
                let mut out = self.header(item, "struct");
                ctx.write_generic_params(&mut out, &generics.params, 0);
                match kind {
                    StructKind::Unit => {
                        ctx.write_where_clause(&mut out, &generics.where_predicates, 0);
                        out.punct(";");
                        single(line_id, out)
                    }
                    StructKind::Tuple(fields) => {
                        self.write_tuple_fields(&mut out, fields);
                        ctx.write_where_clause(&mut out, &generics.where_predicates, 0);
                        out.punct(";");
                        single(line_id, out)
                    }
                    StructKind::Plain {
                        fields,
                        has_stripped_fields,
                    } => {
                        ctx.write_where_clause(&mut out, &generics.where_predicates, 0);
                        let children = self.field_lines(fields, *has_stripped_fields, &line_id);
                        block(line_id, out, children, None)
                    }
                }
            }
            ItemEnum::Union(Union {
                generics,
                has_stripped_fields,
                fields,
                ..
            }) => {
                let mut out = self.header(item, "union");
                self.write_generics_and_where(&mut out, generics);
                let children = self.field_lines(fields, *has_stripped_fields, &line_id);
                block(line_id, out, children, None)
            }
            ItemEnum::Enum(Enum {
                generics,
                has_stripped_variants,
                variants,
                ..
            }) => {
                let mut out = self.header(item, "enum");
                self.write_generics_and_where(&mut out, generics);
                let variants: Vec<&Item> =
                    variants.iter().filter_map(|id| ctx.doc.get(id)).collect();
                let mut children = self.member_lines(variants, &line_id);
                if *has_stripped_variants {
                    children.push(comment_line("/* private variants */"));
                }
                block(line_id, out, children, None)
            }
            ItemEnum::Variant(Variant { kind, discriminant }) => {
                let mut out = Output::new();
                out.type_name(name(item)).navigate_to(item.id);
                match kind {
                    VariantKind::Plain => {
                        if let Some(discriminant) = discriminant {
                            out.equals().text(&discriminant.expr);
                        }
                        out.punct(",");
                        single(line_id, out)
                    }
                    VariantKind::Tuple(fields) => {
                        self.write_tuple_fields(&mut out, fields);
                        out.punct(",");
                        single(line_id, out)
                    }
                    VariantKind::Struct {
                        fields,
                        has_stripped_fields,
                    } => {
                        let children = self.field_lines(fields, *has_stripped_fields, &line_id);
                        block(line_id, out, children, Some(","))
                    }
                }
            }
            ItemEnum::StructField(ty) => {
                let mut out = Output::new();
                ctx.write_visibility(&mut out, &item.visibility);
                out.text(name(item)).navigate_to(item.id).colon();
                ctx.write_type(&mut out, ty, 0);
                out.punct(",");
                single(line_id, out)
            }
            ItemEnum::Trait(trait_) => self.trait_lines(item, trait_, line_id),
            ItemEnum::Impl(impl_) => self.impl_block(impl_, line_id),
            ItemEnum::Function(function) => {
                let mut out = Output::new();
                ctx.write_visibility(&mut out, &item.visibility);
                ctx.write_function(&mut out, name(item), function);
                single(line_id, out)
            }
            ItemEnum::TypeAlias(alias) => {
                let mut out = self.header(item, "type");
                ctx.write_generic_params(&mut out, &alias.generics.params, 0);
                out.equals();
                ctx.write_type(&mut out, &alias.type_, 0);
                ctx.write_where_clause(&mut out, &alias.generics.where_predicates, 0);
                out.punct(";");
                single(line_id, out)
            }
            ItemEnum::Constant { type_, const_ } => {
                let mut out = Output::new();
                ctx.write_visibility(&mut out, &item.visibility);
                out.keyword("const")
                    .space()
                    .text(name(item))
                    .navigate_to(item.id)
                    .colon();
                ctx.write_type(&mut out, type_, 0);
                if !const_.expr.is_empty() && const_.expr != "_" {
                    out.equals().text(&const_.expr);
                }
                out.punct(";");
                single(line_id, out)
            }
            ItemEnum::Static(Static {
                type_,
                is_mutable,
                is_unsafe,
                ..
            }) => {
                let mut out = Output::new();
                ctx.write_visibility(&mut out, &item.visibility);
                if *is_unsafe {
                    out.keyword("unsafe").space();
                }
                out.keyword("static").space();
                if *is_mutable {
                    out.keyword("mut").space();
                }
                out.text(name(item)).navigate_to(item.id).colon();
                ctx.write_type(&mut out, type_, 0);
                out.punct(";");
                single(line_id, out)
            }
            ItemEnum::AssocConst { type_, value } => {
                let mut out = Output::new();
                ctx.write_visibility(&mut out, &item.visibility);
                out.keyword("const")
                    .space()
                    .text(name(item))
                    .navigate_to(item.id)
                    .colon();
                ctx.write_type(&mut out, type_, 0);
                if let Some(value) = value {
                    out.equals().text(value);
                }
                out.punct(";");
                single(line_id, out)
            }
            ItemEnum::AssocType {
                generics,
                bounds,
                type_,
            } => {
                let mut out = self.header(item, "type");
                ctx.write_generic_params(&mut out, &generics.params, 0);
                if !bounds.is_empty() {
                    out.colon();
                    ctx.write_bounds(&mut out, bounds, 0);
                }
                if let Some(type_) = type_ {
                    out.equals();
                    ctx.write_type(&mut out, type_, 0);
                }
                ctx.write_where_clause(&mut out, &generics.where_predicates, 0);
                out.punct(";");
                single(line_id, out)
            }
            ItemEnum::TraitAlias { generics, params } => {
                let mut out = self.header(item, "trait");
                ctx.write_generic_params(&mut out, &generics.params, 0);
                out.equals();
                ctx.write_bounds(&mut out, params, 0);
                ctx.write_where_clause(&mut out, &generics.where_predicates, 0);
                out.punct(";");
                single(line_id, out)
            }
            ItemEnum::Macro(_) => {
                let mut out = Output::new();
                out.keyword("macro_rules!")
                    .space()
                    .text(name(item))
                    .navigate_to(item.id);
                single(line_id, out)
            }
            ItemEnum::ProcMacro(proc_macro) => {
                let mut out = Output::new();
                match proc_macro.kind {
                    MacroKind::Bang => {
                        ctx.write_visibility(&mut out, &item.visibility);
                        out.keyword("macro")
                            .space()
                            .text(format!("{}!", name(item)))
                            .navigate_to(item.id)
                            .punct("()");
                    }
                    MacroKind::Attr => {
                        out.punct("#[")
                            .text(name(item))
                            .navigate_to(item.id)
                            .punct("]");
                    }
                    MacroKind::Derive => {
                        out.punct("#[")
                            .keyword("derive")
                            .punct("(")
                            .type_name(name(item))
                            .navigate_to(item.id)
                            .punct(")]");
                        if !proc_macro.helpers.is_empty() {
                            out.space().comment(format!(
                                "/* helper attributes: {} */",
                                proc_macro.helpers.join(", ")
                            ));
                        }
                    }
                }
                single(line_id, out)
            }
            ItemEnum::ExternCrate {
                name: crate_name,
                rename,
            } => {
                let mut out = Output::new();
                ctx.write_visibility(&mut out, &item.visibility);
                out.keyword("extern")
                    .space()
                    .keyword("crate")
                    .space()
                    .text(crate_name);
                if let Some(rename) = rename {
                    out.space().keyword("as").space().text(rename);
                }
                out.punct(";");
                single(line_id, out)
            }
            ItemEnum::ExternType => {
                let mut out = Output::new();
                ctx.write_visibility(&mut out, &item.visibility);
                out.keyword("extern")
                    .space()
                    .keyword("type")
                    .space()
                    .type_name(name(item))
                    .navigate_to(item.id)
                    .punct(";");
                single(line_id, out)
            }
            ItemEnum::Primitive(primitive) => {
                let mut out = Output::new();
                out.keyword("primitive")
                    .space()
                    .type_name(&primitive.name)
                    .navigate_to(item.id);
                single(line_id, out)
            }
            ItemEnum::Module(_) => {
                let mut out = self.header(item, "mod");
                out.punct(";");
                single(line_id, out)
            }
            ItemEnum::Use(use_) => {
                let mut out = Output::new();
                ctx.write_visibility(&mut out, &item.visibility);
                out.keyword("use").space().type_name(&use_.source).punct(";");
                single(line_id, out)
            }
            ItemEnum::Unsupported(shape) => {
                warn!(id = %item.id, %shape, "unsupported item shape");
                let mut out = Output::new();
                ctx.write_visibility(&mut out, &item.visibility);
                if let Some(name) = &item.name {
                    out.text(name).space();
                }
                out.text(UNKNOWN);
                single(line_id, out)
            }
        }
    }

    /// `pub <keyword> Name`, the name navigating to the item itself.
    fn header(&self, item: &Item, keyword: &str) -> Output {
        let mut out = Output::new();
        self.ctx.write_visibility(&mut out, &item.visibility);
        out.keyword(keyword)
            .space()
            .type_name(name(item))
            .navigate_to(item.id);
        out
    }

    fn trait_lines(
        &mut self,
        item: &'c Item,
        trait_: &'c Trait,
        line_id: String,
    ) -> Vec<ReviewLine> {
        let ctx = self.ctx;
        let mut out = Output::new();
        ctx.write_visibility(&mut out, &item.visibility);
        if trait_.is_unsafe {
            out.keyword("unsafe").space();
        }
        if trait_.is_auto {
            out.keyword("auto").space();
        }
        out.keyword("trait")
            .space()
            .type_name(name(item))
            .navigate_to(item.id);
        ctx.write_generic_params(&mut out, &trait_.generics.params, 0);
        if !trait_.bounds.is_empty() {
            out.colon();
            ctx.write_bounds(&mut out, &trait_.bounds, 0);
        }
        ctx.write_where_clause(&mut out, &trait_.generics.where_predicates, 0);

        let members = sort_children(ctx.doc, &trait_.items).non_module;
        let children = self.member_lines(members, &line_id);
        block(line_id, out, children, None)
    }

    fn write_generics_and_where(&self, out: &mut Output, generics: &Generics) {
        self.ctx.write_generic_params(out, &generics.params, 0);
        self.ctx.write_where_clause(out, &generics.where_predicates, 0);
    }

    /// `(pub T, _)`. Stripped or unreadable fields render as `_`.
    fn write_tuple_fields(&self, out: &mut Output, fields: &[Option<Id>]) {
        let ctx = self.ctx;
        out.punct("(");
        write_separated(out, fields, Output::comma, |out, field| {
            let field = field.as_ref().and_then(|id| ctx.doc.get(id));
            match field {
                Some(Item {
                    visibility,
                    inner: ItemEnum::StructField(ty),
                    ..
                }) => {
                    ctx.write_visibility(out, visibility);
                    ctx.write_type(out, ty, 0);
                }
                _ => {
                    out.text("_");
                }
            }
        });
        out.punct(")");
    }

    /// Named fields in declaration order, then a marker if some are hidden.
    fn field_lines(&mut self, fields: &[Id], has_stripped: bool, parent: &str) -> Vec<ReviewLine> {
        let doc = self.ctx.doc;
        let fields: Vec<&Item> = fields.iter().filter_map(|id| doc.get(id)).collect();
        let mut lines = self.member_lines(fields, parent);
        if has_stripped {
            lines.push(comment_line("/* private fields */"));
        }
        lines
    }
}

fn single(line_id: String, out: Output) -> Vec<ReviewLine> {
    vec![ReviewLine::new(Some(line_id), out.into_tokens())]
}
