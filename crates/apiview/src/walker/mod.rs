//! Walks a crate from its root module and renders everything reachable into a
//! [`ReviewLine`] forest.
//!
//! Every module gets a section of its own. A section lists the module's `use`
//! lines first, then placeholders for items re-exported from other crates,
//! then the module's own items with their impl blocks. Nested modules follow
//! their parent depth-first.

mod impls;
mod items;

use std::collections::HashSet;

use apiview_fmt::{Output, ReviewLine};
use jsondoc::{Id, Item, ItemEnum, Use};
use tracing::{debug, info};

use crate::render::{RenderingContext, replace_crate_path, sort_reexport_lines};
use crate::sort::sort_children;

/// Attributes that are part of an item's public contract and get a line of their own.
const API_ATTRIBUTES: &[&str] = &[
    "#[non_exhaustive",
    "#[repr(",
    "#[no_mangle",
    "#[unsafe(no_mangle",
    "#[export_name",
    "#[unsafe(export_name",
    "#[link_section",
    "#[unsafe(link_section",
    "#[must_use",
];

/// Renders a whole crate. One renderer is used for one pass.
pub struct ApiRenderer<'c> {
    ctx: RenderingContext<'c>,
    line_ids: LineIds,
    visited_modules: HashSet<Id>,
}

impl<'c> ApiRenderer<'c> {
    pub fn new(ctx: RenderingContext<'c>) -> Self {
        Self {
            ctx,
            line_ids: LineIds::default(),
            visited_modules: HashSet::new(),
        }
    }

    pub fn render_crate(mut self) -> Vec<ReviewLine> {
        let doc = self.ctx.doc;
        let mut lines = Vec::new();
        self.render_module(doc.root(), doc.crate_name().to_string(), &mut lines);
        info!(
            crate_name = doc.crate_name(),
            modules = self.visited_modules.len(),
            lines = lines.len(),
            "rendered crate"
        );
        lines
    }

    fn render_module(&mut self, module: &'c Item, path: String, lines: &mut Vec<ReviewLine>) {
        let ItemEnum::Module(inner) = &module.inner else {
            return;
        };
        if !self.visited_modules.insert(module.id) {
            debug!(id = %module.id, %path, "module already rendered");
            return;
        }

        let sorted = sort_children(self.ctx.doc, &inner.items);
        let line_id = self.line_ids.allocate(&path);

        let mut uses = Vec::new();
        let mut reexports = Vec::new();
        let mut foreign_modules = Vec::new();
        let mut items = Vec::new();
        for child in sorted.non_module {
            match &child.inner {
                ItemEnum::Use(use_) => match self.render_use(child, use_, &path) {
                    UseLines::Local(local) => uses.extend(local),
                    UseLines::Foreign(resolved) => {
                        reexports.extend(resolved.items);
                        foreign_modules.extend(resolved.modules);
                    }
                },
                // Impl blocks are rendered after the type they belong to.
                ItemEnum::Impl(_) => {}
                _ => items.extend(self.render_item(child, format!("{path}::{}", name(child)))),
            }
        }
        sort_reexport_lines(&mut reexports);
        sort_reexport_lines(&mut foreign_modules);
        for line in reexports.iter_mut().chain(foreign_modules.iter_mut()) {
            line.line_id = line
                .line_id
                .take()
                .map(|id| self.line_ids.allocate(&format!("{id}.reexport")));
        }

        let mut children = uses;
        children.extend(reexports);
        children.extend(items);

        let mut header = Output::new();
        self.ctx.write_visibility(&mut header, &module.visibility);
        header
            .keyword("mod")
            .space()
            .type_name(&path)
            .navigate_to(module.id);

        lines.extend(self.doc_lines(module, &line_id));
        lines.extend(block(line_id, header, children, None));
        lines.extend(foreign_modules);

        for child in sorted.module {
            self.render_module(child, format!("{path}::{}", name(child)), lines);
        }
    }

    fn render_use(&mut self, item: &'c Item, use_: &'c Use, parent: &str) -> UseLines {
        let doc = self.ctx.doc;
        let foreign_target = use_.id.filter(|id| !doc.is_local(id));
        if let Some(id) = foreign_target.filter(|_| !use_.is_glob) {
            let resolved = self.ctx.resolve_reexport(&id);
            if !resolved.is_empty() {
                return UseLines::Foreign(resolved);
            }
        }

        let local_name = if use_.is_glob { "*" } else { use_.name.as_str() };
        let line_id = self.line_ids.allocate(&format!("{parent}::{local_name}"));
        let source = replace_crate_path(&use_.source, doc.crate_name());

        let mut out = Output::new();
        self.ctx.write_visibility(&mut out, &item.visibility);
        out.keyword("use").space().type_name(&source);
        if let Some(id) = use_.id.filter(|id| doc.is_local(id)) {
            out.navigate_to(id);
        }
        if use_.is_glob {
            out.punct("::").punct("*");
        } else if source.rsplit("::").next() != Some(use_.name.as_str()) {
            out.space().keyword("as").space().text(&use_.name);
        }
        out.punct(";");

        let mut lines = self.doc_lines(item, &line_id);
        lines.push(ReviewLine::new(Some(line_id), out.into_tokens()));
        UseLines::Local(lines)
    }

    /// Doc comment, attributes, the item itself and its impl blocks.
    fn render_item(&mut self, item: &'c Item, id_base: String) -> Vec<ReviewLine> {
        let line_id = self.line_ids.allocate(&id_base);
        let mut lines = self.doc_lines(item, &line_id);
        lines.extend(attribute_lines(item, &line_id));
        lines.extend(self.derive_line(item, &line_id));
        lines.extend(self.item_lines(item, line_id.clone()));
        lines.extend(self.impl_lines(item, &line_id));
        lines
    }

    /// Renders each member under `parent`, e.g. fields, variants or trait items.
    fn member_lines(
        &mut self,
        members: impl IntoIterator<Item = &'c Item>,
        parent: &str,
    ) -> Vec<ReviewLine> {
        let mut lines = Vec::new();
        for member in members {
            let id_base = match member.name.as_deref() {
                Some(name) => format!("{parent}.{name}"),
                None => format!("{parent}.{}", member.id),
            };
            lines.extend(self.render_item(member, id_base));
        }
        lines
    }

    fn doc_lines(&self, item: &Item, line_id: &str) -> Vec<ReviewLine> {
        if !self.ctx.options.include_docs {
            return vec![];
        }
        let Some(docs) = item.docs.as_deref().filter(|d| !d.trim().is_empty()) else {
            return vec![];
        };
        docs.lines()
            .map(|line| {
                let line = line.trim_end();
                let mut out = Output::new();
                if line.is_empty() {
                    out.comment("///");
                } else {
                    out.comment(format!("/// {line}"));
                }
                out.documentation();
                ReviewLine::new(None, out.into_tokens()).related_to(line_id)
            })
            .collect()
    }
}

enum UseLines {
    Local(Vec<ReviewLine>),
    Foreign(crate::render::ReexportLines),
}

fn attribute_lines(item: &Item, line_id: &str) -> Vec<ReviewLine> {
    let mut lines: Vec<ReviewLine> = item
        .attrs
        .iter()
        .filter(|attr| API_ATTRIBUTES.iter().any(|prefix| attr.starts_with(prefix)))
        .map(|attr| {
            let mut out = Output::new();
            out.text(attr);
            ReviewLine::new(None, out.into_tokens()).related_to(line_id)
        })
        .collect();

    if let Some(deprecation) = &item.deprecation {
        let mut args = vec![];
        if let Some(since) = &deprecation.since {
            args.push(format!("since = {since:?}"));
        }
        if let Some(note) = &deprecation.note {
            args.push(format!("note = {note:?}"));
        }
        let mut out = Output::new();
        if args.is_empty() {
            out.text("#[deprecated]");
        } else {
            out.text(format!("#[deprecated({})]", args.join(", ")));
        }
        lines.push(ReviewLine::new(None, out.into_tokens()).related_to(line_id));
    }
    lines
}

/// A `{ .. }` body. Without children the braces stay on the header line.
///
/// `terminator` follows the closing brace, e.g. `,` after a struct variant.
fn block(
    line_id: String,
    mut header: Output,
    children: Vec<ReviewLine>,
    terminator: Option<&str>,
) -> Vec<ReviewLine> {
    if children.is_empty() {
        header.space().punct("{}");
        if let Some(terminator) = terminator {
            header.punct(terminator);
        }
        return vec![ReviewLine::new(Some(line_id), header.into_tokens())];
    }

    header.space().punct("{");
    let mut close = Output::new();
    close.punct("}");
    if let Some(terminator) = terminator {
        close.punct(terminator);
    }
    let close = ReviewLine::new(None, close.into_tokens()).related_to(&line_id);
    vec![
        ReviewLine::new(Some(line_id), header.into_tokens()).with_children(children),
        close,
    ]
}

fn comment_line(text: &str) -> ReviewLine {
    let mut out = Output::new();
    out.comment(text);
    ReviewLine::new(None, out.into_tokens())
}

fn name(item: &Item) -> &str {
    item.name.as_deref().unwrap_or_default()
}

/// Hands out unique line ids. A repeated base gets `#2`, `#3`, ... appended.
#[derive(Debug, Default)]
struct LineIds {
    used: HashSet<String>,
}

impl LineIds {
    fn allocate(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}#{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
