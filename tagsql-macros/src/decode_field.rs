use proc_macro2::Span;
use quote::ToTokens;
use syn::{
    Attribute, Error, Field, Ident, LitStr, Result, ext::IdentExt, meta::ParseNestedMeta,
    spanned::Spanned,
};
use tagsql_core::{FieldDef, Tag, TagKind};

pub(crate) enum FieldMetadata {
    /// Field carrying tags, `def` was validated at compile time.
    Column { ident: Ident, def: FieldDef },
    /// Nested record flattened into the parent.
    Embedded { ident: Ident },
    Untagged,
}

/// Reads `tag = "value"`, `limit` and `offset` also work as bare words.
fn decode_tag(arg: &ParseNestedMeta, tags: &mut Vec<Tag>) -> Result<()> {
    let name = arg.path.to_token_stream().to_string();
    let Ok(kind) = name.trim_start_matches("r#").parse::<TagKind>() else {
        return Err(arg.error(format!(
            "Unknown attribute `{}` inside sql, expected one of: table, insert, select, update, where, order, limit, offset, embed",
            name
        )));
    };
    let (raw, span) = if arg.input.peek(syn::Token![=]) {
        let lit: LitStr = arg.value()?.parse()?;
        (lit.value(), lit.span())
    } else if matches!(kind, TagKind::Limit | TagKind::Offset) {
        (String::new(), arg.path.span())
    } else {
        return Err(arg.error(format!(
            "Error while parsing `{}`, use it like: `#[sql({} = \"...\")]`",
            kind, kind
        )));
    };
    if tags.iter().any(|v| v.kind() == kind) {
        return Err(Error::new(span, format!("The `{}` tag appears more than once", kind)));
    }
    let tag = Tag::parse(kind, &raw).map_err(|e| Error::new(span, format!("{:#}", e)))?;
    tags.push(tag);
    Ok(())
}

pub(crate) fn decode_tags(attrs: &[Attribute], allow_embed: bool) -> Result<(Vec<Tag>, Option<Span>)> {
    let mut tags = Vec::new();
    let mut embed = None;
    for attr in attrs.iter().filter(|v| v.path().is_ident("sql")) {
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("embed") {
                if !allow_embed {
                    return Err(arg.error("`embed` can only be used on a field"));
                }
                embed = Some(arg.path.span());
                Ok(())
            } else {
                decode_tag(&arg, &mut tags)
            }
        })?;
    }
    Ok((tags, embed))
}

pub(crate) fn decode_field(field: &Field) -> Result<FieldMetadata> {
    let Some(ident) = field.ident.clone() else {
        return Err(Error::new(field.span(), "Record fields are expected to have a name"));
    };
    let (tags, embed) = decode_tags(&field.attrs, true)?;
    if let Some(span) = embed {
        if !tags.is_empty() {
            return Err(Error::new(
                span,
                format!("Field `{}` is embedded and can not carry tags", ident),
            ));
        }
        return Ok(FieldMetadata::Embedded { ident });
    }
    if tags.is_empty() {
        return Ok(FieldMetadata::Untagged);
    }
    let name = ident.unraw().to_string();
    Ok(FieldMetadata::Column {
        ident,
        def: FieldDef {
            name: name.into(),
            tags: tags.into(),
        },
    })
}
