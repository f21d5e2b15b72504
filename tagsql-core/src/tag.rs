use crate::{Condition, Error, Result, quote_cow};
use anyhow::Context;
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};
use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Name of a field tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Table,
    Insert,
    Select,
    Update,
    Where,
    Order,
    Limit,
    Offset,
}

impl TagKind {
    /// Every kind, in the order a field's tags are processed.
    pub const ALL: [TagKind; 8] = [
        TagKind::Table,
        TagKind::Insert,
        TagKind::Select,
        TagKind::Update,
        TagKind::Where,
        TagKind::Order,
        TagKind::Offset,
        TagKind::Limit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TagKind::Table => "table",
            TagKind::Insert => "insert",
            TagKind::Select => "select",
            TagKind::Update => "update",
            TagKind::Where => "where",
            TagKind::Order => "order",
            TagKind::Limit => "limit",
            TagKind::Offset => "offset",
        }
    }

    /// Whether the tag reads the runtime value of its field.
    pub fn reads_value(&self) -> bool {
        matches!(
            self,
            TagKind::Insert | TagKind::Update | TagKind::Where | TagKind::Limit | TagKind::Offset
        )
    }
}

impl Display for TagKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TagKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        TagKind::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| Error::msg(format!("Unknown tag `{}`", s)))
    }
}

/// Column tag accepting the `omitempty` option, used by `insert` and `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTag {
    pub column: Cow<'static, str>,
    pub omitempty: bool,
}

impl ColumnTag {
    fn parse(kind: TagKind, raw: &str) -> Result<Self> {
        let (column, option) = match raw.split_once(',') {
            Some((column, option)) => (column.trim(), Some(option)),
            None => (raw.trim(), None),
        };
        if column.is_empty() {
            return Err(Error::msg(format!("{} column can not be empty", kind)));
        }
        let omitempty = match option {
            None => false,
            Some("omitempty") => true,
            Some(option) => {
                return Err(Error::msg(format!(
                    "{} option `{}` is not recognized, expected `omitempty`",
                    kind, option
                )));
            }
        };
        Ok(Self {
            column: column.to_string().into(),
            omitempty,
        })
    }
}

impl ToTokens for ColumnTag {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let column = quote_cow(&self.column);
        let omitempty = self.omitempty;
        tokens.append_all(quote! {
            ::tagsql::ColumnTag {
                column: #column,
                omitempty: #omitempty,
            }
        });
    }
}

/// Role of a field, one variant for each [`TagKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Table(Cow<'static, str>),
    Insert(ColumnTag),
    Select(Cow<'static, str>),
    Update(ColumnTag),
    Where(Condition),
    Order(Cow<'static, str>),
    /// The field value is the count, the tag text is ignored.
    Limit,
    /// The field value is the count, the tag text is ignored.
    Offset,
}

impl Tag {
    pub fn parse(kind: TagKind, raw: &str) -> Result<Self> {
        Ok(match kind {
            TagKind::Table => {
                if raw.is_empty() {
                    return Err(Error::msg("table tag value can not be empty"));
                }
                Tag::Table(raw.to_string().into())
            }
            TagKind::Insert => Tag::Insert(ColumnTag::parse(kind, raw)?),
            TagKind::Select => {
                if raw.trim().is_empty() {
                    return Err(Error::msg("select column can not be empty"));
                }
                Tag::Select(raw.trim().to_string().into())
            }
            TagKind::Update => Tag::Update(ColumnTag::parse(kind, raw)?),
            TagKind::Where => Tag::Where(Condition::parse(raw)?),
            TagKind::Order => {
                if raw.is_empty() {
                    return Err(Error::msg("order tag value can not be empty"));
                }
                Tag::Order(raw.to_string().into())
            }
            TagKind::Limit => Tag::Limit,
            TagKind::Offset => Tag::Offset,
        })
    }

    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Table(..) => TagKind::Table,
            Tag::Insert(..) => TagKind::Insert,
            Tag::Select(..) => TagKind::Select,
            Tag::Update(..) => TagKind::Update,
            Tag::Where(..) => TagKind::Where,
            Tag::Order(..) => TagKind::Order,
            Tag::Limit => TagKind::Limit,
            Tag::Offset => TagKind::Offset,
        }
    }
}

impl ToTokens for Tag {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.append_all(match self {
            Tag::Table(v) => {
                let v = quote_cow(v);
                quote!(::tagsql::Tag::Table(#v))
            }
            Tag::Insert(v) => quote!(::tagsql::Tag::Insert(#v)),
            Tag::Select(v) => {
                let v = quote_cow(v);
                quote!(::tagsql::Tag::Select(#v))
            }
            Tag::Update(v) => quote!(::tagsql::Tag::Update(#v)),
            Tag::Where(v) => quote!(::tagsql::Tag::Where(#v)),
            Tag::Order(v) => {
                let v = quote_cow(v);
                quote!(::tagsql::Tag::Order(#v))
            }
            Tag::Limit => quote!(::tagsql::Tag::Limit),
            Tag::Offset => quote!(::tagsql::Tag::Offset),
        });
    }
}

/// Static shape of one leaf field: its name and the tags it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: Cow<'static, str>,
    pub tags: Cow<'static, [Tag]>,
}

impl FieldDef {
    /// Descriptor for a field without tags.
    pub const fn untagged(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            tags: Cow::Borrowed(&[]),
        }
    }

    /// Builds a descriptor from raw `(tag, value)` pairs, the runtime counterpart of the derive.
    ///
    /// ```rust
    /// use tagsql_core::FieldDef;
    /// let def = FieldDef::parse("name", [("select", "name"), ("where", "name,like,omitempty")]).unwrap();
    /// assert_eq!(def.tags.len(), 2);
    /// ```
    pub fn parse<'a>(
        name: impl Into<Cow<'static, str>>,
        tags: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self> {
        let name = name.into();
        let mut parsed: Vec<Tag> = Vec::new();
        for (kind, raw) in tags {
            let tag = kind
                .parse::<TagKind>()
                .and_then(|kind| Tag::parse(kind, raw))
                .with_context(|| format!("While parsing the tags of field `{}`", name))?;
            if parsed.iter().any(|v| v.kind() == tag.kind()) {
                return Err(Error::msg(format!(
                    "Field `{}` declares the `{}` tag more than once",
                    name,
                    tag.kind()
                )));
            }
            parsed.push(tag);
        }
        Ok(Self {
            name,
            tags: parsed.into(),
        })
    }

    pub fn tag(&self, kind: TagKind) -> Option<&Tag> {
        self.tags.iter().find(|v| v.kind() == kind)
    }

    /// Whether any tag needs the runtime value of the field.
    pub fn reads_value(&self) -> bool {
        self.tags.iter().any(|v| v.kind().reads_value())
    }
}

impl ToTokens for FieldDef {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = quote_cow(&self.name);
        let tags = self.tags.iter();
        tokens.append_all(quote! {
            ::tagsql::FieldDef {
                name: #name,
                tags: ::std::borrow::Cow::Owned(::std::vec![#(#tags),*]),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnTag, FieldDef, Tag, TagKind};

    #[test]
    fn parse_column_tags() {
        assert_eq!(
            Tag::parse(TagKind::Insert, "age,omitempty").unwrap(),
            Tag::Insert(ColumnTag {
                column: "age".into(),
                omitempty: true,
            })
        );
        assert_eq!(
            Tag::parse(TagKind::Update, "name").unwrap(),
            Tag::Update(ColumnTag {
                column: "name".into(),
                omitempty: false,
            })
        );
        assert_eq!(
            Tag::parse(TagKind::Insert, ",omitempty")
                .unwrap_err()
                .to_string(),
            "insert column can not be empty"
        );
        assert_eq!(
            Tag::parse(TagKind::Update, "name,always")
                .unwrap_err()
                .to_string(),
            "update option `always` is not recognized, expected `omitempty`"
        );
    }

    #[test]
    fn parse_literal_tags() {
        assert_eq!(
            Tag::parse(TagKind::Table, "").unwrap_err().to_string(),
            "table tag value can not be empty"
        );
        assert_eq!(
            Tag::parse(TagKind::Order, "").unwrap_err().to_string(),
            "order tag value can not be empty"
        );
        assert_eq!(
            Tag::parse(TagKind::Select, "").unwrap_err().to_string(),
            "select column can not be empty"
        );
        assert_eq!(
            Tag::parse(TagKind::Order, "id desc").unwrap(),
            Tag::Order("id desc".into())
        );
        assert_eq!(Tag::parse(TagKind::Limit, "").unwrap(), Tag::Limit);
        assert_eq!(Tag::parse(TagKind::Offset, "ignored").unwrap(), Tag::Offset);
    }

    #[test]
    fn field_def() {
        let def = FieldDef::parse("id", [("select", "id"), ("where", "id,=,omitempty")]).unwrap();
        assert_eq!(def.name, "id");
        assert!(def.tag(TagKind::Select).is_some());
        assert!(def.tag(TagKind::Insert).is_none());
        assert!(def.reads_value());
        assert!(!FieldDef::parse("t", [("table", "t")]).unwrap().reads_value());

        let error = FieldDef::parse("id", [("select", "")]).unwrap_err();
        assert_eq!(
            format!("{:#}", error),
            "While parsing the tags of field `id`: select column can not be empty"
        );
        let error = FieldDef::parse("id", [("json", "id")]).unwrap_err();
        assert_eq!(error.root_cause().to_string(), "Unknown tag `json`");
        assert!(FieldDef::parse("id", [("order", "a"), ("order", "b")]).is_err());
    }
}
