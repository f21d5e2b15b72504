use crate::decode_field::{FieldMetadata, decode_field, decode_tags};
use syn::{Error, Fields, ItemStruct, Result, spanned::Spanned};
use tagsql_core::FieldDef;

pub(crate) struct RecordMetadata {
    pub(crate) item: ItemStruct,
    /// Tags declared on the struct itself, visited first and without a value.
    pub(crate) header: Option<FieldDef>,
    pub(crate) fields: Vec<FieldMetadata>,
}

pub(crate) fn decode_record(item: ItemStruct) -> Result<RecordMetadata> {
    let Fields::Named(named) = &item.fields else {
        return Err(Error::new(
            item.fields.span(),
            "Record can only be derived for structs with named fields",
        ));
    };
    let fields = named
        .named
        .iter()
        .map(decode_field)
        .collect::<Result<Vec<_>>>()?;
    let (tags, _) = decode_tags(&item.attrs, false)?;
    if let Some(tag) = tags.iter().find(|v| v.kind().reads_value()) {
        return Err(Error::new(
            item.ident.span(),
            format!(
                "The `{}` tag reads a field value and can not be declared on the struct",
                tag.kind()
            ),
        ));
    }
    let header = (!tags.is_empty()).then(|| FieldDef {
        name: item.ident.to_string().into(),
        tags: tags.into(),
    });
    Ok(RecordMetadata {
        item,
        header,
        fields,
    })
}
