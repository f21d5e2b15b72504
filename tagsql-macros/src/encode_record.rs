use crate::{decode_field::FieldMetadata, decode_record::RecordMetadata};
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

pub(crate) fn encode_record(record: &RecordMetadata) -> TokenStream {
    let name = &record.item.ident;
    let (impl_generics, ty_generics, where_clause) = record.item.generics.split_for_impl();
    let mut defs = Vec::new();
    let mut entries = Vec::new();
    if let Some(header) = &record.header {
        let i = defs.len();
        defs.push(header);
        entries.push(quote!(::tagsql::Field::column(&FIELDS[#i], None)));
    }
    for field in &record.fields {
        match field {
            FieldMetadata::Column { ident, def } => {
                let i = defs.len();
                defs.push(def);
                let value = if def.reads_value() {
                    quote!(Some(::tagsql::AsValue::as_value(
                        ::std::clone::Clone::clone(&self.#ident)
                    )))
                } else {
                    quote!(None)
                };
                entries.push(quote!(::tagsql::Field::column(&FIELDS[#i], #value)));
            }
            FieldMetadata::Embedded { ident } => {
                let label = ident.unraw().to_string();
                entries.push(quote!(::tagsql::Field::embedded(#label, &self.#ident)));
            }
            FieldMetadata::Untagged => {}
        }
    }
    quote! {
        impl #impl_generics ::tagsql::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::tagsql::Field<'_>> {
                static FIELDS: ::std::sync::LazyLock<::std::boxed::Box<[::tagsql::FieldDef]>> =
                    ::std::sync::LazyLock::new(|| ::std::vec![#(#defs),*].into_boxed_slice());
                ::std::vec![#(#entries),*]
            }
        }
    }
}
