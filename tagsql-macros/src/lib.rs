mod decode_field;
mod decode_record;
mod encode_record;

use decode_record::decode_record;
use encode_record::encode_record;
use proc_macro::TokenStream;
use syn::{ItemStruct, parse_macro_input};

/// Implements `tagsql::Record` from `#[sql(..)]` field attributes.
///
/// ```ignore
/// #[derive(Record)]
/// #[sql(table = "my_table")]
/// struct User {
///     #[sql(insert = "id", where = "id,=,omitempty")]
///     id: i32,
///     #[sql(insert = "name", select = "name")]
///     name: String,
///     #[sql(embed)]
///     paging: Paging,
/// }
/// ```
#[proc_macro_derive(Record, attributes(sql))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemStruct);
    decode_record(item)
        .map(|v| encode_record(&v))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
