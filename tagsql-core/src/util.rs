use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use std::{
    borrow::Cow,
    cmp::min,
    fmt::{self, Display, Formatter},
};

/// Emits a `Cow` as a borrowed literal, owned strings become `&'static str` literals.
pub fn quote_cow<T: ToOwned + ToTokens + ?Sized>(value: &Cow<T>) -> TokenStream
where
    <T as ToOwned>::Owned: ToTokens,
{
    match value {
        Cow::Borrowed(v) => quote! { ::std::borrow::Cow::Borrowed(#v) },
        Cow::Owned(v) => quote! { ::std::borrow::Cow::Borrowed(#v) },
    }
}

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Like [`separated_by`] but the separator is written between every pair, even
/// around values that wrote nothing.
pub fn joined_by<T, F>(out: &mut String, values: impl IntoIterator<Item = T>, mut f: F, separator: &str)
where
    F: FnMut(&mut String, T),
{
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        f(out, v);
    }
}

/// Displays at most the first 497 bytes of a query, followed by `...` when cut.
pub struct TruncateLong<'a>(pub &'a str);

impl Display for TruncateLong<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut end = min(self.0.len(), 497);
        while !self.0.is_char_boundary(end) {
            end -= 1;
        }
        write!(
            f,
            "{}{}",
            self.0[..end].trim_end(),
            if end < self.0.len() { "..." } else { "" }
        )
    }
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        $crate::TruncateLong(&$query)
    };
}
