use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Instruments a function with a [`tracing`] span.
///
/// Expands to `#[tracing::instrument(ret(level = "trace"), ...)]` with the
/// given arguments appended and emits a `call` trace event on entry. For
/// functions returning `Result`, pass `err` to also record the error.
///
/// [`tracing`]: https://docs.rs/tracing
#[proc_macro_attribute]
pub fn trace_instrument(meta: TokenStream, input: TokenStream) -> TokenStream {
    let meta = proc_macro2::TokenStream::from(meta);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(input as ItemFn);

    let name = sig.ident.to_string();

    quote! {
        #[::tracing::instrument(ret(level = "trace"), #meta)]
        #(#attrs)*
        #vis #sig {
            ::tracing::trace!(function = #name, "call");
            #block
        }
    }
    .into()
}
