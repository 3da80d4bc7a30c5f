//! Procedural macros for leadboard operations
//!
//! `#[operation(verb = "...", noun = "...", description = "...")]` turns a
//! command struct into an `Operation` by generating the metadata accessors.
//! The struct's fields are the command's parameters; nothing else is derived.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, LitStr};

/// Attribute macro for defining an operation
///
/// # Usage
///
/// ```ignore
/// #[operation(verb = "move", noun = "lead", description = "Move a lead")]
/// #[derive(Debug, Deserialize, Serialize)]
/// pub struct MoveLead {
///     pub id: LeadId,
///     pub column: ColumnId,
///     pub position: usize,
/// }
/// ```
#[proc_macro_attribute]
pub fn operation(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut verb: Option<LitStr> = None;
    let mut noun: Option<LitStr> = None;
    let mut description: Option<LitStr> = None;

    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("verb") {
            verb = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("noun") {
            noun = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("description") {
            description = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error("unsupported operation attribute"));
        }
        Ok(())
    });
    parse_macro_input!(attr with parser);

    let input = parse_macro_input!(item as DeriveInput);

    if !matches!(input.data, syn::Data::Struct(_)) {
        return syn::Error::new_spanned(&input.ident, "operation macro only supports structs")
            .to_compile_error()
            .into();
    }

    let (verb, noun) = match (verb, noun) {
        (Some(verb), Some(noun)) => (verb, noun),
        _ => {
            return syn::Error::new_spanned(
                &input.ident,
                "operation requires both `verb` and `noun`",
            )
            .to_compile_error()
            .into()
        }
    };
    let description = description
        .map(|d| d.value())
        .unwrap_or_default();

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #input

        impl #impl_generics ::leadboard_operations::Operation for #name #ty_generics #where_clause {
            fn verb(&self) -> &'static str {
                #verb
            }

            fn noun(&self) -> &'static str {
                #noun
            }

            fn description(&self) -> &'static str {
                #description
            }
        }
    };

    TokenStream::from(expanded)
}
