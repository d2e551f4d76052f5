use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::ParseStream;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr};

/// One `#[grammar(..)]` attribute.
enum FieldGrammar {
    /// `#[grammar("...")]`
    Annotation(LitStr),
    /// `#[grammar(origin)]`
    Origin,
}

fn parse_attribute(input: ParseStream) -> syn::Result<FieldGrammar> {
    if input.peek(LitStr) {
        return Ok(FieldGrammar::Annotation(input.parse()?));
    }
    let ident: Ident = input.parse()?;
    if ident == "origin" {
        Ok(FieldGrammar::Origin)
    } else {
        Err(syn::Error::new_spanned(ident, "expected a grammar string or `origin`"))
    }
}

/// Derive macro implementing `Grammar` and `FieldValue` for a struct.
///
/// Each field annotated with `#[grammar("...")]` contributes its grammar
/// fragment, in declaration order. A field annotated with `#[grammar(origin)]`
/// must be an `OriginRange` and receives the source range of every match.
/// Other fields keep their `Default` value.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default, Clone, Grammar)]
/// struct DirEntry {
///     #[grammar("'Entry' '{' $StrParser")]
///     name: String,
///     #[grammar("$regex('[0-9]+')")]
///     id: u32,
///     #[grammar("$.? '}'")]
///     sub_dir: Option<Box<Dir>>,
/// }
/// ```
#[proc_macro_derive(Grammar, attributes(grammar))]
pub fn derive_grammar(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Grammar can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Grammar can only be derived for structs with named fields",
            ))
        }
    };

    let mut declarations = Vec::new();
    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.to_string();
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("grammar")) {
            let declaration = match attr.parse_args_with(parse_attribute)? {
                FieldGrammar::Annotation(annotation) => quote! {
                    schema.field(#field_name, #annotation, |target| &mut target.#ident);
                },
                FieldGrammar::Origin => quote! {
                    schema.origin_range(|target| &mut target.#ident);
                },
            };
            declarations.push(declaration);
        }
    }

    let type_name = name.to_string();

    Ok(quote! {
        impl #impl_generics ::grammar_generator::Grammar for #name #ty_generics #where_clause {
            fn name() -> &'static str {
                #type_name
            }

            #[allow(unused_variables)]
            fn describe(schema: &mut ::grammar_generator::Schema<Self>) {
                #(#declarations)*
            }
        }

        impl #impl_generics ::grammar_generator::FieldValue for #name #ty_generics #where_clause {
            fn from_value(
                value: ::grammar_generator::Value,
            ) -> ::core::result::Result<Self, ::grammar_generator::BindError> {
                ::grammar_generator::from_node(value)
            }

            fn inferred() -> ::core::option::Option<::grammar_generator::TypeInfo> {
                ::core::option::Option::Some(::grammar_generator::TypeInfo::of::<Self>())
            }
        }
    })
}
