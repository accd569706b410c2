use proc_macro::TokenStream;
use syn::DeriveInput;
use quote::quote;

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;

    // Every monomorphization would share the same lazily assigned id.
    if !ast.generics.params.is_empty() {
        return syn::Error::new_spanned(&ast.generics, "Components cannot be generic")
            .to_compile_error()
            .into();
    }

    let gen = quote! {
        impl dense_ecs::components::Component for #name {
            #[inline(always)]
            fn component_id() -> dense_ecs::components::ComponentId {
                dense_ecs::lazy_static! {
                    static ref COMPONENT_ID: dense_ecs::components::ComponentId =
                        dense_ecs::components::ComponentId::next();
                }
                *COMPONENT_ID
            }

            #[inline(always)]
            fn component_name() -> &'static str {
                stringify!(#name)
            }
        }
    };
    gen.into()
}
