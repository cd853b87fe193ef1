mod macros;

use proc_macro::TokenStream;

/// Derives `xmlbind::Bindable` from `#[xml(...)]` field attributes.
///
/// Supported field directives, applied in the order written:
/// `attribute`, `element`, `array`, `array_item` (each optionally `= "name"`)
/// and `text`. The container accepts `#[xml(rename = "Name")]`.
#[proc_macro_derive(Bindable, attributes(xml))]
pub fn derive_bindable(input: TokenStream) -> TokenStream {
    macros::bindable::expand(input.into()).into()
}
