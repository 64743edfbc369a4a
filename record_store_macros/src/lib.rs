mod identifiable;

use proc_macro::TokenStream;

/// Derive macro implementing `record_store::Identifiable`.
///
/// The id field is the one marked `#[identifiable(id)]`, or the field named
/// `id` when no field is marked. It must be a `String`.
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Identifiable)]
/// struct Dummy {
///     #[identifiable(id)]
///     key: String,
///     name: String,
/// }
/// ```
#[proc_macro_derive(Identifiable, attributes(identifiable))]
pub fn derive_identifiable(input: TokenStream) -> TokenStream {
    identifiable::derive_identifiable(input)
}
