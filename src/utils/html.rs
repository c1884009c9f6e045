use ammonia;

/// Clean HTML content using the ammonia library.
///
/// House and room descriptions are free text that ends up rendered by the
/// frontend; whitelist-based sanitization strips dangerous tags (<script>,
/// <iframe>) and attributes (onclick) before the text is stored.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
