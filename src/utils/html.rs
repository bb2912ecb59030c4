/// Clean user-authored text using the ammonia library.
///
/// Whitelist-based: harmless inline tags survive while <script>, <iframe>
/// and event-handler attributes are removed. Applied to titles, intros,
/// commentary and comments before they reach the store. Prompt bodies and
/// raw transcripts are kept verbatim since they routinely contain code.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
